//! A small home insurance model shared by the integration tests.
//!
//! Policy side: `HomePolicy` with its `Coverage`s. Product side: `HomeProduct`
//! (with generations) configuring the policy, and `CoverageType` configuring
//! coverages. `ExtendedHomePolicy` is a declared subtype without a runtime
//! struct of its own.

#![allow(dead_code)]

use std::any::Any;
use std::sync::Arc;

use ipsmodel::declaration::{
    AssociationDeclaration, AssociationKind, AttributeDeclaration, ClassId, DeclarationRegistry,
    FormulaDeclaration, Getter, InvokeFailure, MethodDeclaration, Setter, TableUsageDeclaration,
    TypeDeclaration, ValidationRuleDeclaration,
};
use ipsmodel::foundation::{
    Cardinality, Datatype, Decimal, DeprecationMarker, Locale, NaiveDate, Value, ValueSet,
};
use ipsmodel::model::ModelRegistry;
use ipsmodel::runtime::{
    InMemoryBundle, InMemoryRepository, ModelObject, ObjectRef, ProductComponent,
    ProductGeneration, ProductLink, TableInstance, same_object,
};

// =============================================================================
// Runtime Classes
// =============================================================================

#[derive(Debug, Default)]
pub struct HomePolicy {
    pub product: Option<Arc<ProductComponent>>,
    pub effective_from: Option<NaiveDate>,
    pub payment_mode: Value,
    pub area: i64,
    pub coverages: Vec<ObjectRef>,
    pub main_coverage: Option<ObjectRef>,
}

impl ModelObject for HomePolicy {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn product_component(&self) -> Option<Arc<ProductComponent>> {
        self.product.clone()
    }

    fn effective_from(&self) -> Option<NaiveDate> {
        self.effective_from
    }
}

#[derive(Debug, Default)]
pub struct Coverage {
    pub name: String,
}

impl ModelObject for Coverage {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[derive(Debug, Default)]
pub struct HomeProduct {
    pub product_name: String,
    pub max_area: i64,
    pub regions: Vec<String>,
    pub coverage_types: Vec<ProductLink>,
}

#[derive(Debug)]
pub struct HomeProductGen {
    pub default_payment_mode: Value,
    pub payment_modes: ValueSet,
}

impl Default for HomeProductGen {
    fn default() -> Self {
        Self {
            default_payment_mode: Value::from("annual"),
            payment_modes: ValueSet::enumeration([Value::from("annual"), Value::from("monthly")], false),
        }
    }
}

#[derive(Debug, Default)]
pub struct CoverageType {
    pub label: String,
}

pub fn home_policy_class() -> ClassId {
    ClassId::of::<HomePolicy>()
}

pub fn coverage_class() -> ClassId {
    ClassId::of::<Coverage>()
}

pub fn home_product_class() -> ClassId {
    ClassId::of::<HomeProduct>()
}

pub fn home_product_gen_class() -> ClassId {
    ClassId::of::<HomeProductGen>()
}

pub fn coverage_type_class() -> ClassId {
    ClassId::of::<CoverageType>()
}

pub const EXTENDED_HOME_POLICY: ClassId = ClassId::named("ExtendedHomePolicy");

// =============================================================================
// Declarations
// =============================================================================

pub fn payment_modes() -> ValueSet {
    ValueSet::enumeration(
        ["annual", "semiannual", "quarterly", "monthly"].map(Value::from),
        false,
    )
}

pub fn documentation() -> InMemoryBundle {
    let en = Locale::english();
    let de = Locale::german();
    InMemoryBundle::new()
        .with(&en, "HomePolicy_label", "Home policy")
        .with(&de, "HomePolicy_label", "Hausratvertrag")
        .with(&en, "HomePolicy-attribute-area_label", "Living area")
        .with(&de, "HomePolicy-attribute-area_label", "Wohnfläche")
        .with(&en, "HomePolicy-attribute-area_description", "Living area in square meters.")
        .with(&en, "HomePolicy-association-coverage_pluralLabel", "Coverages")
}

fn home_policy() -> TypeDeclaration {
    TypeDeclaration::policy(home_policy_class(), "HomePolicy")
        .configured_by(home_product_class())
        .with_documentation(Arc::new(documentation()))
        .with_extension_property("sortOrder", Value::Integer(1))
        .with_attribute(
            AttributeDeclaration::new("paymentMode", Datatype::String)
                .product_relevant()
                .changing_over_time()
                .with_value_set(payment_modes())
                .with_getter(Getter::typed::<HomePolicy>("getPaymentMode", |policy| {
                    policy.payment_mode.clone()
                }))
                .with_setter(Setter::typed::<HomePolicy>("setPaymentMode", |policy, value| {
                    policy.payment_mode = value;
                    Ok(())
                })),
        )
        .with_attribute(
            AttributeDeclaration::new("area", Datatype::Integer)
                .with_default_value(Value::Integer(0))
                .with_value_set(ValueSet::range(Some(Value::Integer(0)), Some(Value::Integer(1000)), false))
                .with_getter(Getter::typed::<HomePolicy>("getArea", |policy| Value::Integer(policy.area)))
                .with_setter(Setter::typed::<HomePolicy>("setArea", |policy, value: Value| {
                    policy.area = value
                        .as_integer()
                        .ok_or_else(|| InvokeFailure::bad_argument(&value))?;
                    Ok(())
                })),
        )
        .with_attribute(
            AttributeDeclaration::new("currency", Datatype::String)
                .with_kind("constant")
                .with_constant(Value::from("EUR")),
        )
        .with_attribute(
            AttributeDeclaration::new("premium", Datatype::Decimal)
                .with_kind("derived")
                .with_getter(Getter::typed::<HomePolicy>("getPremium", |policy| {
                    Value::decimal(Decimal::from(policy.area) * Decimal::new(15, 1))
                })),
        )
        .with_attribute(
            AttributeDeclaration::new("legacyCode", Datatype::String)
                .deprecated(DeprecationMarker::bare()),
        )
        .with_association(
            AssociationDeclaration::new("coverage", coverage_class())
                .with_plural_name("coverages")
                .with_kind(AssociationKind::Composition)
                .with_cardinality(1, Cardinality::Bounded(5))
                .matching(home_product_class(), "coverageType")
                .with_targets_getter(Getter::typed::<HomePolicy>("getCoverages", |policy| {
                    policy.coverages.clone()
                }))
                .with_target_mutators(
                    Setter::typed::<HomePolicy>("addCoverage", |policy, coverage| {
                        policy.coverages.push(coverage);
                        Ok(())
                    }),
                    Setter::typed::<HomePolicy>("removeCoverage", |policy, coverage: ObjectRef| {
                        policy.coverages.retain(|c| !same_object(c, &coverage));
                        Ok(())
                    }),
                ),
        )
        .with_association(
            AssociationDeclaration::new("mainCoverage", coverage_class())
                .with_kind(AssociationKind::Association)
                .with_cardinality(0, Cardinality::Bounded(1))
                .with_targets_getter(Getter::typed::<HomePolicy>("getMainCoverage", |policy| {
                    policy.main_coverage.iter().cloned().collect()
                }))
                .with_target_setter(Setter::typed::<HomePolicy>("setMainCoverage", |policy, coverage| {
                    policy.main_coverage = coverage;
                    Ok(())
                })),
        )
        .with_validation_rule(
            ValidationRuleDeclaration::new("checkArea", "HomePolicy-AREA")
                .product_relevant()
                .changing_over_time(),
        )
}

fn extended_home_policy() -> TypeDeclaration {
    TypeDeclaration::policy(EXTENDED_HOME_POLICY, "ExtendedHomePolicy")
        .with_super_class(home_policy_class())
        .with_attribute(
            AttributeDeclaration::new("area", Datatype::Integer)
                .with_default_value(Value::Integer(50))
                .with_value_set(ValueSet::range(Some(Value::Integer(10)), Some(Value::Integer(500)), false)),
        )
        .with_attribute(AttributeDeclaration::new("gardenSize", Datatype::Integer))
}

fn coverage() -> TypeDeclaration {
    TypeDeclaration::policy(coverage_class(), "Coverage").configured_by(coverage_type_class())
}

fn home_product() -> TypeDeclaration {
    TypeDeclaration::product(home_product_class(), "HomeProduct")
        .configures(home_policy_class())
        .with_generations(home_product_gen_class())
        .with_attribute(
            AttributeDeclaration::new("productName", Datatype::String)
                .with_getter(Getter::typed::<HomeProduct>("getProductName", |product| {
                    Value::from(product.product_name.as_str())
                }))
                .with_setter(Setter::typed::<HomeProduct>("setProductName", |product, value: Value| {
                    product.product_name = value.as_str().unwrap_or_default().to_string();
                    Ok(())
                })),
        )
        .with_attribute(
            AttributeDeclaration::new("maxArea", Datatype::Integer)
                .with_value_set(ValueSet::range(Some(Value::Integer(0)), Some(Value::Integer(1000)), false))
                .with_getter(Getter::typed::<HomeProduct>("getMaxArea", |product| {
                    Value::Integer(product.max_area)
                })),
        )
        .with_attribute(
            AttributeDeclaration::new("regions", Datatype::String)
                .multi_valued()
                .with_value_set(ValueSet::enumeration(
                    ["north", "south", "east", "west"].map(Value::from),
                    false,
                ))
                .with_getter(Getter::typed::<HomeProduct>("getRegions", |product| {
                    Value::List(product.regions.iter().map(|region| Value::from(region.as_str())).collect())
                })),
        )
        .with_association(
            AssociationDeclaration::new("coverageType", coverage_type_class())
                .with_plural_name("coverageTypes")
                .with_cardinality(0, Cardinality::Unbounded)
                .matching(home_policy_class(), "coverage")
                .with_link_accessors(
                    Getter::typed::<HomeProduct>("getLinksForCoverageTypes", |product| {
                        product.coverage_types.clone()
                    }),
                    Setter::typed::<HomeProduct>("addCoverageType", |product, link| {
                        product.coverage_types.push(link);
                        Ok(())
                    }),
                    Setter::typed::<HomeProduct>("removeCoverageType", |product, target: Arc<str>| {
                        product.coverage_types.retain(|link| link.target != target);
                        Ok(())
                    }),
                ),
        )
        .with_formula(FormulaDeclaration::new("premiumFormula").required().changing_over_time())
        .with_table_usage(TableUsageDeclaration::new("rates", "RateTable").required())
        .with_generation_method(MethodDeclaration::default_value_getter::<HomeProductGen>(
            "getDefaultValuePaymentMode",
            "paymentMode",
            |generation| generation.default_payment_mode.clone(),
        ))
        .with_generation_method(MethodDeclaration::value_set_getter_in_context::<HomeProductGen>(
            "getAllowedValuesForPaymentMode",
            "paymentMode",
            |generation, _context| generation.payment_modes.clone(),
        ))
        .with_generation_method(MethodDeclaration::default_value_setter::<HomeProductGen>(
            "setDefaultValuePaymentMode",
            "paymentMode",
            |generation, value| {
                generation.default_payment_mode = value;
                Ok(())
            },
        ))
        .with_generation_method(MethodDeclaration::value_set_setter::<HomeProductGen>(
            "setAllowedValuesForPaymentMode",
            "paymentMode",
            |generation, value_set| {
                generation.payment_modes = value_set;
                Ok(())
            },
        ))
}

fn coverage_type() -> TypeDeclaration {
    TypeDeclaration::product(coverage_type_class(), "CoverageType").configures(coverage_class())
}

pub fn declarations() -> DeclarationRegistry {
    [home_policy(), extended_home_policy(), coverage(), home_product(), coverage_type()]
        .into_iter()
        .try_fold(DeclarationRegistry::new(), DeclarationRegistry::with)
        .expect("fixture classes are unique")
}

pub fn registry() -> ModelRegistry {
    ModelRegistry::new(declarations())
}

// =============================================================================
// Product Components
// =============================================================================

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn home_generation(valid_from: NaiveDate) -> ProductGeneration {
    let mut generation = ProductGeneration::new(valid_from, HomeProductGen::default());
    generation
        .configuration_mut()
        .set_formula_text("premiumFormula", "area * 1.5");
    generation
}

/// A home product valid from 2024-01-01 with one generation.
pub fn home_product_component(id: &str) -> ProductComponent {
    let valid_from = date(2024, 1, 1);
    let mut component = ProductComponent::new(
        id,
        valid_from,
        HomeProduct {
            product_name: "Home Basic".to_string(),
            max_area: 250,
            regions: vec!["north".to_string(), "south".to_string()],
            coverage_types: Vec::new(),
        },
    )
    .changing_over_time(true)
    .with_generation(home_generation(valid_from));
    component.configuration_mut().set_table_name("rates", "HomeRates2024");
    component
}

pub fn coverage_type_component(id: &str, valid_from: NaiveDate) -> ProductComponent {
    ProductComponent::new(
        id,
        valid_from,
        CoverageType {
            label: id.to_string(),
        },
    )
}

pub fn repository() -> InMemoryRepository {
    let mut repository = InMemoryRepository::new();
    repository.add_table(TableInstance::new("HomeRates2024", "RateTable").with_row(vec![
        Value::from("north"),
        Value::decimal(Decimal::new(12, 1)),
    ]));
    repository
}

pub fn coverage_ref(name: &str) -> ObjectRef {
    Arc::new(Coverage {
        name: name.to_string(),
    })
}
