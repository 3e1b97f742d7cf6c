//! Integration tests for value resolution
//!
//! Tests reading and writing attribute values on policy objects and product
//! components, per attribute kind.

use std::sync::Arc;

use ipsmodel::declaration::{
    AttributeDeclaration, ClassId, DeclarationRegistry, MethodDeclaration, ParameterKind,
    TypeDeclaration,
};
use ipsmodel::foundation::{Datatype, Decimal, EnumDatatype, ErrorKind, Locale, Value, ValueSet};
use ipsmodel::model::{AttributeKind, ModelRegistry};
use ipsmodel::runtime::{InMemoryRepository, ModelObject, ProductComponent, ValidationContext};

use crate::fixture::{
    Coverage, EXTENDED_HOME_POLICY, HomePolicy, date, home_policy_class, home_product_class,
    home_product_component, registry,
};

// =============================================================================
// Attribute Kinds
// =============================================================================

#[test]
fn kinds_by_name() {
    assert_eq!(AttributeKind::for_name("derived"), Some(AttributeKind::DerivedOnTheFly));
    assert_eq!(AttributeKind::for_name("constant"), Some(AttributeKind::Constant));
    assert_eq!(AttributeKind::for_name("unknown"), None);
}

#[test]
fn constant_is_read_but_never_written() {
    let registry = registry();
    let home = registry.policy_cmpt_type(home_policy_class()).unwrap();
    let currency = home.attribute("currency").unwrap();
    let mut policy = HomePolicy::default();

    assert_eq!(currency.kind(), AttributeKind::Constant);
    assert_eq!(currency.value(&policy).unwrap(), Value::from("EUR"));
    let err = currency.set_value(&mut policy, Value::from("USD")).unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(currency.value(&policy).unwrap(), Value::from("EUR"));
}

#[test]
fn derived_on_the_fly_is_computed() {
    let registry = registry();
    let home = registry.policy_cmpt_type(home_policy_class()).unwrap();
    let premium = home.attribute("premium").unwrap();
    let mut policy = HomePolicy {
        area: 100,
        ..HomePolicy::default()
    };

    assert_eq!(premium.value(&policy).unwrap(), Value::decimal(Decimal::from(150)));
    assert!(premium.set_value(&mut policy, Value::Null).unwrap_err().is_configuration());
}

#[test]
fn changeable_round_trip() {
    let registry = registry();
    let home = registry.policy_cmpt_type(home_policy_class()).unwrap();
    let area = home.attribute("area").unwrap();
    let mut policy = HomePolicy::default();

    area.set_value(&mut policy, Value::Integer(80)).unwrap();
    assert_eq!(policy.area, 80);
    assert_eq!(area.value(&policy).unwrap(), Value::Integer(80));
}

#[test]
fn accessor_failures_are_invocation_errors() {
    let registry = registry();
    let home = registry.policy_cmpt_type(home_policy_class()).unwrap();
    let area = home.attribute("area").unwrap();
    let mut policy = HomePolicy::default();

    let err = area.set_value(&mut policy, Value::from("large")).unwrap_err();
    match err.kind {
        ErrorKind::Invocation { method, arguments, .. } => {
            assert_eq!(method, "setArea");
            assert_eq!(arguments.len(), 1);
        }
        other => panic!("expected invocation error, got {other:?}"),
    }

    let coverage = Coverage::default();
    assert!(area.value(&coverage).unwrap_err().is_invocation());
    assert_eq!(coverage.class_id().simple_name(), "Coverage");
}

// =============================================================================
// Class-Level Configuration
// =============================================================================

#[test]
fn attributes_without_product_use_class_defaults() {
    let registry = registry();
    let home = registry.policy_cmpt_type(home_policy_class()).unwrap();
    let extended = registry.policy_cmpt_type(EXTENDED_HOME_POLICY).unwrap();
    let context = ValidationContext::default();
    let policy = HomePolicy::default();

    let area = home.attribute("area").unwrap();
    assert_eq!(area.default_value(&policy).unwrap(), Value::Integer(0));
    assert_eq!(
        area.value_set(&policy, &context).unwrap(),
        ValueSet::range(Some(Value::Integer(0)), Some(Value::Integer(1000)), false)
    );

    let overriding = extended.attribute("area").unwrap();
    assert_eq!(overriding.default_value(&policy).unwrap(), Value::Integer(50));

    let garden = extended.attribute("gardenSize").unwrap();
    assert!(garden.default_value(&policy).unwrap_err().is_configuration());
    assert_eq!(
        garden.value_set(&policy, &context).unwrap(),
        ValueSet::unrestricted(true)
    );
}

#[test]
fn product_relevant_attribute_needs_a_product() {
    let registry = registry();
    let home = registry.policy_cmpt_type(home_policy_class()).unwrap();
    let payment_mode = home.attribute("paymentMode").unwrap();

    let err = payment_mode.default_value(&HomePolicy::default()).unwrap_err();
    assert!(err.is_configuration());
}

// =============================================================================
// Product Attributes
// =============================================================================

#[test]
fn product_attribute_values() {
    let registry = registry();
    let product_type = registry.product_cmpt_type(home_product_class()).unwrap();
    let mut component = home_product_component("Home 2024");

    let name = product_type.attribute("productName").unwrap();
    assert_eq!(name.value(&component, None).unwrap(), Value::from("Home Basic"));
    name.set_value(&mut component, None, Value::from("Home Plus")).unwrap();
    assert_eq!(name.value(&component, None).unwrap(), Value::from("Home Plus"));

    let regions = product_type.attribute("regions").unwrap();
    assert!(regions.is_multi_valued());
    assert_eq!(
        regions.value(&component, None).unwrap(),
        Value::List(vec![Value::from("north"), Value::from("south")])
    );

    let max_area = product_type.attribute("maxArea").unwrap();
    let err = max_area
        .set_value(&mut component, None, Value::Integer(1))
        .unwrap_err();
    assert!(err.is_configuration());
}

// =============================================================================
// Inferred and Resolved Value Sets
// =============================================================================

const RISK_POLICY: ClassId = ClassId::named("RiskPolicy");

struct RiskProduct {
    max_deductible: i64,
}

fn risk_product_class() -> ClassId {
    ClassId::of::<RiskProduct>()
}

fn risk_registry(product_methods: Vec<MethodDeclaration>) -> ModelRegistry {
    let risk = Datatype::enumeration(EnumDatatype::extensible("Risk", &["low"]));
    let policy = TypeDeclaration::policy(RISK_POLICY, "RiskPolicy")
        .configured_by(risk_product_class())
        .with_attribute(
            AttributeDeclaration::new("insured", Datatype::PrimitiveBoolean).product_relevant(),
        )
        .with_attribute(AttributeDeclaration::new("smoker", Datatype::Boolean).product_relevant())
        .with_attribute(AttributeDeclaration::new("risk", risk).product_relevant())
        .with_attribute(AttributeDeclaration::new("zone", Datatype::Integer).product_relevant())
        .with_attribute(
            AttributeDeclaration::new("deductible", Datatype::Integer).product_relevant(),
        );
    let product = product_methods.into_iter().fold(
        TypeDeclaration::product(risk_product_class(), "RiskProduct").configures(RISK_POLICY),
        TypeDeclaration::with_method,
    );
    let declarations = DeclarationRegistry::new()
        .with(policy)
        .and_then(|d| d.with(product))
        .unwrap();
    ModelRegistry::new(declarations)
}

fn risk_product() -> ProductComponent {
    ProductComponent::new(
        "Risk 2024",
        date(2024, 1, 1),
        RiskProduct {
            max_deductible: 500,
        },
    )
}

fn deductible_range(upper: i64) -> ValueSet {
    ValueSet::range(Some(Value::Integer(0)), Some(Value::Integer(upper)), false)
}

#[test]
fn value_sets_inferred_from_the_datatype() {
    let registry = risk_registry(Vec::new());
    let policy = registry.policy_cmpt_type(RISK_POLICY).unwrap();
    let product = risk_product();
    let context = ValidationContext::default();
    let inferred = |name: &str| {
        policy
            .attribute(name)
            .unwrap()
            .value_set_for(Some(&product), None, &context)
            .unwrap()
    };

    let booleans = [Value::Boolean(true), Value::Boolean(false)];
    assert_eq!(inferred("insured"), ValueSet::enumeration(booleans.clone(), false));
    assert!(!inferred("insured").contains(&Value::Null));
    assert_eq!(inferred("smoker"), ValueSet::enumeration(booleans, true));
    assert_eq!(inferred("zone"), ValueSet::unrestricted(true));
    assert_eq!(
        inferred("risk"),
        ValueSet::enumeration([Value::enumeration("Risk", "low")], true)
    );
}

#[test]
fn extensible_enum_values_come_from_the_repository() {
    let registry = risk_registry(Vec::new());
    let risk = registry
        .policy_cmpt_type(RISK_POLICY)
        .unwrap()
        .attribute("risk")
        .unwrap();
    let mut repository = InMemoryRepository::new();
    repository.add_enum_value("Risk", Value::enumeration("Risk", "high"));
    let context = ValidationContext::default().with_repository(Arc::new(repository));

    let value_set = risk.value_set_for(Some(&risk_product()), None, &context).unwrap();
    assert_eq!(
        value_set,
        ValueSet::enumeration(["low", "high"].map(|id| Value::enumeration("Risk", id)), true)
    );
    assert_eq!(risk.model_value_set(context.repository()), value_set);
}

#[test]
fn resolving_methods_may_take_the_context() {
    let registry = risk_registry(vec![
        MethodDeclaration::value_set_getter_in_context::<RiskProduct>(
            "getAllowedValuesForDeductible",
            "deductible",
            |product, context| {
                if context.locale == Locale::german() {
                    deductible_range(product.max_deductible * 2)
                } else {
                    deductible_range(product.max_deductible)
                }
            },
        ),
        MethodDeclaration::default_value_getter_in_context::<RiskProduct>(
            "getDefaultValueDeductible",
            "deductible",
            |product, _context| Value::Integer(product.max_deductible / 10),
        ),
    ]);
    let deductible = registry
        .policy_cmpt_type(RISK_POLICY)
        .unwrap()
        .attribute("deductible")
        .unwrap();
    let product = risk_product();

    let english = deductible
        .value_set_for(Some(&product), None, &ValidationContext::default())
        .unwrap();
    let german = deductible
        .value_set_for(Some(&product), None, &ValidationContext::new(Locale::german()))
        .unwrap();
    assert_eq!(english, deductible_range(500));
    assert_eq!(german, deductible_range(1000));
    assert_eq!(deductible.default_value_for(Some(&product), None).unwrap(), Value::Integer(50));
}

#[test]
fn resolving_methods_with_more_parameters_are_rejected() {
    let two_contexts = vec![ParameterKind::ValidationContext, ParameterKind::ValidationContext];
    let registry = risk_registry(vec![
        MethodDeclaration::value_set_getter::<RiskProduct>("getAllowedValuesForZone", "zone", |_| {
            ValueSet::unrestricted(false)
        })
        .with_parameters(two_contexts.clone()),
        MethodDeclaration::default_value_getter::<RiskProduct>("getDefaultValueZone", "zone", |_| {
            Value::Integer(1)
        })
        .with_parameters(two_contexts),
    ]);
    let zone = registry
        .policy_cmpt_type(RISK_POLICY)
        .unwrap()
        .attribute("zone")
        .unwrap();
    let product = risk_product();

    let err = zone
        .value_set_for(Some(&product), None, &ValidationContext::default())
        .unwrap_err();
    assert!(err.is_configuration(), "{err}");
    let err = zone.default_value_for(Some(&product), None).unwrap_err();
    assert!(err.is_configuration(), "{err}");
}
