//! Integration tests for the type hierarchy resolver
//!
//! Tests declared vs. inherited lookup, override resolution, the registry,
//! and documentation of model elements.

use ipsmodel::declaration::{AttributeDeclaration, ClassId, DeclarationRegistry, TypeDeclaration};
use ipsmodel::foundation::{Datatype, ErrorKind, Locale, Value};
use ipsmodel::model::{DocumentationKind, ModelElement, ModelRegistry};
use ipsmodel::runtime::ProductComponent;
use proptest::prelude::*;

use crate::fixture::{
    EXTENDED_HOME_POLICY, HomePolicy, HomeProduct, date, home_policy_class, home_product_class,
    registry,
};

// =============================================================================
// Declared vs. Inherited
// =============================================================================

#[test]
fn declared_attribute_is_the_hierarchy_attribute() {
    let registry = registry();
    let extended = registry.type_of(EXTENDED_HOME_POLICY).unwrap();

    assert_eq!(
        extended.attribute("area").unwrap(),
        extended.declared_attribute("area").unwrap()
    );
    assert!(extended.attribute("area").unwrap().is_overriding());
}

#[test]
fn inherited_attribute_is_the_supertype_attribute() {
    let registry = registry();
    let extended = registry.type_of(EXTENDED_HOME_POLICY).unwrap();
    let home = registry.type_of(home_policy_class()).unwrap();

    let payment_mode = extended.attribute("paymentMode").unwrap();
    assert_eq!(payment_mode, home.attribute("paymentMode").unwrap());
    assert_eq!(payment_mode.owning_type().unwrap(), home);
    assert!(extended.declared_attribute("paymentMode").unwrap_err().is_not_found());
}

#[test]
fn names_are_matched_on_the_first_character_only() {
    let registry = registry();
    let home = registry.type_of(home_policy_class()).unwrap();

    assert!(home.is_attribute_present("PaymentMode"));
    assert!(!home.is_attribute_present("PAYMENTMODE"));
    assert_eq!(home.association("Coverages").unwrap(), home.association("coverage").unwrap());
}

#[test]
fn collections_hold_the_most_derived_part_once() {
    let registry = registry();
    let extended = registry.type_of(EXTENDED_HOME_POLICY).unwrap();

    let attributes = extended.attributes();
    let areas: Vec<_> = attributes.iter().filter(|a| a.name() == "area").collect();
    assert_eq!(areas.len(), 1);
    assert_eq!(areas[0].owning_type().unwrap(), extended);

    let names: Vec<&str> = attributes.iter().map(ModelElement::name).collect();
    assert_eq!(
        names,
        ["area", "gardenSize", "paymentMode", "currency", "premium", "legacyCode"]
    );
}

#[test]
fn lookup_failures() {
    let registry = registry();
    let home = registry.type_of(home_policy_class()).unwrap();

    let err = home.attribute("missing").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NotFound { .. }));
    let err = home.declared_association_at(7).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::IndexOutOfBounds { index: 7, length: 2 }));
    assert!(home.formula("premiumFormula").unwrap_err().is_not_found());
}

#[test]
fn super_parts_walk_one_level() {
    let registry = registry();
    let extended = registry.type_of(EXTENDED_HOME_POLICY).unwrap();
    let home = registry.type_of(home_policy_class()).unwrap();

    let area = extended.attribute("area").unwrap();
    assert_eq!(area.super_attribute().unwrap(), home.attribute("area").unwrap());
    assert!(home.attribute("area").unwrap().super_attribute().is_none());
    assert!(!extended.attribute("gardenSize").unwrap().is_overriding());
}

#[test]
fn super_parts_skip_nothing_between_levels() {
    let base = ClassId::named("Base");
    let middle = ClassId::named("Middle");
    let leaf = ClassId::named("Leaf");
    let declarations = DeclarationRegistry::new()
        .with(
            TypeDeclaration::policy(base, "Base")
                .with_attribute(AttributeDeclaration::new("x", Datatype::Integer)),
        )
        .and_then(|d| d.with(TypeDeclaration::policy(middle, "Middle").with_super_class(base)))
        .and_then(|d| {
            d.with(
                TypeDeclaration::policy(leaf, "Leaf")
                    .with_super_class(middle)
                    .with_attribute(AttributeDeclaration::new("x", Datatype::Integer)),
            )
        })
        .unwrap();
    let registry = ModelRegistry::new(declarations);
    let leaf = registry.type_of(leaf).unwrap();
    let middle = registry.type_of(middle).unwrap();

    let x = leaf.declared_attribute("x").unwrap();
    assert!(x.super_attribute().is_none());
    assert!(!x.is_overriding());
    assert_eq!(middle.attribute("x").unwrap().owning_type().unwrap().name(), "Base");
}

const LEVELS: [ClassId; 6] = [
    ClassId::named("Level0"),
    ClassId::named("Level1"),
    ClassId::named("Level2"),
    ClassId::named("Level3"),
    ClassId::named("Level4"),
    ClassId::named("Level5"),
];

const NAMES: [&str; 4] = ["alpha", "beta", "gamma", "delta"];

proptest! {
    #[test]
    fn most_derived_declaration_wins(declared in prop::collection::vec(prop::collection::vec(any::<bool>(), 4), 1..=6)) {
        let mut declarations = DeclarationRegistry::new();
        for (level, flags) in declared.iter().enumerate() {
            let mut declaration = TypeDeclaration::policy(LEVELS[level], LEVELS[level].name());
            if level > 0 {
                declaration = declaration.with_super_class(LEVELS[level - 1]);
            }
            for (name, _) in NAMES.iter().zip(flags).filter(|(_, declared)| **declared) {
                declaration = declaration.with_attribute(AttributeDeclaration::new(name, Datatype::Integer));
            }
            declarations.register(declaration).unwrap();
        }
        let registry = ModelRegistry::new(declarations);
        let leaf = registry.type_of(LEVELS[declared.len() - 1]).unwrap();

        for (index, name) in NAMES.iter().enumerate() {
            let owner = declared.iter().rposition(|flags| flags[index]);
            match owner {
                Some(level) => {
                    let attribute = leaf.attribute(name).unwrap();
                    prop_assert_eq!(attribute.owning_type().unwrap().class_id(), LEVELS[level]);
                    let owning = registry.type_of(LEVELS[level]).unwrap();
                    prop_assert_eq!(attribute, owning.declared_attribute(name).unwrap());
                }
                None => prop_assert!(leaf.attribute(name).unwrap_err().is_not_found()),
            }
        }

        let attributes = leaf.attributes();
        let expected = NAMES
            .iter()
            .enumerate()
            .filter(|(index, _)| declared.iter().any(|flags| flags[*index]))
            .count();
        prop_assert_eq!(attributes.len(), expected);
    }
}

// =============================================================================
// Registry
// =============================================================================

#[test]
fn types_are_memoized() {
    let registry = registry();
    let first = registry.type_of(EXTENDED_HOME_POLICY).unwrap();
    let count = registry.type_count();
    let second = registry.type_of(EXTENDED_HOME_POLICY).unwrap();

    assert_eq!(first, second);
    assert_eq!(registry.type_count(), count);
    assert_eq!(first.super_type().unwrap(), &registry.type_of(home_policy_class()).unwrap());
}

#[test]
fn types_of_instances() {
    let registry = registry();
    let policy = HomePolicy::default();
    let product = ProductComponent::new("Home", date(2024, 1, 1), HomeProduct::default());

    let policy_type = registry.policy_cmpt_type_of(&policy).unwrap();
    let product_type = registry.product_cmpt_type_of(&product).unwrap();

    assert_eq!(policy_type.name(), "HomePolicy");
    assert_eq!(product_type.name(), "HomeProduct");
    assert!(product_type.is_changing_over_time());
    assert_eq!(policy_type.product_cmpt_type().unwrap(), product_type);
    assert_eq!(product_type.policy_cmpt_type().unwrap(), policy_type);
    assert!(registry.is_policy_cmpt_type(home_policy_class()));
    assert!(!registry.is_product_cmpt_type(home_policy_class()));
    assert!(registry.product_cmpt_type(home_policy_class()).unwrap_err().is_configuration());
}

#[test]
fn subtypes_inherit_the_configuring_product() {
    let registry = registry();
    let extended = registry.policy_cmpt_type(EXTENDED_HOME_POLICY).unwrap();

    assert!(extended.is_configured_by_product());
    assert_eq!(extended.configured_by(), Some(home_product_class()));
}

#[test]
fn unknown_classes_are_not_found() {
    let registry = registry();
    let err = registry.type_of(ClassId::named("Unknown")).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn global_registry_is_installed_once() {
    ModelRegistry::install(registry()).unwrap();
    assert!(ModelRegistry::global().is_some());
    assert!(ModelRegistry::install(registry()).unwrap_err().is_configuration());
}

// =============================================================================
// Documentation and Metadata
// =============================================================================

#[test]
fn labels_by_locale() {
    let registry = registry();
    let home = registry.type_of(home_policy_class()).unwrap();

    assert_eq!(home.label(&Locale::german()), "Hausratvertrag");
    assert_eq!(home.label(&Locale::new("fr")), "Home policy");
    assert_eq!(home.label(&Locale::new("de-CH")), "Hausratvertrag");
}

#[test]
fn part_documentation_falls_back() {
    let registry = registry();
    let home = registry.type_of(home_policy_class()).unwrap();
    let extended = registry.type_of(EXTENDED_HOME_POLICY).unwrap();
    let german = Locale::german();

    let area = home.attribute("area").unwrap();
    assert_eq!(area.label(&german), "Wohnfläche");
    assert_eq!(area.description(&german), "Living area in square meters.");

    let overriding = extended.attribute("area").unwrap();
    assert_eq!(overriding.label(&german), "Wohnfläche");

    let garden = extended.attribute("gardenSize").unwrap();
    assert_eq!(garden.label(&german), "gardenSize");
    assert_eq!(garden.description(&german), "");
    assert_eq!(
        home.association("coverage").unwrap().documentation(DocumentationKind::PluralLabel, &german),
        Some("Coverages".to_string())
    );
}

#[test]
fn deprecation_and_extension_properties() {
    let registry = registry();
    let home = registry.type_of(home_policy_class()).unwrap();

    let legacy = home.attribute("legacyCode").unwrap();
    let deprecation = legacy.deprecation().unwrap();
    assert_eq!(deprecation.since_version(), None);
    assert!(!deprecation.is_marked_for_removal());
    assert!(home.attribute("area").unwrap().deprecation().is_none());

    assert_eq!(home.extension_property_ids(), ["sortOrder"]);
    assert_eq!(home.extension_property_value("sortOrder"), Some(&Value::Integer(1)));
    assert_eq!(home.extension_property_value("missing"), None);
}
