//! Integration tests for product configuration
//!
//! Tests how policy-side parts read and write their configuration on product
//! components and generations.

use std::sync::Arc;

use ipsmodel::foundation::{NaiveDate, Value, ValueSet};
use ipsmodel::model::{ModelConfig, ModelRegistry, relevant_product_object};
use ipsmodel::runtime::{
    InMemoryRepository, ProductComponent, ProductGeneration, ProductObject, ValidationContext,
};

use crate::fixture::{
    HomePolicy, date, declarations, home_generation, home_policy_class, home_product_class,
    home_product_component, registry, repository,
};

fn read_only_component(id: &str) -> ProductComponent {
    let mut repository = InMemoryRepository::read_only();
    let shared = repository.add_component(home_product_component(id));
    drop(repository);
    Arc::into_inner(shared).expect("repository dropped")
}

fn generation_date(object: ProductObject<'_>) -> Option<NaiveDate> {
    object.generation().map(ProductGeneration::valid_from)
}

// =============================================================================
// Relevant Product Object
// =============================================================================

#[test]
fn generation_chosen_by_date() {
    let component =
        home_product_component("Home 2024").with_generation(home_generation(date(2025, 1, 1)));
    let config = ModelConfig::default();

    let object = relevant_product_object(&component, Some(date(2024, 6, 1)), true, &config).unwrap();
    assert_eq!(generation_date(object), Some(date(2024, 1, 1)));

    let object = relevant_product_object(&component, Some(date(2025, 1, 1)), true, &config).unwrap();
    assert_eq!(generation_date(object), Some(date(2025, 1, 1)));

    let object = relevant_product_object(&component, None, true, &config).unwrap();
    assert_eq!(generation_date(object), Some(date(2025, 1, 1)));

    let object = relevant_product_object(&component, Some(date(2024, 6, 1)), false, &config).unwrap();
    assert!(matches!(object, ProductObject::Component(c) if c.id() == "Home 2024"));
}

#[test]
fn date_before_first_generation() {
    let component = home_product_component("Home 2024");
    let before = Some(date(2023, 6, 1));

    let err = relevant_product_object(&component, before, true, &ModelConfig::default()).unwrap_err();
    assert!(err.is_invocation());

    let lenient = ModelConfig::default().with_strict_generations(false);
    let object = relevant_product_object(&component, before, true, &lenient).unwrap();
    assert_eq!(generation_date(object), Some(date(2024, 1, 1)));
}

#[test]
fn lenient_registry_applies_to_parts() {
    let strict = registry();
    let lenient = ModelRegistry::with_config(
        declarations(),
        ModelConfig::default().with_strict_generations(false),
    );
    let component = home_product_component("Home 2024");
    let before = Some(date(2023, 6, 1));

    let formula = |registry: &ModelRegistry| {
        registry
            .product_cmpt_type(home_product_class())
            .unwrap()
            .formula("premiumFormula")
            .unwrap()
    };

    let err = formula(&strict).formula_text(&component, before).unwrap_err();
    assert!(err.is_invocation());
    assert_eq!(
        formula(&lenient).formula_text(&component, before).unwrap().as_deref(),
        Some("area * 1.5")
    );
}

// =============================================================================
// Policy Attribute Configuration
// =============================================================================

#[test]
fn defaults_and_value_sets_come_from_the_product() {
    let registry = registry();
    let home = registry.policy_cmpt_type(home_policy_class()).unwrap();
    let payment_mode = home.attribute("paymentMode").unwrap();
    let policy = HomePolicy {
        product: Some(Arc::new(home_product_component("Home 2024"))),
        effective_from: Some(date(2024, 3, 1)),
        ..HomePolicy::default()
    };

    assert_eq!(payment_mode.default_value(&policy).unwrap(), Value::from("annual"));
    assert_eq!(
        payment_mode.value_set(&policy, &ValidationContext::default()).unwrap(),
        ValueSet::enumeration([Value::from("annual"), Value::from("monthly")], false)
    );
}

#[test]
fn configuration_is_written_to_the_generation() {
    let registry = registry();
    let home = registry.policy_cmpt_type(home_policy_class()).unwrap();
    let payment_mode = home.attribute("paymentMode").unwrap();
    let mut component = home_product_component("Home 2024");
    let quarterly = ValueSet::enumeration([Value::from("quarterly")], false);

    payment_mode
        .set_default_value(&mut component, None, Value::from("quarterly"))
        .unwrap();
    payment_mode
        .set_value_set(&mut component, None, quarterly.clone())
        .unwrap();

    let context = ValidationContext::default();
    assert_eq!(
        payment_mode.default_value_for(Some(&component), None).unwrap(),
        Value::from("quarterly")
    );
    assert_eq!(payment_mode.value_set_for(Some(&component), None, &context).unwrap(), quarterly);
}

#[test]
fn read_only_components_reject_changes() {
    let registry = registry();
    let home = registry.policy_cmpt_type(home_policy_class()).unwrap();
    let product_type = registry.product_cmpt_type(home_product_class()).unwrap();
    let mut component = read_only_component("Home 2024");
    assert!(!component.is_modifiable());

    let err = home
        .attribute("paymentMode")
        .unwrap()
        .set_default_value(&mut component, None, Value::from("monthly"))
        .unwrap_err();
    assert!(err.is_illegal_modification());

    let err = product_type
        .formula("premiumFormula")
        .unwrap()
        .set_formula_text(&mut component, None, "0")
        .unwrap_err();
    assert!(err.is_illegal_modification());
}

#[test]
fn attribute_without_configuration_methods() {
    let registry = registry();
    let home = registry.policy_cmpt_type(home_policy_class()).unwrap();
    let area = home.attribute("area").unwrap();
    let mut component = home_product_component("Home 2024");

    let err = area
        .set_default_value(&mut component, None, Value::Integer(10))
        .unwrap_err();
    assert!(err.is_configuration());
}

// =============================================================================
// Rules, Tables, and Formulas
// =============================================================================

#[test]
fn rule_activation() {
    let registry = registry();
    let home = registry.policy_cmpt_type(home_policy_class()).unwrap();
    let rule = home.validation_rule("checkArea").unwrap();
    let mut component = home_product_component("Home 2024");

    assert_eq!(rule.message_code(), "HomePolicy-AREA");
    assert!(rule.is_activated(None, None).unwrap());
    assert!(rule.is_activated(Some(&component), None).unwrap());

    rule.set_activated(&mut component, None, false).unwrap();
    assert!(!rule.is_activated(Some(&component), None).unwrap());
    assert!(rule.is_activated(None, None).unwrap());
}

#[test]
fn table_usage() {
    let registry = registry();
    let product_type = registry.product_cmpt_type(home_product_class()).unwrap();
    let usage = product_type.table_usage("rates").unwrap();
    let repository = repository();
    let mut component = home_product_component("Home 2024");

    assert_eq!(usage.table_structure(), "RateTable");
    assert!(usage.is_required());
    assert_eq!(usage.table_name(&component, None).unwrap().as_deref(), Some("HomeRates2024"));
    let table = usage.table(&repository, &component, None).unwrap().expect("table registered");
    assert_eq!(table.structure, "RateTable");
    assert_eq!(table.rows.len(), 1);

    usage.set_table_name(&mut component, None, "HomeRates2025").unwrap();
    assert_eq!(usage.table_name(&component, None).unwrap().as_deref(), Some("HomeRates2025"));
    assert!(usage.table(&repository, &component, None).unwrap().is_none());
}

#[test]
fn formula_text() {
    let registry = registry();
    let product_type = registry.product_cmpt_type(home_product_class()).unwrap();
    let formula = product_type.formula("premiumFormula").unwrap();
    let mut component = home_product_component("Home 2024");

    assert!(formula.is_required());
    assert_eq!(formula.formula_text(&component, None).unwrap().as_deref(), Some("area * 1.5"));
    assert!(!formula.is_empty(&component, None).unwrap());

    formula.set_formula_text(&mut component, None, "   ").unwrap();
    assert!(formula.is_empty(&component, None).unwrap());
}
