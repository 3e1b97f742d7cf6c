//! Whole-component validation: clean products, formulas, localized texts,
//! and configuration errors.

use std::sync::Arc;

use ipsmodel::foundation::Locale;
use ipsmodel::runtime::{
    InMemoryBundle, MessageList, ObjectProperty, ProductComponent, Severity, ValidationContext,
};
use ipsmodel::validation::{codes, message_text, validate_product_component};

use crate::fixture::{date, home_product_class, home_product_component, registry, repository};
use crate::{generation_of, only_finding, validate};

fn without_formula() -> ProductComponent {
    let registry = registry();
    let formula = registry
        .product_cmpt_type(home_product_class())
        .unwrap()
        .formula("premiumFormula")
        .unwrap();
    let mut component = home_product_component("Home 2024");
    formula.set_formula_text(&mut component, None, "").unwrap();
    component
}

#[test]
fn clean_product_has_no_findings() {
    let mut repository = repository();
    let component = repository.add_component(home_product_component("Home 2024"));
    let context = ValidationContext::default().with_repository(Arc::new(repository));

    let list = validate(&component, &context);
    assert!(list.is_empty(), "{list:?}");
    assert_eq!(list.severity(), None);
}

#[test]
fn missing_formula() {
    let component = without_formula();
    let list = validate(&component, &ValidationContext::default());

    let message = only_finding(&list);
    assert_eq!(message.code, codes::FORMULA_MISSING);
    assert_eq!(message.severity, Severity::Error);
    assert_eq!(message.text, "The formula premiumFormula is required but empty.");
    assert_eq!(
        message.invalid_properties,
        vec![ObjectProperty::new(generation_of("Home 2024"), "premiumFormula")]
    );
    assert!(list.contains_errors());
}

#[test]
fn texts_follow_the_context_locale() {
    let component = without_formula();
    let list = validate(&component, &ValidationContext::new(Locale::german()));
    assert_eq!(
        only_finding(&list).text,
        "Die Formel premiumFormula ist erforderlich, aber leer."
    );

    let custom = InMemoryBundle::new().with(
        &Locale::english(),
        codes::FORMULA_MISSING,
        "Formula {0} missing",
    );
    let context = ValidationContext::default().with_messages(Arc::new(custom));
    assert_eq!(
        only_finding(&validate(&component, &context)).text,
        "Formula premiumFormula missing"
    );
}

#[test]
fn every_code_has_an_english_text() {
    let context = ValidationContext::default();
    for code in codes::ALL {
        assert_ne!(message_text(&context, code, &[]), code);
    }
}

#[test]
fn unreadable_configuration_is_an_error() {
    let registry = registry();
    let component = home_product_component("Home 2024");
    let mut list = MessageList::new();

    let err = validate_product_component(
        &mut list,
        &ValidationContext::default(),
        &registry,
        &component,
        Some(date(2023, 6, 1)),
    )
    .unwrap_err();
    assert!(err.is_invocation());
}
