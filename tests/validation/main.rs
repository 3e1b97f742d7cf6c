//! Integration tests for Layer 3: Validation
//!
//! Tests the findings produced for product components of the home insurance
//! model: attribute configuration, product links, and formulas.

#[path = "../fixture/mod.rs"]
mod fixture;

mod associations;
mod components;

use ipsmodel::runtime::{InvalidObject, Message, MessageList, ProductComponent, ValidationContext};
use ipsmodel::validation::validate_product_component;

use crate::fixture::{date, registry};

/// Validates a component with a fresh registry and returns the findings.
fn validate(component: &ProductComponent, context: &ValidationContext) -> MessageList {
    let registry = registry();
    let mut list = MessageList::new();
    validate_product_component(&mut list, context, &registry, component, None)
        .expect("configuration is readable");
    list
}

fn only_finding(list: &MessageList) -> &Message {
    assert_eq!(list.len(), 1, "{list:?}");
    list.iter().next().expect("one finding")
}

fn generation_of(component: &str) -> InvalidObject {
    InvalidObject::Generation {
        component: component.into(),
        valid_from: date(2024, 1, 1),
    }
}
