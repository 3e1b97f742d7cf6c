//! Validation of product components against the meta-model.
//!
//! Every check appends findings to a caller-supplied
//! [`MessageList`](ipsmodel_runtime::MessageList); findings never stop a
//! validation run. Errors are returned only when the model or the product
//! configuration cannot be read.
//!
//! This crate provides:
//! - [`validate_product_component`] - All checks for one product component
//! - [`validate_policy_attribute`], [`validate_product_attribute`] - Attribute checks
//! - [`validate_product_association`] - Link count, link cardinality, and validity checks
//! - [`validate_formula`] - Required formula check
//! - [`codes`] - Stable message codes and invalid property names
//! - [`message_text`] - Localized message texts

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod association;
pub mod attribute;
pub mod codes;
pub mod component;
pub mod formula;
pub mod messages;

pub use association::{possible_max, possible_min, validate_product_association};
pub use attribute::{is_default_value_valid, validate_policy_attribute, validate_product_attribute};
pub use component::validate_product_component;
pub use formula::validate_formula;
pub use messages::message_text;
