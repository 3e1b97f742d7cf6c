//! Runtime collaborators for ipsmodel.
//!
//! This crate provides the objects the meta-model reads and writes:
//! - [`ModelObject`] - Policy-side domain objects
//! - [`ProductComponent`] / [`ProductGeneration`] - Product-side envelopes
//! - [`RuntimeRepository`] - Lookup of components, enum values, and tables
//! - [`MessageList`] - Validation findings
//! - [`MessageBundle`] - Localized message templates
//! - [`ValidationContext`] - Locale and collaborators for a validation run

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bundle;
pub mod class;
pub mod context;
pub mod message;
pub mod object;
pub mod product;
pub mod repository;

pub use bundle::{InMemoryBundle, MessageBundle, format_template};
pub use class::ClassId;
pub use context::ValidationContext;
pub use message::{InvalidObject, Message, MessageList, ObjectProperty, Severity};
pub use object::{ModelObject, ObjectRef, same_object};
pub use product::{
    ProductComponent, ProductConfiguration, ProductGeneration, ProductLink, ProductObject,
    ProductObjectMut,
};
pub use repository::{InMemoryRepository, RuntimeRepository, TableInstance};
