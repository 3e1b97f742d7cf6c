//! The runtime meta-model of policy and product component types.
//!
//! This crate provides:
//! - [`ModelRegistry`] - Builds and memoizes one [`Type`] per declared class
//! - [`Type`], [`PolicyCmptType`], [`ProductCmptType`] - The type graph
//! - [`Attribute`], [`Association`], [`ValidationRule`], [`TableUsage`], [`Formula`] - Parts of a type
//! - [`TypeHierarchyVisitor`] - Bottom-up walks over a type and its supertypes
//! - [`relevant_product_object`] - Choice between a product component and its generations
//! - [`ModelElement`] - Names, documentation, deprecation, and extension properties

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod association;
pub mod attribute;
pub mod config;
pub mod configuration;
pub mod element;
pub mod formula;
pub mod hierarchy;
mod part;
pub mod registry;
pub mod rule;
pub mod table_usage;
pub mod types;

pub use association::{Association, PolicyAssociation, ProductAssociation};
pub use attribute::{Attribute, AttributeKind, PolicyAttribute, ProductAttribute};
pub use config::ModelConfig;
pub use configuration::{relevant_product_object, relevant_product_object_mut};
pub use element::{DocumentationKind, INHERIT_DESCRIPTION_TAG, ModelElement};
pub use formula::Formula;
pub use hierarchy::TypeHierarchyVisitor;
pub use registry::ModelRegistry;
pub use rule::ValidationRule;
pub use table_usage::TableUsage;
pub use types::{PolicyCmptType, ProductCmptType, Type};
