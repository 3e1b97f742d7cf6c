//! ipsmodel - Runtime meta-model for policy and product component types
//!
//! This crate re-exports all layers of the ipsmodel system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: ipsmodel_validation  — Validation of product components
//! Layer 2: ipsmodel_model       — Type registry, hierarchy resolution, configuration
//! Layer 1: ipsmodel_declaration — Declarations of types, parts, and accessors
//!          ipsmodel_runtime     — Model objects, product components, repositories, messages
//! Layer 0: ipsmodel_foundation  — Core types (Value, ValueSet, Cardinality, Error)
//! ```

pub use ipsmodel_declaration as declaration;
pub use ipsmodel_foundation as foundation;
pub use ipsmodel_model as model;
pub use ipsmodel_runtime as runtime;
pub use ipsmodel_validation as validation;
