//! Declarations of policy and product component types.
//!
//! A declaration is everything the meta-model knows about a runtime class
//! before it builds a type from it: names, parts in declaration order,
//! supertype, configuration pairing, and the typed accessors and
//! configuration methods that read and write instances of the class.
//!
//! This crate provides:
//! - [`TypeDeclaration`] - A declared policy or product component type
//! - [`AttributeDeclaration`], [`AssociationDeclaration`], and the other part declarations
//! - [`Getter`] / [`Setter`] - Typed accessors bound to a runtime class
//! - [`MethodDeclaration`] - Configuration methods for default values and value sets
//! - [`DeclarationProvider`] - Source of declarations by class

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod accessor;
pub mod method;
pub mod part;
pub mod provider;
pub mod type_decl;

pub use accessor::{
    Getter, InvokeFailure, LinkAdder, LinkRemover, LinksGetter, Setter, TargetAdder,
    TargetRemover, TargetSetter, TargetsGetter, ValueGetter, ValueSetter,
};
pub use ipsmodel_runtime::ClassId;
pub use method::{ConfigMethodRole, MethodBody, MethodDeclaration, ParameterKind};
pub use part::{
    AssociationDeclaration, AssociationKind, AttributeDeclaration, ExtensionProperties,
    FormulaDeclaration, MatchingAssociationRef, TableUsageDeclaration, ValidationRuleDeclaration,
};
pub use provider::{DeclarationProvider, DeclarationRegistry};
pub use type_decl::{TypeDeclaration, TypeKindDeclaration};
