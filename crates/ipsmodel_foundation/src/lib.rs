//! Values, datatypes, value sets, cardinalities, and errors for ipsmodel.
//!
//! This crate provides:
//! - [`Value`] - The runtime value of an attribute
//! - [`Datatype`] - Semantic value types with their null-object sentinels
//! - [`ValueSet`] - Allowed-value descriptions (enumerations, ranges, lengths)
//! - [`Cardinality`] - Bounds that may be unbounded
//! - [`Deprecation`] - Deprecation metadata for model elements
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cardinality;
pub mod datatype;
pub mod deprecation;
pub mod error;
pub mod locale;
pub mod naming;
pub mod value;
pub mod value_set;

pub use cardinality::{Cardinality, CardinalityRange};
pub use datatype::{Datatype, EnumDatatype};
pub use deprecation::{Deprecation, DeprecationMarker};
pub use error::{Error, ErrorContext, ErrorKind, Lookup, PartKind};
pub use locale::Locale;
pub use naming::normalize_name;
pub use value::{EnumValue, Money, Value};
pub use value_set::{OrderedValueSet, RangeValueSet, ValueSet, ValueSetKind};

/// Result type for ipsmodel operations.
pub type Result<T> = std::result::Result<T, Error>;

pub use rust_decimal::Decimal;
pub use chrono::NaiveDate;
