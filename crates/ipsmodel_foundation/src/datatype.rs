//! Semantic value types of attributes.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::value::{EnumValue, Value};

/// Datatype descriptor of an attribute.
///
/// Each datatype knows its null object: the value that stands for "no value"
/// without being [`Value::Null`] where the datatype has one.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Datatype {
    /// Nullable boolean.
    Boolean,
    /// Primitive boolean (never null).
    PrimitiveBoolean,
    /// Nullable integer.
    Integer,
    /// Primitive integer (never null).
    PrimitiveInteger,
    /// Decimal with a null object.
    Decimal,
    /// Money with a null object.
    Money,
    /// String; the empty string is the null object.
    String,
    /// Calendar date.
    Date,
    /// Enumeration type.
    Enum(EnumDatatype),
}

/// An enumeration datatype.
///
/// Extensible enumerations keep only the values compiled into the model in
/// `values`; the full set is registered in a runtime repository.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumDatatype {
    /// Qualified name of the enumeration.
    pub name: Arc<str>,
    /// Member identifiers in declaration order.
    pub values: Vec<Arc<str>>,
    /// Whether further values may be registered at runtime.
    pub extensible: bool,
}

impl EnumDatatype {
    /// Creates a closed enumeration with the given member ids.
    #[must_use]
    pub fn new(name: &str, values: &[&str]) -> Self {
        Self {
            name: name.into(),
            values: values.iter().map(|v| Arc::from(*v)).collect(),
            extensible: false,
        }
    }

    /// Creates an extensible enumeration with the given compiled-in member ids.
    #[must_use]
    pub fn extensible(name: &str, values: &[&str]) -> Self {
        Self {
            extensible: true,
            ..Self::new(name, values)
        }
    }

    /// Returns the compiled-in members as values.
    #[must_use]
    pub fn value_list(&self) -> Vec<Value> {
        self.values
            .iter()
            .map(|id| {
                Value::Enum(EnumValue {
                    enum_type: Arc::clone(&self.name),
                    id: Arc::clone(id),
                })
            })
            .collect()
    }
}

impl Datatype {
    /// Creates an enumeration datatype.
    #[must_use]
    pub fn enumeration(enum_type: EnumDatatype) -> Self {
        Self::Enum(enum_type)
    }

    /// Returns true if values of this datatype can never be null.
    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        matches!(self, Self::PrimitiveBoolean | Self::PrimitiveInteger)
    }

    /// Returns true for both boolean datatypes.
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        matches!(self, Self::Boolean | Self::PrimitiveBoolean)
    }

    /// Returns the enumeration descriptor if this is an enumeration datatype.
    #[must_use]
    pub const fn as_enum(&self) -> Option<&EnumDatatype> {
        match self {
            Self::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the null object of this datatype.
    ///
    /// Primitive datatypes have no null object; their zero value is returned.
    #[must_use]
    pub fn null_value(&self) -> Value {
        match self {
            Self::PrimitiveBoolean => Value::Boolean(false),
            Self::PrimitiveInteger => Value::Integer(0),
            Self::Decimal => Value::Decimal(None),
            Self::Money => Value::Money(None),
            Self::String => Value::String("".into()),
            Self::Boolean | Self::Integer | Self::Date | Self::Enum(_) => Value::Null,
        }
    }

    /// Returns true if the value is null or this datatype's null object.
    #[must_use]
    pub fn is_null_value(&self, value: &Value) -> bool {
        value.is_null() || (!self.is_primitive() && *value == self.null_value())
    }

    /// Checks whether a value is an instance of this datatype.
    ///
    /// Null is accepted by every non-primitive datatype; lists are accepted
    /// when every element is.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::List(values)) => values.iter().all(|v| self.accepts(v)),
            (dt, Value::Null) => !dt.is_primitive(),
            (Self::Boolean | Self::PrimitiveBoolean, Value::Boolean(_))
            | (Self::Integer | Self::PrimitiveInteger, Value::Integer(_))
            | (Self::Decimal, Value::Decimal(_) | Value::Integer(_))
            | (Self::Money, Value::Money(_))
            | (Self::String, Value::String(_))
            | (Self::Date, Value::Date(_)) => true,
            (Self::Enum(e), Value::Enum(v)) => {
                e.name == v.enum_type && (e.extensible || e.values.contains(&v.id))
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => write!(f, "Boolean"),
            Self::PrimitiveBoolean => write!(f, "boolean"),
            Self::Integer => write!(f, "Integer"),
            Self::PrimitiveInteger => write!(f, "int"),
            Self::Decimal => write!(f, "Decimal"),
            Self::Money => write!(f, "Money"),
            Self::String => write!(f, "String"),
            Self::Date => write!(f, "LocalDate"),
            Self::Enum(e) => write!(f, "{}", e.name),
        }
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
