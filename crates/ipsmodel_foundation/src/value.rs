//! Runtime values of attributes.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The value of an attribute, a default value, or a value-set member.
///
/// Values are immutable and cheaply cloneable for scalar variants.
/// `Decimal(None)` and `Money(None)` are the typed null objects of their
/// datatypes; they are distinct from [`Value::Null`] but both count as
/// null-like.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// Absence of a value.
    #[default]
    Null,
    /// Boolean value.
    Boolean(bool),
    /// 64-bit signed integer.
    Integer(i64),
    /// Decimal number; `None` is the decimal null object.
    Decimal(Option<Decimal>),
    /// Amount of money; `None` is the money null object.
    Money(Option<Money>),
    /// String value.
    String(Arc<str>),
    /// Calendar date without time zone.
    Date(NaiveDate),
    /// Member of an enumeration type.
    Enum(EnumValue),
    /// Values of a multi-valued attribute.
    List(Vec<Value>),
}

/// An amount in a currency.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Money {
    /// The amount.
    pub amount: Decimal,
    /// ISO currency code.
    pub currency: Arc<str>,
}

impl Money {
    /// Creates a money value.
    #[must_use]
    pub fn new(amount: Decimal, currency: &str) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }
}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.currency == other.currency {
            self.amount.partial_cmp(&other.amount)
        } else {
            None
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

/// A member of an enumeration type, identified by the type name and the member id.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumValue {
    /// Qualified name of the enumeration type.
    pub enum_type: Arc<str>,
    /// Identifier of the member within its type.
    pub id: Arc<str>,
}

impl EnumValue {
    /// Creates an enumeration value.
    #[must_use]
    pub fn new(enum_type: &str, id: &str) -> Self {
        Self {
            enum_type: enum_type.into(),
            id: id.into(),
        }
    }
}

impl Value {
    /// Creates a decimal value.
    #[must_use]
    pub const fn decimal(value: Decimal) -> Self {
        Self::Decimal(Some(value))
    }

    /// Creates a money value.
    #[must_use]
    pub fn money(amount: Decimal, currency: &str) -> Self {
        Self::Money(Some(Money::new(amount, currency)))
    }

    /// Creates an enumeration value.
    #[must_use]
    pub fn enumeration(enum_type: &str, id: &str) -> Self {
        Self::Enum(EnumValue::new(enum_type, id))
    }

    /// Returns true if this is [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true if this value is null or a datatype's null object.
    ///
    /// Null-like values are the empty string and the decimal and money
    /// null objects, in addition to [`Value::Null`].
    #[must_use]
    pub fn is_null_like(&self) -> bool {
        match self {
            Self::Null | Self::Decimal(None) | Self::Money(None) => true,
            Self::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Attempts to extract a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to extract an integer value.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a non-null decimal (integers convert).
    #[must_use]
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(d) => *d,
            Self::Integer(n) => Some(Decimal::from(*n)),
            _ => None,
        }
    }

    /// Attempts to extract a non-null money value.
    #[must_use]
    pub const fn as_money(&self) -> Option<&Money> {
        match self {
            Self::Money(Some(m)) => Some(m),
            _ => None,
        }
    }

    /// Attempts to extract a string reference.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract a date.
    #[must_use]
    pub const fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Attempts to extract an enumeration value.
    #[must_use]
    pub const fn as_enum(&self) -> Option<&EnumValue> {
        match self {
            Self::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// Attempts to extract the values of a multi-valued attribute.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(values) => Some(values),
            _ => None,
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Null, Self::Null) => Some(Ordering::Equal),
            (Self::Boolean(a), Self::Boolean(b)) => a.partial_cmp(b),
            (Self::Integer(a), Self::Integer(b)) => a.partial_cmp(b),
            (Self::Decimal(Some(a)), Self::Decimal(Some(b))) => a.partial_cmp(b),
            (Self::Integer(a), Self::Decimal(Some(b))) => Decimal::from(*a).partial_cmp(b),
            (Self::Decimal(Some(a)), Self::Integer(b)) => a.partial_cmp(&Decimal::from(*b)),
            (Self::Money(Some(a)), Self::Money(Some(b))) => a.partial_cmp(b),
            (Self::String(a), Self::String(b)) => a.partial_cmp(b),
            (Self::Date(a), Self::Date(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Decimal(None) => write!(f, "Decimal.NULL"),
            Self::Decimal(Some(d)) => write!(f, "{d}"),
            Self::Money(None) => write!(f, "Money.NULL"),
            Self::Money(Some(m)) => write!(f, "{m}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Date(d) => write!(f, "{d}"),
            Self::Enum(e) => write!(f, "{}:{}", e.enum_type, e.id),
            Self::List(values) => f.debug_list().entries(values).finish(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null | Self::Decimal(None) | Self::Money(None) => write!(f, ""),
            Self::String(s) => write!(f, "{s}"),
            Self::Enum(e) => write!(f, "{}", e.id),
            Self::List(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                Ok(())
            }
            other => fmt::Debug::fmt(other, f),
        }
    }
}

// Convenience From implementations

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Self::Decimal(Some(d))
    }
}

impl From<Money> for Value {
    fn from(m: Money) -> Self {
        Self::Money(Some(m))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s.into())
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<EnumValue> for Value {
    fn from(e: EnumValue) -> Self {
        Self::Enum(e)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
