//! Value sets: descriptions of the values an attribute may take.

use std::fmt;

use rust_decimal::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Upper limit for expanding an integer range into its members.
const MAX_RANGE_EXPANSION: i64 = 10_000;

/// The kind of value set an attribute is modeled with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ValueSetKind {
    /// Every value of the datatype is allowed.
    AllValues,
    /// An explicit enumeration of values.
    Enum,
    /// A range with optional bounds and step.
    Range,
    /// Strings up to a maximum length.
    StringLength,
    /// The value set is computed from other values.
    Derived,
}

impl ValueSetKind {
    const ALL: [Self; 5] = [
        Self::AllValues,
        Self::Enum,
        Self::Range,
        Self::StringLength,
        Self::Derived,
    ];

    /// Returns the model name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AllValues => "AllValues",
            Self::Enum => "Enum",
            Self::Range => "Range",
            Self::StringLength => "StringLength",
            Self::Derived => "Derived",
        }
    }

    /// Looks a kind up by its model name. Unknown names yield `None`.
    #[must_use]
    pub fn for_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

/// An ordered, duplicate-free enumeration of values.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderedValueSet {
    values: Vec<Value>,
    contains_null: bool,
}

impl OrderedValueSet {
    /// Creates an enumeration; duplicates are dropped, first occurrence wins.
    ///
    /// Null-like members are not stored; they set `contains_null` instead.
    #[must_use]
    pub fn new(values: impl IntoIterator<Item = Value>, contains_null: bool) -> Self {
        let mut members: Vec<Value> = Vec::new();
        let mut contains_null = contains_null;
        for value in values {
            if value.is_null_like() {
                contains_null = true;
            } else if !members.contains(&value) {
                members.push(value);
            }
        }
        Self {
            values: members,
            contains_null,
        }
    }

    /// Returns the non-null members in order.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Returns true if null is a member.
    #[must_use]
    pub const fn contains_null(&self) -> bool {
        self.contains_null
    }
}

/// A range of ordered values with optional bounds and step.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RangeValueSet {
    /// Inclusive lower bound; `None` is unbounded.
    pub lower: Option<Value>,
    /// Inclusive upper bound; `None` is unbounded.
    pub upper: Option<Value>,
    /// Distance between members, counted from the lower bound.
    pub step: Option<Value>,
    /// Whether null is a member.
    pub contains_null: bool,
}

impl RangeValueSet {
    /// Creates a range without step.
    #[must_use]
    pub fn new(lower: Option<Value>, upper: Option<Value>, contains_null: bool) -> Self {
        Self {
            lower,
            upper,
            step: None,
            contains_null,
        }
    }

    /// Sets the step.
    #[must_use]
    pub fn with_step(mut self, step: Value) -> Self {
        self.step = Some(step);
        self
    }

    /// Returns true if no non-null value lies within the bounds.
    #[must_use]
    pub fn is_empty_range(&self) -> bool {
        match (&self.lower, &self.upper) {
            (Some(lower), Some(upper)) => lower > upper,
            _ => false,
        }
    }

    fn contains_non_null(&self, value: &Value) -> bool {
        let above = self
            .lower
            .as_ref()
            .is_none_or(|lower| matches!(value.partial_cmp(lower), Some(o) if o.is_ge()));
        let below = self
            .upper
            .as_ref()
            .is_none_or(|upper| matches!(value.partial_cmp(upper), Some(o) if o.is_le()));
        above && below && self.on_step(value)
    }

    fn on_step(&self, value: &Value) -> bool {
        match (&self.step, &self.lower) {
            (Some(step), Some(lower)) => {
                difference(value, lower).is_some_and(|distance| is_multiple(&distance, step))
            }
            _ => true,
        }
    }

    /// Expands a bounded integer range into its members.
    fn integer_members(&self) -> Option<Vec<Value>> {
        let lower = self.lower.as_ref()?.as_integer()?;
        let upper = self.upper.as_ref()?.as_integer()?;
        let step = match &self.step {
            Some(step) => step.as_integer()?,
            None => 1,
        };
        let span = upper.checked_sub(lower)?;
        if step <= 0 || span / step > MAX_RANGE_EXPANSION {
            return None;
        }
        let mut members = Vec::new();
        let mut current = Some(lower);
        while let Some(member) = current.filter(|member| *member <= upper) {
            members.push(Value::Integer(member));
            current = member.checked_add(step);
        }
        Some(members)
    }

    fn is_subset_of_range(&self, other: &Self) -> bool {
        if self.is_empty_range() {
            return true;
        }
        let lower_ok = match (&other.lower, &self.lower) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(o), Some(s)) => matches!(s.partial_cmp(o), Some(ord) if ord.is_ge()),
        };
        let upper_ok = match (&other.upper, &self.upper) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(o), Some(s)) => matches!(s.partial_cmp(o), Some(ord) if ord.is_le()),
        };
        let step_ok = match (&other.step, &self.step, &self.lower) {
            (None, _, _) => true,
            (Some(o), Some(s), Some(lower)) => is_multiple(s, o) && other.on_step(lower),
            (Some(_), None, Some(lower)) => self.upper.as_ref() == Some(lower) && other.on_step(lower),
            _ => false,
        };
        lower_ok && upper_ok && step_ok
    }
}

/// Returns `a - b`, `Null` for non-numeric operands, or `None` when the
/// difference is not representable.
fn difference(a: &Value, b: &Value) -> Option<Value> {
    match (a, b) {
        (Value::Integer(a), Value::Integer(b)) => Some(a.checked_sub(*b).map_or_else(
            || Value::decimal(Decimal::from(*a) - Decimal::from(*b)),
            Value::Integer,
        )),
        (Value::Money(Some(a)), Value::Money(Some(b))) if a.currency == b.currency => {
            a.amount.checked_sub(b.amount).map(Value::decimal)
        }
        _ => match (a.as_decimal(), b.as_decimal()) {
            (Some(a), Some(b)) => a.checked_sub(b).map(Value::decimal),
            _ => Some(Value::Null),
        },
    }
}

fn is_multiple(value: &Value, step: &Value) -> bool {
    let step = match step {
        Value::Money(Some(m)) => Some(m.amount),
        other => other.as_decimal(),
    };
    match (value.as_decimal(), step) {
        (Some(_), Some(step)) if step.is_zero() => false,
        (Some(value), Some(step)) => value.checked_rem(step) == Some(Decimal::ZERO),
        // Steps are meaningless for non-numeric ranges such as dates.
        _ => true,
    }
}

/// A set of allowed values.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ValueSet {
    /// All values of the datatype.
    Unrestricted {
        /// Whether null is allowed.
        contains_null: bool,
    },
    /// An explicit enumeration.
    Enum(OrderedValueSet),
    /// A range.
    Range(RangeValueSet),
    /// Strings up to a maximum length.
    StringLength {
        /// Maximum number of characters; `None` is unlimited.
        max_length: Option<usize>,
        /// Whether null is allowed.
        contains_null: bool,
    },
}

impl ValueSet {
    /// Creates an unrestricted value set.
    #[must_use]
    pub const fn unrestricted(contains_null: bool) -> Self {
        Self::Unrestricted { contains_null }
    }

    /// Creates an enumeration value set.
    #[must_use]
    pub fn enumeration(values: impl IntoIterator<Item = Value>, contains_null: bool) -> Self {
        Self::Enum(OrderedValueSet::new(values, contains_null))
    }

    /// Creates a range value set.
    #[must_use]
    pub fn range(lower: Option<Value>, upper: Option<Value>, contains_null: bool) -> Self {
        Self::Range(RangeValueSet::new(lower, upper, contains_null))
    }

    /// Creates a string-length value set.
    #[must_use]
    pub const fn string_length(max_length: Option<usize>, contains_null: bool) -> Self {
        Self::StringLength {
            max_length,
            contains_null,
        }
    }

    /// Returns the kind of this value set.
    #[must_use]
    pub const fn kind(&self) -> ValueSetKind {
        match self {
            Self::Unrestricted { .. } => ValueSetKind::AllValues,
            Self::Enum(_) => ValueSetKind::Enum,
            Self::Range(_) => ValueSetKind::Range,
            Self::StringLength { .. } => ValueSetKind::StringLength,
        }
    }

    /// Returns true if null is allowed.
    #[must_use]
    pub const fn contains_null(&self) -> bool {
        match self {
            Self::Unrestricted { contains_null } | Self::StringLength { contains_null, .. } => {
                *contains_null
            }
            Self::Enum(set) => set.contains_null,
            Self::Range(range) => range.contains_null,
        }
    }

    /// Returns true if the value is a member.
    ///
    /// Null-like values are members exactly when null is allowed. A list is
    /// contained when each element is.
    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        if let Value::List(values) = value {
            return values.iter().all(|v| self.contains(v));
        }
        if value.is_null_like() {
            return self.contains_null();
        }
        self.contains_non_null(value)
    }

    fn contains_non_null(&self, value: &Value) -> bool {
        match self {
            Self::Unrestricted { .. } => true,
            Self::Enum(set) => set.values.contains(value),
            Self::Range(range) => range.contains_non_null(value),
            Self::StringLength { max_length, .. } => match (value.as_str(), max_length) {
                (Some(_), None) => true,
                (Some(s), Some(max)) => s.chars().count() <= *max,
                (None, _) => false,
            },
        }
    }

    /// Returns true if neither null nor any other value is a member.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        if self.contains_null() {
            return false;
        }
        match self {
            Self::Unrestricted { .. } | Self::StringLength { .. } => false,
            Self::Enum(set) => set.values.is_empty(),
            Self::Range(range) => range.is_empty_range(),
        }
    }

    /// Returns true if every member of this set is a member of `other`.
    #[must_use]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        if self.contains_null() && !other.contains_null() {
            return false;
        }
        match (self, other) {
            (_, Self::Unrestricted { .. }) => true,
            (Self::Enum(set), _) => set.values.iter().all(|v| other.contains_non_null(v)),
            (Self::Unrestricted { .. }, Self::Range(range)) => {
                range.lower.is_none() && range.upper.is_none() && range.step.is_none()
            }
            (
                Self::Unrestricted { .. },
                Self::StringLength {
                    max_length: None, ..
                },
            ) => true,
            (Self::Range(a), Self::Range(b)) => a.is_subset_of_range(b),
            (Self::Range(range), Self::Enum(_)) => {
                if range.is_empty_range() {
                    return true;
                }
                range
                    .integer_members()
                    .is_some_and(|members| members.iter().all(|v| other.contains_non_null(v)))
            }
            (
                Self::StringLength { max_length: a, .. },
                Self::StringLength { max_length: b, .. },
            ) => match (a, b) {
                (_, None) => true,
                (None, Some(_)) => false,
                (Some(a), Some(b)) => a <= b,
            },
            _ => false,
        }
    }
}

impl fmt::Display for ValueSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrestricted { .. } => write!(f, "all values")?,
            Self::Enum(set) => {
                write!(f, "[")?;
                for (i, value) in set.values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, "]")?;
            }
            Self::Range(range) => {
                let bound = |v: &Option<Value>| v.as_ref().map_or_else(|| "*".to_string(), ToString::to_string);
                write!(f, "[{}..{}]", bound(&range.lower), bound(&range.upper))?;
                if let Some(step) = &range.step {
                    write!(f, " step {step}")?;
                }
            }
            Self::StringLength { max_length, .. } => match max_length {
                Some(max) => write!(f, "max length {max}")?,
                None => write!(f, "any length")?,
            },
        }
        if self.contains_null() {
            write!(f, " (incl. null)")?;
        }
        Ok(())
    }
}
