//! Cardinalities of associations and product links.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An upper bound that may be unbounded.
///
/// `Bounded` values order before `Unbounded`; arithmetic saturates at
/// `Unbounded`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Cardinality {
    /// A finite bound.
    Bounded(u32),
    /// No upper bound (`*`).
    Unbounded,
}

impl Cardinality {
    /// Returns the finite bound, if any.
    #[must_use]
    pub const fn bound(self) -> Option<u32> {
        match self {
            Self::Bounded(n) => Some(n),
            Self::Unbounded => None,
        }
    }

    /// Returns true for `Unbounded`.
    #[must_use]
    pub const fn is_unbounded(self) -> bool {
        matches!(self, Self::Unbounded)
    }

    /// Adds two cardinalities; overflow and unbounded operands give `Unbounded`.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        match (self, other) {
            (Self::Bounded(a), Self::Bounded(b)) => match a.checked_add(b) {
                Some(sum) => Self::Bounded(sum),
                None => Self::Unbounded,
            },
            _ => Self::Unbounded,
        }
    }

    /// Returns true if `count` does not exceed this bound.
    #[must_use]
    pub const fn admits(self, count: u32) -> bool {
        match self {
            Self::Bounded(n) => count <= n,
            Self::Unbounded => true,
        }
    }
}

impl From<u32> for Cardinality {
    fn from(n: u32) -> Self {
        Self::Bounded(n)
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bounded(n) => write!(f, "{n}"),
            Self::Unbounded => write!(f, "*"),
        }
    }
}

/// A cardinality range `[min..max]` with a default count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CardinalityRange {
    /// Lower bound.
    pub min: u32,
    /// Upper bound.
    pub max: Cardinality,
    /// Default number of targets.
    pub default: u32,
}

impl CardinalityRange {
    /// `[0..1]`, default 0.
    pub const OPTIONAL: Self = Self::new(0, Cardinality::Bounded(1), 0);
    /// `[1..1]`, default 1.
    pub const MANDATORY: Self = Self::new(1, Cardinality::Bounded(1), 1);
    /// `[0..*]`, default 0.
    pub const FULL_RANGE: Self = Self::new(0, Cardinality::Unbounded, 0);
    /// `[0..0]`: the association is excluded.
    pub const EXCLUDED: Self = Self::new(0, Cardinality::Bounded(0), 0);

    /// Creates a range.
    #[must_use]
    pub const fn new(min: u32, max: Cardinality, default: u32) -> Self {
        Self { min, max, default }
    }

    /// Creates a bounded range with `default == min`.
    #[must_use]
    pub const fn bounded(min: u32, max: u32) -> Self {
        Self::new(min, Cardinality::Bounded(max), min)
    }

    /// Creates an unbounded range with `default == min`.
    #[must_use]
    pub const fn at_least(min: u32) -> Self {
        Self::new(min, Cardinality::Unbounded, min)
    }

    /// Returns true if `count` lies within `[min..max]`.
    #[must_use]
    pub const fn contains(&self, count: u32) -> bool {
        count >= self.min && self.max.admits(count)
    }

    /// Returns true if `max` is zero.
    #[must_use]
    pub const fn is_excluded(&self) -> bool {
        matches!(self.max, Cardinality::Bounded(0))
    }
}

impl fmt::Display for CardinalityRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{}, {}]", self.min, self.max, self.default)
    }
}
