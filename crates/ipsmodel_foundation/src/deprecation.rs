//! Deprecation metadata for types and parts.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The deprecation marker as declared on a generated element.
///
/// Fields that could not be resolved from the declaration stay `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeprecationMarker {
    /// Version since which the element is deprecated.
    pub since: Option<String>,
    /// Whether removal is planned.
    pub for_removal: Option<bool>,
}

impl DeprecationMarker {
    /// A marker without any resolvable fields.
    #[must_use]
    pub fn bare() -> Self {
        Self::default()
    }

    /// A marker with a version.
    #[must_use]
    pub fn since(version: impl Into<String>) -> Self {
        Self {
            since: Some(version.into()),
            for_removal: None,
        }
    }

    /// Sets the removal flag.
    #[must_use]
    pub const fn for_removal(mut self, for_removal: bool) -> Self {
        self.for_removal = Some(for_removal);
        self
    }
}

/// Resolved deprecation information of a model element.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Deprecation {
    since_version: Option<String>,
    marked_for_removal: bool,
}

impl Deprecation {
    /// Reads deprecation information from an optional marker.
    ///
    /// No marker means the element is not deprecated. A marker whose fields
    /// cannot be resolved yields a deprecation without version that is not
    /// marked for removal.
    #[must_use]
    pub fn of(marker: Option<&DeprecationMarker>) -> Option<Self> {
        marker.map(|m| Self {
            since_version: m.since.clone().filter(|v| !v.is_empty()),
            marked_for_removal: m.for_removal.unwrap_or(false),
        })
    }

    /// Returns the version since which the element is deprecated.
    #[must_use]
    pub fn since_version(&self) -> Option<&str> {
        self.since_version.as_deref()
    }

    /// Returns true if the element is scheduled for removal.
    #[must_use]
    pub const fn is_marked_for_removal(&self) -> bool {
        self.marked_for_removal
    }
}

impl fmt::Display for Deprecation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "deprecated")?;
        if let Some(version) = &self.since_version {
            write!(f, " since {version}")?;
        }
        if self.marked_for_removal {
            write!(f, " (for removal)")?;
        }
        Ok(())
    }
}
