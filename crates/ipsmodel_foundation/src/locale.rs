//! Locales for documentation and message lookup.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A language tag such as `en` or `de-CH`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Locale(Arc<str>);

impl Locale {
    /// English.
    pub const ENGLISH: &'static str = "en";
    /// German.
    pub const GERMAN: &'static str = "de";

    /// Creates a locale from a language tag.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self(tag.into())
    }

    /// English locale.
    #[must_use]
    pub fn english() -> Self {
        Self::new(Self::ENGLISH)
    }

    /// German locale.
    #[must_use]
    pub fn german() -> Self {
        Self::new(Self::GERMAN)
    }

    /// Returns the language tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.0
    }

    /// Returns the language part of the tag (`de` for `de-CH`).
    #[must_use]
    pub fn language(&self) -> &str {
        self.0.split(['-', '_']).next().unwrap_or(&self.0)
    }

    /// Returns the language-only locale if this locale has a region.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let language = self.language();
        (language.len() < self.0.len()).then(|| Self::new(language))
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::english()
    }
}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl fmt::Debug for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Locale({})", self.0)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
