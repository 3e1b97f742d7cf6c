//! Configuration of the model registry.

use ipsmodel_foundation::Locale;

/// Configuration of a [`ModelRegistry`](crate::ModelRegistry).
#[derive(Clone, Debug)]
pub struct ModelConfig {
    /// Locale used when a text is missing in the requested locale.
    pub default_locale: Locale,

    /// Memoize matching-association resolution per association.
    pub cache_matching_associations: bool,

    /// Fail when no generation is effective at the requested date.
    /// When false, the latest generation is used instead.
    pub strict_generations: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            default_locale: Locale::english(),
            cache_matching_associations: true,
            strict_generations: true,
        }
    }
}

impl ModelConfig {
    /// Creates a configuration that resolves matching associations on every call.
    #[must_use]
    pub fn uncached() -> Self {
        Self {
            cache_matching_associations: false,
            ..Self::default()
        }
    }

    /// Builder method to set the default locale.
    #[must_use]
    pub fn with_default_locale(mut self, locale: Locale) -> Self {
        self.default_locale = locale;
        self
    }

    /// Builder method to enable or disable the matching-association cache.
    #[must_use]
    pub fn with_matching_association_cache(mut self, enabled: bool) -> Self {
        self.cache_matching_associations = enabled;
        self
    }

    /// Builder method to set strict generation lookup.
    #[must_use]
    pub fn with_strict_generations(mut self, strict: bool) -> Self {
        self.strict_generations = strict;
        self
    }
}
