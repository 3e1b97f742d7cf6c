//! Context of a validation run.

use std::sync::Arc;

use ipsmodel_foundation::Locale;

use crate::bundle::MessageBundle;
use crate::repository::RuntimeRepository;

/// Locale and collaborators available while validating.
#[derive(Clone, Debug, Default)]
pub struct ValidationContext {
    /// Locale for message texts.
    pub locale: Locale,
    /// Repository to resolve link targets and enum values.
    pub repository: Option<Arc<dyn RuntimeRepository>>,
    /// Bundle whose texts take precedence over the built-in message templates.
    pub messages: Option<Arc<dyn MessageBundle>>,
}

impl ValidationContext {
    /// Creates a context for a locale.
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            repository: None,
            messages: None,
        }
    }

    /// Sets the repository.
    #[must_use]
    pub fn with_repository(mut self, repository: Arc<dyn RuntimeRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Sets the message bundle.
    #[must_use]
    pub fn with_messages(mut self, messages: Arc<dyn MessageBundle>) -> Self {
        self.messages = Some(messages);
        self
    }

    /// Returns the repository, if any.
    #[must_use]
    pub fn repository(&self) -> Option<&dyn RuntimeRepository> {
        self.repository.as_deref()
    }
}
