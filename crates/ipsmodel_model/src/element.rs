//! Names, documentation, deprecation, and extension properties shared by
//! types and their parts.

use std::fmt;
use std::sync::Arc;

use ipsmodel_declaration::ExtensionProperties;
use ipsmodel_foundation::{Deprecation, Locale, Value};
use ipsmodel_runtime::MessageBundle;

/// Placeholder in a documentation text that stands for the overridden
/// element's text.
pub const INHERIT_DESCRIPTION_TAG: &str = "{inheritDesc}";

/// Kind of documentation text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DocumentationKind {
    /// Display name.
    Label,
    /// Display name for many instances.
    PluralLabel,
    /// Longer description.
    Description,
}

impl DocumentationKind {
    /// Returns the key suffix of this kind.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::PluralLabel => "pluralLabel",
            Self::Description => "description",
        }
    }
}

impl fmt::Display for DocumentationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Anything in the model with a name and documentation.
pub trait ModelElement {
    /// Returns the name.
    fn name(&self) -> &str;

    /// Returns the documentation text of a kind, if any is defined for this
    /// element or inherited from the element it overrides.
    fn documentation(&self, kind: DocumentationKind, locale: &Locale) -> Option<String>;

    /// Returns the deprecation information, if the element is deprecated.
    fn deprecation(&self) -> Option<&Deprecation>;

    /// Returns the extension properties.
    fn extension_properties(&self) -> &ExtensionProperties;

    /// Returns the label, falling back to the name.
    fn label(&self, locale: &Locale) -> String {
        self.documentation(DocumentationKind::Label, locale)
            .unwrap_or_else(|| self.name().to_string())
    }

    /// Returns the plural label, falling back to the name.
    fn plural_label(&self, locale: &Locale) -> String {
        self.documentation(DocumentationKind::PluralLabel, locale)
            .unwrap_or_else(|| self.name().to_string())
    }

    /// Returns the description, falling back to the empty string.
    fn description(&self, locale: &Locale) -> String {
        self.documentation(DocumentationKind::Description, locale)
            .unwrap_or_default()
    }

    /// Returns true if the element is deprecated.
    fn is_deprecated(&self) -> bool {
        self.deprecation().is_some()
    }

    /// Returns the ids of the extension properties in declaration order.
    fn extension_property_ids(&self) -> Vec<&str> {
        self.extension_properties()
            .keys()
            .map(String::as_str)
            .collect()
    }

    /// Returns the value of an extension property.
    fn extension_property_value(&self, id: &str) -> Option<&Value> {
        self.extension_properties().get(id)
    }
}

/// Looks a documentation text up in the requested locale, then in the
/// default locale, then in the overridden element.
///
/// An [`INHERIT_DESCRIPTION_TAG`] in the found text is replaced by the
/// overridden element's text (or nothing if there is none).
pub(crate) fn resolve_documentation(
    bundle: Option<&Arc<dyn MessageBundle>>,
    key: &str,
    locale: &Locale,
    default_locale: &Locale,
    inherited: impl FnOnce() -> Option<String>,
) -> Option<String> {
    let own = bundle.and_then(|bundle| {
        bundle.message(key, locale).or_else(|| {
            if locale == default_locale {
                None
            } else {
                bundle.message(key, default_locale)
            }
        })
    });
    match own {
        Some(text) if text.contains(INHERIT_DESCRIPTION_TAG) => {
            Some(text.replace(INHERIT_DESCRIPTION_TAG, &inherited().unwrap_or_default()))
        }
        Some(text) => Some(text),
        None => inherited(),
    }
}
