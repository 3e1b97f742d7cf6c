//! Localized message and documentation texts.

use std::collections::HashMap;
use std::fmt;

use ipsmodel_foundation::Locale;

/// Source of localized texts keyed by string.
pub trait MessageBundle: Send + Sync + fmt::Debug {
    /// Returns the text for `key` in `locale`, if the bundle has one.
    fn message(&self, key: &str, locale: &Locale) -> Option<String>;
}

/// A bundle held in memory.
///
/// Lookups fall back from a regional locale (`de-CH`) to its language (`de`).
#[derive(Clone, Debug, Default)]
pub struct InMemoryBundle {
    entries: HashMap<(Locale, String), String>,
}

impl InMemoryBundle {
    /// Creates an empty bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a text.
    #[must_use]
    pub fn with(mut self, locale: &Locale, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(locale, key, text);
        self
    }

    /// Adds a text.
    pub fn insert(&mut self, locale: &Locale, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert((locale.clone(), key.into()), text.into());
    }

    fn lookup(&self, key: &str, locale: &Locale) -> Option<&String> {
        self.entries.get(&(locale.clone(), key.to_string()))
    }
}

impl MessageBundle for InMemoryBundle {
    fn message(&self, key: &str, locale: &Locale) -> Option<String> {
        self.lookup(key, locale)
            .or_else(|| locale.parent().and_then(|parent| self.lookup(key, &parent)))
            .cloned()
    }
}

/// Replaces `{0}`, `{1}`, ... in a template with the given arguments.
///
/// Placeholders without a matching argument are kept as they are.
#[must_use]
pub fn format_template(template: &str, args: &[String]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replaced = after.find('}').and_then(|close| {
            let index: usize = after[..close].parse().ok()?;
            args.get(index).map(|arg| (arg, close))
        });
        match replaced {
            Some((arg, close)) => {
                result.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                result.push('{');
                rest = after;
            }
        }
    }
    result.push_str(rest);
    result
}
