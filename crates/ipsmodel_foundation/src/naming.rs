//! Name normalization for part lookup.

/// Normalizes a part name for lookup: only the first character is lowercased.
///
/// `"Premium"` and `"premium"` resolve to the same part; `"PREMIUM"` becomes
/// `"pREMIUM"` and does not.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
