//! Stable message codes and the property names findings refer to.
//!
//! Codes and invalid properties are part of the external contract; message
//! texts may be re-templated per locale.

/// A configured default value is not in the configured value set.
pub const DEFAULT_VALUE_NOT_IN_VALUE_SET: &str = "POLICY_ATTRIBUTE-DEFAULT_VALUE_NOT_IN_VALUE_SET";

/// A configured value set is not a subset of the model value set.
pub const VALUE_SET_NOT_IN_VALUE_SET: &str = "POLICY_ATTRIBUTE-VALUE_SET_NOT_IN_VALUE_SET";

/// A mandatory attribute has an empty configured value set.
pub const MANDATORY_VALUESET_IS_EMPTY: &str = "POLICY_ATTRIBUTE-MANDATORY_VALUESET_IS_EMPTY";

/// A product attribute value is not in the model value set.
pub const PRODUCT_VALUE_NOT_IN_VALUE_SET: &str = "PRODUCT_ATTRIBUTE-VALUE_NOT_IN_VALUE_SET";

/// Fewer links than the model minimum.
pub const MIN_CARDINALITY_NOT_REACHED: &str = "PRODUCT_ASSOCIATION-MIN_CARDINALITY_NOT_REACHED";

/// More links than the model maximum.
pub const MAX_CARDINALITY_EXCEEDED: &str = "PRODUCT_ASSOCIATION-MAX_CARDINALITY_EXCEEDED";

/// A link's maximum allows more targets than the policy association.
pub const MAX_CARDINALITY_EXCEEDS_MODEL_MAX: &str =
    "PRODUCT_ASSOCIATION-MAX_CARDINALITY_EXCEEDS_MODEL_MAX";

/// A link's minimum cannot reach the policy association's minimum.
pub const MIN_CARDINALITY_FALLS_BELOW_MODEL_MIN: &str =
    "PRODUCT_ASSOCIATION-MIN_CARDINALITY_FALLS_BELOW_MODEL_MIN";

/// A link target becomes valid after its source.
pub const TARGET_VALID_FROM_AFTER_SOURCE: &str = "PRODUCT_ASSOCIATION-TARGET_VALID_FROM_AFTER_SOURCE";

/// A link target stops being valid before its source.
pub const TARGET_VALID_TO_BEFORE_SOURCE: &str = "PRODUCT_ASSOCIATION-TARGET_VALID_TO_BEFORE_SOURCE";

/// A required formula has no text.
pub const FORMULA_MISSING: &str = "FORMULA-MISSING";

/// Every code, in the order the checks run.
pub const ALL: [&str; 11] = [
    DEFAULT_VALUE_NOT_IN_VALUE_SET,
    VALUE_SET_NOT_IN_VALUE_SET,
    MANDATORY_VALUESET_IS_EMPTY,
    PRODUCT_VALUE_NOT_IN_VALUE_SET,
    MIN_CARDINALITY_NOT_REACHED,
    MAX_CARDINALITY_EXCEEDED,
    MAX_CARDINALITY_EXCEEDS_MODEL_MAX,
    MIN_CARDINALITY_FALLS_BELOW_MODEL_MIN,
    TARGET_VALID_FROM_AFTER_SOURCE,
    TARGET_VALID_TO_BEFORE_SOURCE,
    FORMULA_MISSING,
];

/// Property suffix for a configured default value: `<attribute>.defaultValue`.
pub const PROPERTY_DEFAULT_VALUE: &str = "defaultValue";

/// Property suffix for a configured value set: `<attribute>.valueSet`.
pub const PROPERTY_VALUE_SET: &str = "valueSet";

/// Property of a link's maximum cardinality.
pub const PROPERTY_MAX_CARDINALITY: &str = "maxCardinality";

/// Property of a link's minimum cardinality.
pub const PROPERTY_MIN_CARDINALITY: &str = "minCardinality";

/// Property of a target's valid-from date.
pub const PROPERTY_VALID_FROM: &str = "validFrom";

/// Property of a target's valid-to date.
pub const PROPERTY_VALID_TO: &str = "validTo";

/// Joins a part name and a property suffix.
#[must_use]
pub fn part_property(part: &str, property: &str) -> String {
    format!("{part}.{property}")
}
