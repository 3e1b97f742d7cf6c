//! Message texts for findings.
//!
//! Texts come from the bundle in the [`ValidationContext`] first, then from
//! the built-in English and German templates. Templates use positional
//! placeholders (`{0}`, `{1}`, ...) filled by [`format_template`].

use ipsmodel_foundation::Locale;
use ipsmodel_runtime::{
    InMemoryBundle, Message, MessageBundle, ValidationContext, format_template,
};
use once_cell::sync::Lazy;

use crate::codes;

static DEFAULT_TEMPLATES: Lazy<InMemoryBundle> = Lazy::new(|| {
    let en = Locale::english();
    let de = Locale::german();
    InMemoryBundle::new()
        .with(
            &en,
            codes::DEFAULT_VALUE_NOT_IN_VALUE_SET,
            "The default value {1} of {0} is not in the value set {2}.",
        )
        .with(
            &de,
            codes::DEFAULT_VALUE_NOT_IN_VALUE_SET,
            "Der Vorgabewert {1} von {0} ist nicht im Wertebereich {2} enthalten.",
        )
        .with(
            &en,
            codes::VALUE_SET_NOT_IN_VALUE_SET,
            "The value set {1} of {0} is not a subset of the model value set {2}.",
        )
        .with(
            &de,
            codes::VALUE_SET_NOT_IN_VALUE_SET,
            "Der Wertebereich {1} von {0} ist keine Teilmenge des Modellwertebereichs {2}.",
        )
        .with(
            &en,
            codes::MANDATORY_VALUESET_IS_EMPTY,
            "The value set of the mandatory attribute {0} is empty.",
        )
        .with(
            &de,
            codes::MANDATORY_VALUESET_IS_EMPTY,
            "Der Wertebereich des Pflichtattributs {0} ist leer.",
        )
        .with(
            &en,
            codes::PRODUCT_VALUE_NOT_IN_VALUE_SET,
            "The value {1} of {0} is not in the value set {2}.",
        )
        .with(
            &de,
            codes::PRODUCT_VALUE_NOT_IN_VALUE_SET,
            "Der Wert {1} von {0} ist nicht im Wertebereich {2} enthalten.",
        )
        .with(
            &en,
            codes::MIN_CARDINALITY_NOT_REACHED,
            "{0} has {1} links but requires at least {2}.",
        )
        .with(
            &de,
            codes::MIN_CARDINALITY_NOT_REACHED,
            "{0} hat {1} Beziehungen, benötigt aber mindestens {2}.",
        )
        .with(
            &en,
            codes::MAX_CARDINALITY_EXCEEDED,
            "{0} has {1} links but allows at most {2}.",
        )
        .with(
            &de,
            codes::MAX_CARDINALITY_EXCEEDED,
            "{0} hat {1} Beziehungen, erlaubt aber höchstens {2}.",
        )
        .with(
            &en,
            codes::MAX_CARDINALITY_EXCEEDS_MODEL_MAX,
            "The link of {0} to {1} allows up to {2} targets, more than the maximum {3} of the model.",
        )
        .with(
            &de,
            codes::MAX_CARDINALITY_EXCEEDS_MODEL_MAX,
            "Die Beziehung {0} zu {1} erlaubt bis zu {2} Ziele, mehr als das Modellmaximum {3}.",
        )
        .with(
            &en,
            codes::MIN_CARDINALITY_FALLS_BELOW_MODEL_MIN,
            "The link of {0} to {1} allows as few as {2} targets, less than the minimum {3} of the model.",
        )
        .with(
            &de,
            codes::MIN_CARDINALITY_FALLS_BELOW_MODEL_MIN,
            "Die Beziehung {0} zu {1} erlaubt nur {2} Ziele, weniger als das Modellminimum {3}.",
        )
        .with(
            &en,
            codes::TARGET_VALID_FROM_AFTER_SOURCE,
            "{0} is valid from {1}, after its source which is valid from {2}.",
        )
        .with(
            &de,
            codes::TARGET_VALID_FROM_AFTER_SOURCE,
            "{0} ist ab {1} gültig, nach der Quelle, die ab {2} gültig ist.",
        )
        .with(
            &en,
            codes::TARGET_VALID_TO_BEFORE_SOURCE,
            "{0} is valid until {1}, before its source which is valid until {2}.",
        )
        .with(
            &de,
            codes::TARGET_VALID_TO_BEFORE_SOURCE,
            "{0} ist bis {1} gültig, vor der Quelle, die bis {2} gültig ist.",
        )
        .with(&en, codes::FORMULA_MISSING, "The formula {0} is required but empty.")
        .with(
            &de,
            codes::FORMULA_MISSING,
            "Die Formel {0} ist erforderlich, aber leer.",
        )
});

/// Returns the text for a message code in the context's locale.
///
/// Falls back to English, then to the code itself.
#[must_use]
pub fn message_text(context: &ValidationContext, code: &str, args: &[String]) -> String {
    let template = context
        .messages
        .as_ref()
        .and_then(|bundle| bundle.message(code, &context.locale))
        .or_else(|| DEFAULT_TEMPLATES.message(code, &context.locale))
        .or_else(|| DEFAULT_TEMPLATES.message(code, &Locale::english()))
        .unwrap_or_else(|| code.to_string());
    format_template(&template, args)
}

/// Creates an error message with a localized text.
pub(crate) fn finding(context: &ValidationContext, code: &str, args: &[String]) -> Message {
    Message::error(code, message_text(context, code, args))
}
