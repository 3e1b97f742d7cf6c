//! Checks of formula configurations.

use chrono::NaiveDate;
use ipsmodel_foundation::Result;
use ipsmodel_model::{Formula, ModelElement};
use ipsmodel_runtime::{MessageList, ObjectProperty, ProductComponent, ValidationContext};

use crate::codes;
use crate::messages::finding;

/// Reports a required formula that has no text.
///
/// # Errors
///
/// Returns an invocation error if no generation is effective at `date`.
pub fn validate_formula(
    list: &mut MessageList,
    context: &ValidationContext,
    formula: &Formula,
    product: &ProductComponent,
    date: Option<NaiveDate>,
) -> Result<()> {
    if !formula.is_required() || !formula.is_empty(product, date)? {
        return Ok(());
    }
    let object = formula.product_object(product, date)?.invalid_object();
    list.add(
        finding(context, codes::FORMULA_MISSING, &[formula.name().to_string()])
            .with_invalid_property(ObjectProperty::new(object, formula.name())),
    );
    Ok(())
}
