//! Validation of a whole product component.

use chrono::NaiveDate;
use ipsmodel_foundation::Result;
use ipsmodel_model::ModelRegistry;
use ipsmodel_runtime::{MessageList, ProductComponent, ValidationContext};
use tracing::debug;

use crate::association::validate_product_association;
use crate::attribute::{validate_policy_attribute, validate_product_attribute};
use crate::formula::validate_formula;

/// Validates a product component against its product component type.
///
/// Runs the attribute, association, and formula checks for every part of
/// the component's type, including inherited ones, and the default value
/// and value set checks for every product-relevant attribute of the
/// configured policy component type. Findings are appended to `list`.
///
/// # Errors
///
/// Returns the error of resolving the types or reading the configuration.
/// Findings appended before the error stay in `list`.
pub fn validate_product_component(
    list: &mut MessageList,
    context: &ValidationContext,
    registry: &ModelRegistry,
    component: &ProductComponent,
    date: Option<NaiveDate>,
) -> Result<()> {
    let product_type = registry.product_cmpt_type_of(component)?;
    let before = list.len();

    for attribute in product_type.attributes() {
        validate_product_attribute(list, context, &attribute, component, date)?;
    }
    for association in product_type.associations() {
        validate_product_association(list, context, &association, component, date)?;
    }
    for formula in product_type.formulas() {
        validate_formula(list, context, &formula, component, date)?;
    }
    if product_type.is_configuration_for_policy_cmpt_type() {
        let policy_type = product_type.policy_cmpt_type()?;
        for attribute in policy_type.attributes() {
            validate_policy_attribute(list, context, &attribute, component, date)?;
        }
    }

    debug!(
        component = component.id(),
        product_type = product_type.name(),
        findings = list.len() - before,
        "validated product component"
    );
    Ok(())
}
