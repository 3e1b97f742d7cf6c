//! Checks of attribute configurations.

use chrono::NaiveDate;
use ipsmodel_foundation::{Result, Value, ValueSet};
use ipsmodel_model::{ModelElement, PolicyAttribute, ProductAttribute};
use ipsmodel_runtime::{MessageList, ObjectProperty, ProductComponent, ValidationContext};
use tracing::trace;

use crate::codes;
use crate::messages::finding;

/// Checks the default value and value set a product configures for a
/// policy attribute.
///
/// Attributes that are not product relevant are skipped. A null-like
/// default value is valid whatever the configured value set contains.
///
/// # Errors
///
/// Returns the error of resolving the configured default value or value set.
pub fn validate_policy_attribute(
    list: &mut MessageList,
    context: &ValidationContext,
    attribute: &PolicyAttribute,
    product: &ProductComponent,
    date: Option<NaiveDate>,
) -> Result<()> {
    if !attribute.is_product_relevant() {
        return Ok(());
    }
    let name = attribute.name();
    trace!(attribute = name, product = product.id(), "validating policy attribute");

    let object = attribute.product_object(product, date)?.invalid_object();
    let value_set = attribute.value_set_for(Some(product), date, context)?;
    let default_value = attribute.default_value_for(Some(product), date)?;

    if !is_default_value_valid(&default_value, &value_set) {
        list.add(
            finding(
                context,
                codes::DEFAULT_VALUE_NOT_IN_VALUE_SET,
                &[name.to_string(), default_value.to_string(), value_set.to_string()],
            )
            .with_invalid_property(ObjectProperty::new(
                object.clone(),
                codes::part_property(name, codes::PROPERTY_DEFAULT_VALUE),
            )),
        );
    }

    let model_value_set = attribute.model_value_set(context.repository());
    if !value_set.is_subset_of(&model_value_set) {
        list.add(
            finding(
                context,
                codes::VALUE_SET_NOT_IN_VALUE_SET,
                &[name.to_string(), value_set.to_string(), model_value_set.to_string()],
            )
            .with_invalid_property(ObjectProperty::new(
                object.clone(),
                codes::part_property(name, codes::PROPERTY_VALUE_SET),
            )),
        );
    }

    if !model_value_set.contains_null() && value_set.is_empty() {
        list.add(
            finding(context, codes::MANDATORY_VALUESET_IS_EMPTY, &[name.to_string()])
                .with_invalid_property(ObjectProperty::new(
                    object,
                    codes::part_property(name, codes::PROPERTY_VALUE_SET),
                )),
        );
    }
    Ok(())
}

/// Checks the value a product component holds for one of its attributes.
///
/// Each element of a multi-valued attribute is checked on its own and
/// reported with its index. Attributes without a getter and null-like
/// values are skipped.
///
/// # Errors
///
/// Returns the error of reading the value.
pub fn validate_product_attribute(
    list: &mut MessageList,
    context: &ValidationContext,
    attribute: &ProductAttribute,
    product: &ProductComponent,
    date: Option<NaiveDate>,
) -> Result<()> {
    if attribute.declaration().getter.is_none() {
        return Ok(());
    }
    let name = attribute.name();
    trace!(attribute = name, product = product.id(), "validating product attribute");

    let object = attribute.product_object(product, date)?.invalid_object();
    let value = attribute.value(product, date)?;
    let model_value_set = attribute.model_value_set(context.repository());

    let values: Vec<(Option<usize>, &Value)> = match value.as_list() {
        Some(elements) if attribute.is_multi_valued() => {
            elements.iter().enumerate().map(|(index, v)| (Some(index), v)).collect()
        }
        _ => vec![(None, &value)],
    };
    for (index, value) in values {
        if value.is_null_like() || model_value_set.contains(value) {
            continue;
        }
        let property = ObjectProperty::new(object.clone(), name);
        let property = match index {
            Some(index) => property.at(index),
            None => property,
        };
        list.add(
            finding(
                context,
                codes::PRODUCT_VALUE_NOT_IN_VALUE_SET,
                &[name.to_string(), value.to_string(), model_value_set.to_string()],
            )
            .with_invalid_property(property),
        );
    }
    Ok(())
}

/// Returns true if a configured default value is acceptable for a value set.
#[must_use]
pub fn is_default_value_valid(default_value: &Value, value_set: &ValueSet) -> bool {
    default_value.is_null_like() || value_set.contains(default_value)
}
