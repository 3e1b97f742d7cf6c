//! Checks of product association links.
//!
//! The link count is checked against the product association's own
//! cardinality. The cardinalities of the individual links are checked
//! against the policy association the product association configures: the
//! policy side must be able to instantiate every combination the links
//! allow. Finally each target must be valid for the whole validity period
//! of its source.

use std::sync::Arc;

use chrono::NaiveDate;
use ipsmodel_foundation::{Cardinality, Result};
use ipsmodel_model::{ModelElement, ProductAssociation};
use ipsmodel_runtime::{
    InvalidObject, MessageList, ObjectProperty, ProductComponent, ProductLink, ValidationContext,
};
use tracing::trace;

use crate::codes;
use crate::messages::finding;

/// Checks the links a product component holds for an association.
///
/// Derived unions have no links of their own and are skipped. So are
/// associations that declare no links getter: their links cannot be read,
/// and [`ProductAssociation::links`] reports them as configuration errors
/// instead. Targets the context's repository does not know are skipped by
/// the validity checks.
///
/// # Errors
///
/// Returns the error of reading the links or resolving the matching
/// policy association.
pub fn validate_product_association(
    list: &mut MessageList,
    context: &ValidationContext,
    association: &ProductAssociation,
    product: &ProductComponent,
    date: Option<NaiveDate>,
) -> Result<()> {
    if association.is_derived_union() || association.declaration().links_getter.is_none() {
        return Ok(());
    }
    let name = association.name();
    trace!(association = name, product = product.id(), "validating product association");

    let object = association.product_object(product, date)?.invalid_object();
    let links = association.links(product, date)?;
    validate_link_count(list, context, association, &object, links.len());

    if let Some(policy_association) = association.matching_policy_association()? {
        validate_link_cardinalities(
            list,
            context,
            name,
            product,
            &links,
            policy_association.min_cardinality(),
            policy_association.max_cardinality(),
        );
    }

    if let Some(repository) = context.repository() {
        for link in &links {
            if let Some(target) = repository.product_component(&link.target) {
                validate_validity_window(list, context, name, product, &target);
            }
        }
    }
    Ok(())
}

fn validate_link_count(
    list: &mut MessageList,
    context: &ValidationContext,
    association: &ProductAssociation,
    object: &InvalidObject,
    count: usize,
) {
    let name = association.name();
    let count = u32::try_from(count).unwrap_or(u32::MAX);
    let min = association.min_cardinality();
    let max = association.max_cardinality();
    if count < min {
        list.add(
            finding(
                context,
                codes::MIN_CARDINALITY_NOT_REACHED,
                &[name.to_string(), count.to_string(), min.to_string()],
            )
            .with_invalid_property(ObjectProperty::new(object.clone(), name)),
        );
    }
    if !max.admits(count) {
        list.add(
            finding(
                context,
                codes::MAX_CARDINALITY_EXCEEDED,
                &[name.to_string(), count.to_string(), max.to_string()],
            )
            .with_invalid_property(ObjectProperty::new(object.clone(), name)),
        );
    }
}

fn validate_link_cardinalities(
    list: &mut MessageList,
    context: &ValidationContext,
    association: &str,
    product: &ProductComponent,
    links: &[ProductLink],
    policy_min: u32,
    policy_max: Cardinality,
) {
    for (index, link) in links.iter().enumerate() {
        let link_object = InvalidObject::Link {
            source: Arc::from(product.id()),
            association: association.to_string(),
            target: Arc::clone(&link.target),
        };

        let possible_max = possible_max(links, index);
        if possible_max > policy_max {
            list.add(
                finding(
                    context,
                    codes::MAX_CARDINALITY_EXCEEDS_MODEL_MAX,
                    &[
                        association.to_string(),
                        link.target.to_string(),
                        possible_max.to_string(),
                        policy_max.to_string(),
                    ],
                )
                .with_invalid_property(ObjectProperty::new(
                    link_object.clone(),
                    codes::PROPERTY_MAX_CARDINALITY,
                )),
            );
        }

        let possible_min = possible_min(links, index);
        if possible_min < Cardinality::Bounded(policy_min) {
            list.add(
                finding(
                    context,
                    codes::MIN_CARDINALITY_FALLS_BELOW_MODEL_MIN,
                    &[
                        association.to_string(),
                        link.target.to_string(),
                        possible_min.to_string(),
                        policy_min.to_string(),
                    ],
                )
                .with_invalid_property(ObjectProperty::new(
                    link_object,
                    codes::PROPERTY_MIN_CARDINALITY,
                )),
            );
        }
    }
}

fn validate_validity_window(
    list: &mut MessageList,
    context: &ValidationContext,
    association: &str,
    source: &ProductComponent,
    target: &ProductComponent,
) {
    let link_object = InvalidObject::Link {
        source: Arc::from(source.id()),
        association: association.to_string(),
        target: Arc::from(target.id()),
    };
    if target.valid_from() > source.valid_from() {
        list.add(
            finding(
                context,
                codes::TARGET_VALID_FROM_AFTER_SOURCE,
                &[
                    target.id().to_string(),
                    target.valid_from().to_string(),
                    source.valid_from().to_string(),
                ],
            )
            .with_invalid_property(ObjectProperty::new(
                link_object.clone(),
                codes::PROPERTY_VALID_FROM,
            )),
        );
    }
    if is_valid_to_before(target.valid_to(), source.valid_to()) {
        list.add(
            finding(
                context,
                codes::TARGET_VALID_TO_BEFORE_SOURCE,
                &[
                    target.id().to_string(),
                    display_valid_to(target.valid_to()),
                    display_valid_to(source.valid_to()),
                ],
            )
            .with_invalid_property(ObjectProperty::new(link_object, codes::PROPERTY_VALID_TO)),
        );
    }
}

/// Returns the largest number of policy-side targets the links allow when
/// the link at `index` is used at its maximum and every other link at its
/// minimum.
#[must_use]
pub fn possible_max(links: &[ProductLink], index: usize) -> Cardinality {
    links
        .iter()
        .enumerate()
        .fold(Cardinality::Bounded(0), |sum, (i, link)| {
            let bound = if i == index {
                link.cardinality.max
            } else {
                Cardinality::Bounded(link.cardinality.min)
            };
            sum.saturating_add(bound)
        })
}

/// Returns the number of policy-side targets reached when the link at
/// `index` is used at its minimum and every other link at its maximum.
#[must_use]
pub fn possible_min(links: &[ProductLink], index: usize) -> Cardinality {
    links
        .iter()
        .enumerate()
        .fold(Cardinality::Bounded(0), |sum, (i, link)| {
            let bound = if i == index {
                Cardinality::Bounded(link.cardinality.min)
            } else {
                link.cardinality.max
            };
            sum.saturating_add(bound)
        })
}

/// A missing valid-to means valid forever.
fn is_valid_to_before(target: Option<NaiveDate>, source: Option<NaiveDate>) -> bool {
    match (target, source) {
        (Some(target), Some(source)) => target < source,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

fn display_valid_to(valid_to: Option<NaiveDate>) -> String {
    valid_to.map_or_else(|| "-".to_string(), |date| date.to_string())
}
