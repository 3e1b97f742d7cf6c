//! Resolution between policy-side parts and their product configuration.
//!
//! Every part that reads configuration from a product component chooses
//! between the component and one of its generations with
//! [`relevant_product_object`]. Configuration methods for default values
//! and value sets are found once per product class and cached.

use std::sync::Arc;

use chrono::NaiveDate;
use dashmap::DashMap;
use ipsmodel_declaration::{ClassId, ConfigMethodRole, MethodDeclaration};
use ipsmodel_foundation::{Error, Result};
use ipsmodel_runtime::{ProductComponent, ProductObject, ProductObjectMut};
use tracing::trace;

use crate::config::ModelConfig;
use crate::types::Type;

/// Chooses the object holding configuration that may change over time.
///
/// Configuration that does not change over time lives in the component.
/// Otherwise it lives in the generation effective at `date`, or in the
/// latest generation when no date is given.
///
/// # Errors
///
/// Returns an invocation error if the required generation does not exist.
/// With [`ModelConfig::strict_generations`] disabled, a date before the
/// first generation falls back to the latest generation.
pub fn relevant_product_object<'a>(
    component: &'a ProductComponent,
    date: Option<NaiveDate>,
    changing_over_time: bool,
    config: &ModelConfig,
) -> Result<ProductObject<'a>> {
    if !changing_over_time {
        return Ok(ProductObject::Component(component));
    }
    let generation = match date {
        None => component.latest_generation(),
        Some(date) => component.generation_base(date).or_else(|| {
            if config.strict_generations {
                None
            } else {
                component.latest_generation()
            }
        }),
    };
    generation
        .map(|generation| ProductObject::Generation(component, generation))
        .ok_or_else(|| missing_generation(component.id(), date))
}

/// Mutable variant of [`relevant_product_object`].
///
/// # Errors
///
/// Returns an invocation error if the required generation does not exist.
pub fn relevant_product_object_mut<'a>(
    component: &'a mut ProductComponent,
    date: Option<NaiveDate>,
    changing_over_time: bool,
    config: &ModelConfig,
) -> Result<ProductObjectMut<'a>> {
    if !changing_over_time {
        return Ok(ProductObjectMut::Component(component));
    }
    let id = component.id().to_string();
    let use_latest = match date {
        None => true,
        Some(date) => component.generation_base(date).is_none() && !config.strict_generations,
    };
    let generation = match date {
        Some(date) if !use_latest => component.generation_base_mut(date),
        _ => component.latest_generation_mut(),
    };
    generation
        .map(ProductObjectMut::Generation)
        .ok_or_else(|| missing_generation(&id, date))
}

fn missing_generation(component: &str, date: Option<NaiveDate>) -> Error {
    match date {
        None => Error::invocation(
            "latest_generation",
            Vec::new(),
            component,
            "product component has no generations",
        ),
        Some(date) => Error::invocation(
            "generation_base",
            vec![date.to_string()],
            component,
            format!("no generation effective at {date}"),
        ),
    }
}

/// A configuration method and where it is declared.
#[derive(Clone, Debug)]
pub(crate) struct ResolvedMethod {
    pub(crate) method: MethodDeclaration,
    /// Declared on the generation class rather than the product class.
    pub(crate) on_generation: bool,
}

/// Per-attribute cache of configuration methods by product class and role.
///
/// Concurrent misses may scan twice; the first published result wins.
#[derive(Default)]
pub(crate) struct ConfigMethodCache {
    methods: DashMap<(ClassId, ConfigMethodRole), Option<Arc<ResolvedMethod>>>,
}

impl ConfigMethodCache {
    pub(crate) fn resolve(
        &self,
        product_type: &Type,
        role: ConfigMethodRole,
        attribute: &str,
    ) -> Option<Arc<ResolvedMethod>> {
        let key = (product_type.class_id(), role);
        if let Some(entry) = self.methods.get(&key) {
            return entry.value().clone();
        }
        trace!(product = %product_type.name(), %role, attribute, "scanning for configuration method");
        let resolved = find_config_method(product_type, role, attribute).map(Arc::new);
        self.methods.entry(key).or_insert(resolved).value().clone()
    }
}

/// Scans the product type hierarchy, class methods before generation methods.
fn find_config_method(
    product_type: &Type,
    role: ConfigMethodRole,
    attribute: &str,
) -> Option<ResolvedMethod> {
    let mut found = None;
    product_type.search_type_hierarchy(&mut |ty: &Type| {
        let declaration = ty.declaration();
        let annotated = |methods: &[MethodDeclaration]| {
            methods
                .iter()
                .find(|m| m.is_annotated(role, attribute))
                .cloned()
        };
        found = annotated(&declaration.methods)
            .map(|method| ResolvedMethod {
                method,
                on_generation: false,
            })
            .or_else(|| {
                annotated(&declaration.generation_methods).map(|method| ResolvedMethod {
                    method,
                    on_generation: true,
                })
            });
        found.is_none()
    });
    found
}
