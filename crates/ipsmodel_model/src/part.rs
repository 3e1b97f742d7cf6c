//! State shared by every part of a type, and the per-type part index.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use indexmap::IndexMap;
use ipsmodel_declaration::{ExtensionProperties, InvokeFailure};
use ipsmodel_foundation::{
    Deprecation, DeprecationMarker, Error, ErrorContext, Locale, PartKind, Result, normalize_name,
};
use ipsmodel_runtime::{ProductComponent, ProductObject, ProductObjectMut};

use crate::configuration::{relevant_product_object, relevant_product_object_mut};
use crate::element::{DocumentationKind, resolve_documentation};
use crate::types::{Type, TypeCore};

/// Name, owner, and metadata of a part.
pub(crate) struct PartCore {
    pub(crate) name: String,
    pub(crate) kind: PartKind,
    pub(crate) owner: Arc<TypeCore>,
    pub(crate) deprecation: Option<Deprecation>,
    pub(crate) extension_properties: ExtensionProperties,
}

impl PartCore {
    pub(crate) fn new(
        owner: &Arc<TypeCore>,
        kind: PartKind,
        name: &str,
        deprecation: Option<&DeprecationMarker>,
        extension_properties: &ExtensionProperties,
    ) -> Self {
        Self {
            name: name.to_string(),
            kind,
            owner: Arc::clone(owner),
            deprecation: Deprecation::of(deprecation),
            extension_properties: extension_properties.clone(),
        }
    }

    /// Kind segment of documentation keys.
    const fn kind_name(&self) -> &'static str {
        match self.kind {
            PartKind::Type => "type",
            PartKind::Attribute => "attribute",
            PartKind::Association => "association",
            PartKind::ValidationRule => "validationRule",
            PartKind::TableUsage => "tableUsage",
            PartKind::Formula => "formula",
        }
    }

    pub(crate) fn documentation_key(&self, kind: DocumentationKind) -> String {
        format!(
            "{}-{}-{}_{}",
            self.owner.declaration.name,
            self.kind_name(),
            self.name,
            kind.key()
        )
    }

    pub(crate) fn documentation(
        &self,
        kind: DocumentationKind,
        locale: &Locale,
        inherited: impl FnOnce() -> Option<String>,
    ) -> Option<String> {
        resolve_documentation(
            self.owner.declaration.documentation.as_ref(),
            &self.documentation_key(kind),
            locale,
            &self.owner.config.default_locale,
            inherited,
        )
    }

    pub(crate) fn owning_type(&self) -> Result<Type> {
        self.owner.registry()?.type_of(self.owner.declaration.class)
    }

    pub(crate) fn super_type(&self) -> Option<&Type> {
        self.owner.super_type.as_ref()
    }

    pub(crate) fn relevant<'a>(
        &self,
        product: &'a ProductComponent,
        date: Option<NaiveDate>,
        changing_over_time: bool,
    ) -> Result<ProductObject<'a>> {
        relevant_product_object(product, date, changing_over_time, &self.owner.config)
    }

    /// Mutable relevant product object; fails if the component is read-only.
    pub(crate) fn relevant_mut<'a>(
        &self,
        product: &'a mut ProductComponent,
        date: Option<NaiveDate>,
        changing_over_time: bool,
    ) -> Result<ProductObjectMut<'a>> {
        if !product.is_modifiable() {
            return Err(Error::illegal_modification(product.id()).with_context(self.context()));
        }
        relevant_product_object_mut(product, date, changing_over_time, &self.owner.config)
    }

    pub(crate) fn context(&self) -> ErrorContext {
        ErrorContext::new()
            .with_type(self.owner.declaration.name.as_str())
            .with_part(self.name.as_str())
    }

    pub(crate) fn configuration_error(&self, message: impl Into<String>) -> Error {
        Error::configuration(message).with_context(self.context())
    }

    pub(crate) fn invocation_error(
        &self,
        method: &str,
        arguments: Vec<String>,
        object: &dyn fmt::Display,
        failure: &InvokeFailure,
    ) -> Error {
        Error::invocation(method, arguments, object.to_string(), failure.message())
            .with_context(self.context())
    }
}

impl fmt::Display for PartCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.owner.declaration.name, self.name)
    }
}

/// Parts of one kind declared in one type, keyed by normalized name.
pub(crate) struct PartMap<P> {
    parts: IndexMap<String, P>,
    aliases: HashMap<String, String>,
}

impl<P> Default for PartMap<P> {
    fn default() -> Self {
        Self {
            parts: IndexMap::new(),
            aliases: HashMap::new(),
        }
    }
}

impl<P> PartMap<P> {
    pub(crate) fn insert(&mut self, name: &str, part: P, kind: PartKind, scope: &str) -> Result<()> {
        let key = normalize_name(name);
        if self.parts.contains_key(&key) || self.aliases.contains_key(&key) {
            return Err(Error::configuration(format!(
                "duplicate {kind} {name} in {scope}"
            )));
        }
        self.parts.insert(key, part);
        Ok(())
    }

    /// Makes a part also reachable under an alternative name.
    pub(crate) fn alias(&mut self, alias: &str, name: &str) {
        let alias = normalize_name(alias);
        let name = normalize_name(name);
        if alias != name && !self.parts.contains_key(&alias) {
            self.aliases.insert(alias, name);
        }
    }

    pub(crate) fn get(&self, name: &str) -> Option<&P> {
        let key = normalize_name(name);
        self.parts.get(&key).or_else(|| {
            self.aliases
                .get(&key)
                .and_then(|target| self.parts.get(target))
        })
    }

    pub(crate) fn get_index(&self, index: usize) -> Option<&P> {
        self.parts.get_index(index).map(|(_, part)| part)
    }

    pub(crate) fn len(&self) -> usize {
        self.parts.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&String, &P)> {
        self.parts.iter()
    }

    pub(crate) fn values(&self) -> impl Iterator<Item = &P> {
        self.parts.values()
    }
}
