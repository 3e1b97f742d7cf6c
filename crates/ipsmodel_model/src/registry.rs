//! The model registry: one [`Type`] per declared class.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use ipsmodel_declaration::{ClassId, DeclarationProvider};
use ipsmodel_foundation::{Error, PartKind, Result};
use ipsmodel_runtime::{ModelObject, ProductComponent};
use once_cell::sync::OnceCell;
use tracing::debug;

use crate::config::ModelConfig;
use crate::types::{PolicyCmptType, ProductCmptType, Type};

static GLOBAL: OnceCell<ModelRegistry> = OnceCell::new();

pub(crate) struct RegistryInner {
    provider: Arc<dyn DeclarationProvider>,
    config: ModelConfig,
    types: DashMap<ClassId, Type>,
}

/// Builds and memoizes the types of the declared classes.
///
/// Types are built on first request, supertypes before subtypes, and kept
/// for the lifetime of the registry. Concurrent first requests for the same
/// class may build it twice; only the first published instance is handed
/// out, so every caller sees the same `Type`.
///
/// Cloning a registry is cheap and shares its types.
#[derive(Clone)]
pub struct ModelRegistry {
    inner: Arc<RegistryInner>,
}

impl ModelRegistry {
    /// Creates a registry over a declaration provider with the default configuration.
    pub fn new(provider: impl DeclarationProvider + 'static) -> Self {
        Self::with_config(provider, ModelConfig::default())
    }

    /// Creates a registry with a configuration.
    pub fn with_config(provider: impl DeclarationProvider + 'static, config: ModelConfig) -> Self {
        Self::from_provider(Arc::new(provider), config)
    }

    /// Creates a registry over a shared provider.
    #[must_use]
    pub fn from_provider(provider: Arc<dyn DeclarationProvider>, config: ModelConfig) -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                provider,
                config,
                types: DashMap::new(),
            }),
        }
    }

    pub(crate) const fn from_inner(inner: Arc<RegistryInner>) -> Self {
        Self { inner }
    }

    /// Installs the process-wide registry.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a registry is already installed.
    pub fn install(registry: ModelRegistry) -> Result<()> {
        GLOBAL
            .set(registry)
            .map_err(|_| Error::configuration("a model registry is already installed"))
    }

    /// Returns the process-wide registry, if one is installed.
    #[must_use]
    pub fn global() -> Option<&'static ModelRegistry> {
        GLOBAL.get()
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ModelConfig {
        &self.inner.config
    }

    /// Returns the declaration provider.
    #[must_use]
    pub fn provider(&self) -> &dyn DeclarationProvider {
        self.inner.provider.as_ref()
    }

    /// Returns the number of types built so far.
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.inner.types.len()
    }

    /// Returns the type of a class or of its published interface.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an undeclared class and a
    /// configuration error for an inconsistent declaration.
    pub fn type_of(&self, class: ClassId) -> Result<Type> {
        self.resolve(class, &mut Vec::new())
    }

    fn resolve(&self, class: ClassId, chain: &mut Vec<ClassId>) -> Result<Type> {
        let declaration = self
            .inner
            .provider
            .declaration(class)
            .ok_or_else(|| Error::not_declared(PartKind::Type, class.name(), "the model"))?;
        let class = declaration.class;
        if let Some(ty) = self.inner.types.get(&class) {
            return Ok(ty.value().clone());
        }
        if chain.contains(&class) {
            return Err(Error::configuration(format!(
                "type hierarchy of {} is cyclic",
                declaration.name
            )));
        }

        chain.push(class);
        let super_type = declaration
            .super_class
            .map(|super_class| self.resolve(super_class, chain))
            .transpose()?;
        chain.pop();

        let built = Type::build(
            declaration,
            super_type,
            Arc::downgrade(&self.inner),
            self.inner.config.clone(),
        )?;
        debug!(type_name = %built.name(), %class, "built model type");
        Ok(self.inner.types.entry(class).or_insert(built).value().clone())
    }

    /// Returns the policy component type of a class.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the class is a product class.
    pub fn policy_cmpt_type(&self, class: ClassId) -> Result<PolicyCmptType> {
        PolicyCmptType::try_from(self.type_of(class)?)
    }

    /// Returns the policy component type of a model object.
    ///
    /// # Errors
    ///
    /// See [`ModelRegistry::policy_cmpt_type`].
    pub fn policy_cmpt_type_of(&self, object: &dyn ModelObject) -> Result<PolicyCmptType> {
        self.policy_cmpt_type(object.class_id())
    }

    /// Returns the product component type of a class.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the class is a policy class.
    pub fn product_cmpt_type(&self, class: ClassId) -> Result<ProductCmptType> {
        ProductCmptType::try_from(self.type_of(class)?)
    }

    /// Returns the product component type of a product component.
    ///
    /// # Errors
    ///
    /// See [`ModelRegistry::product_cmpt_type`].
    pub fn product_cmpt_type_of(&self, component: &ProductComponent) -> Result<ProductCmptType> {
        self.product_cmpt_type(component.class_id())
    }

    /// Returns true if the class is declared as a policy component type.
    #[must_use]
    pub fn is_policy_cmpt_type(&self, class: ClassId) -> bool {
        self.inner
            .provider
            .declaration(class)
            .is_some_and(|declaration| declaration.is_policy())
    }

    /// Returns true if the class is declared as a product component type.
    #[must_use]
    pub fn is_product_cmpt_type(&self, class: ClassId) -> bool {
        self.inner
            .provider
            .declaration(class)
            .is_some_and(|declaration| declaration.is_product())
    }
}

impl fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("types", &self.inner.types.len())
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}
