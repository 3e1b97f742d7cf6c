//! Sources of type declarations.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use ipsmodel_foundation::{Error, Result};
use ipsmodel_runtime::ClassId;

use crate::type_decl::TypeDeclaration;

/// Supplies the declaration of a runtime class.
pub trait DeclarationProvider: Send + Sync + fmt::Debug {
    /// Returns the declaration of a class or of its published interface.
    fn declaration(&self, class: ClassId) -> Option<Arc<TypeDeclaration>>;

    /// Returns all declarations this provider knows.
    fn declarations(&self) -> Vec<Arc<TypeDeclaration>>;
}

/// An in-memory declaration provider.
#[derive(Debug, Default)]
pub struct DeclarationRegistry {
    by_class: IndexMap<ClassId, Arc<TypeDeclaration>>,
    interfaces: HashMap<ClassId, ClassId>,
}

impl DeclarationRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a declaration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the class or its published
    /// interface is already registered.
    pub fn register(&mut self, declaration: TypeDeclaration) -> Result<()> {
        let class = declaration.class;
        if self.by_class.contains_key(&class) || self.interfaces.contains_key(&class) {
            return Err(Error::configuration(format!(
                "class {class} is already declared"
            )));
        }
        if let Some(interface) = declaration.published_interface {
            if self.by_class.contains_key(&interface) || self.interfaces.contains_key(&interface) {
                return Err(Error::configuration(format!(
                    "published interface {interface} is already declared"
                )));
            }
            self.interfaces.insert(interface, class);
        }
        self.by_class.insert(class, Arc::new(declaration));
        Ok(())
    }

    /// Registers a declaration, builder style.
    ///
    /// # Errors
    ///
    /// See [`DeclarationRegistry::register`].
    pub fn with(mut self, declaration: TypeDeclaration) -> Result<Self> {
        self.register(declaration)?;
        Ok(self)
    }

    /// Returns the number of registered declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_class.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_class.is_empty()
    }
}

impl DeclarationProvider for DeclarationRegistry {
    fn declaration(&self, class: ClassId) -> Option<Arc<TypeDeclaration>> {
        let class = self.interfaces.get(&class).copied().unwrap_or(class);
        self.by_class.get(&class).cloned()
    }

    fn declarations(&self) -> Vec<Arc<TypeDeclaration>> {
        self.by_class.values().cloned().collect()
    }
}
