//! Runtime repositories: where product components, extensible enum values,
//! and tables are looked up.

use std::fmt;
use std::sync::Arc;

use im::{HashMap, Vector};
use ipsmodel_foundation::Value;
use tracing::debug;

use crate::product::ProductComponent;

/// Lookup of runtime data the meta-model needs but does not own.
pub trait RuntimeRepository: Send + Sync + fmt::Debug {
    /// Returns the product component with the given runtime id.
    fn product_component(&self, id: &str) -> Option<Arc<ProductComponent>>;

    /// Returns the values registered for an extensible enumeration.
    fn enum_values(&self, enum_type: &str) -> Vec<Value>;

    /// Returns the table with the given name.
    fn table(&self, name: &str) -> Option<Arc<TableInstance>>;

    /// Returns true if components of this repository may be modified.
    fn is_modifiable(&self) -> bool;
}

/// Contents of a table used by a product component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableInstance {
    /// Qualified table name.
    pub name: String,
    /// Name of the table structure.
    pub structure: String,
    /// Rows of values.
    pub rows: Vec<Vec<Value>>,
}

impl TableInstance {
    /// Creates an empty table.
    #[must_use]
    pub fn new(name: impl Into<String>, structure: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            structure: structure.into(),
            rows: Vec::new(),
        }
    }

    /// Adds a row.
    #[must_use]
    pub fn with_row(mut self, row: Vec<Value>) -> Self {
        self.rows.push(row);
        self
    }
}

/// An in-memory repository on persistent maps.
///
/// Cloning is O(1) and yields an independent snapshot.
#[derive(Clone, Debug)]
pub struct InMemoryRepository {
    components: HashMap<Arc<str>, Arc<ProductComponent>>,
    enum_values: HashMap<Arc<str>, Vector<Value>>,
    tables: HashMap<Arc<str>, Arc<TableInstance>>,
    modifiable: bool,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates an empty, modifiable repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            components: HashMap::new(),
            enum_values: HashMap::new(),
            tables: HashMap::new(),
            modifiable: true,
        }
    }

    /// Creates an empty repository whose components are read-only.
    #[must_use]
    pub fn read_only() -> Self {
        Self {
            modifiable: false,
            ..Self::new()
        }
    }

    /// Adds a component; it inherits the repository's modifiability.
    pub fn add_component(&mut self, mut component: ProductComponent) -> Arc<ProductComponent> {
        component.set_modifiable(self.modifiable);
        let id: Arc<str> = component.id().into();
        debug!(id = %id, class = %component.class_id(), "adding product component");
        let component = Arc::new(component);
        self.components.insert(id, Arc::clone(&component));
        component
    }

    /// Registers a value of an extensible enumeration.
    pub fn add_enum_value(&mut self, enum_type: &str, value: Value) {
        debug!(enum_type, value = %value, "registering enum value");
        self.enum_values
            .entry(enum_type.into())
            .or_default()
            .push_back(value);
    }

    /// Adds a table.
    pub fn add_table(&mut self, table: TableInstance) {
        debug!(name = %table.name, "adding table");
        self.tables.insert(table.name.as_str().into(), Arc::new(table));
    }

    /// Returns the number of components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}

impl RuntimeRepository for InMemoryRepository {
    fn product_component(&self, id: &str) -> Option<Arc<ProductComponent>> {
        self.components.get(id).cloned()
    }

    fn enum_values(&self, enum_type: &str) -> Vec<Value> {
        self.enum_values
            .get(enum_type)
            .map(|values| values.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn table(&self, name: &str) -> Option<Arc<TableInstance>> {
        self.tables.get(name).cloned()
    }

    fn is_modifiable(&self) -> bool {
        self.modifiable
    }
}
