//! Product components, their generations, and links between them.
//!
//! A product component is an envelope around a typed payload (the generated
//! product class) plus the metadata the meta-model needs: identity, validity
//! window, generations, and the generic configuration maps for formulas,
//! validation rule activation, and table usages.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use ipsmodel_foundation::CardinalityRange;

use crate::class::ClassId;
use crate::message::InvalidObject;

/// Configuration that is not reached through typed accessors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductConfiguration {
    formulas: HashMap<String, String>,
    rule_activation: HashMap<String, bool>,
    table_usages: HashMap<String, String>,
}

impl ProductConfiguration {
    /// Returns the text of a formula, if one has been entered.
    #[must_use]
    pub fn formula_text(&self, formula: &str) -> Option<&str> {
        self.formulas.get(formula).map(String::as_str)
    }

    /// Sets the text of a formula.
    pub fn set_formula_text(&mut self, formula: &str, text: impl Into<String>) {
        self.formulas.insert(formula.to_string(), text.into());
    }

    /// Returns the configured activation of a validation rule.
    #[must_use]
    pub fn rule_activation(&self, rule: &str) -> Option<bool> {
        self.rule_activation.get(rule).copied()
    }

    /// Sets the activation of a validation rule.
    pub fn set_rule_activation(&mut self, rule: &str, active: bool) {
        self.rule_activation.insert(rule.to_string(), active);
    }

    /// Returns the table name assigned to a table usage.
    #[must_use]
    pub fn table_name(&self, usage: &str) -> Option<&str> {
        self.table_usages.get(usage).map(String::as_str)
    }

    /// Assigns a table to a table usage.
    pub fn set_table_name(&mut self, usage: &str, table: impl Into<String>) {
        self.table_usages.insert(usage.to_string(), table.into());
    }
}

/// A product component.
pub struct ProductComponent {
    id: Arc<str>,
    kind_id: Arc<str>,
    version_id: Arc<str>,
    class: ClassId,
    valid_from: NaiveDate,
    valid_to: Option<NaiveDate>,
    changing_over_time: bool,
    modifiable: bool,
    payload: Box<dyn Any + Send + Sync>,
    generations: Vec<ProductGeneration>,
    configuration: ProductConfiguration,
}

impl ProductComponent {
    /// Creates a component around a payload; the class id is the payload type.
    pub fn new<T: Any + Send + Sync>(id: &str, valid_from: NaiveDate, payload: T) -> Self {
        Self {
            id: id.into(),
            kind_id: id.into(),
            version_id: "".into(),
            class: ClassId::of::<T>(),
            valid_from,
            valid_to: None,
            changing_over_time: false,
            modifiable: true,
            payload: Box::new(payload),
            generations: Vec::new(),
            configuration: ProductConfiguration::default(),
        }
    }

    /// Sets the kind and version id.
    #[must_use]
    pub fn with_kind(mut self, kind_id: &str, version_id: &str) -> Self {
        self.kind_id = kind_id.into();
        self.version_id = version_id.into();
        self
    }

    /// Overrides the class id.
    #[must_use]
    pub fn with_class(mut self, class: ClassId) -> Self {
        self.class = class;
        self
    }

    /// Sets the end of the validity window.
    #[must_use]
    pub fn with_valid_to(mut self, valid_to: NaiveDate) -> Self {
        self.valid_to = Some(valid_to);
        self
    }

    /// Marks the component as having generations.
    #[must_use]
    pub fn changing_over_time(mut self, changing_over_time: bool) -> Self {
        self.changing_over_time = changing_over_time;
        self
    }

    /// Adds a generation.
    #[must_use]
    pub fn with_generation(mut self, generation: ProductGeneration) -> Self {
        self.add_generation(generation);
        self
    }

    /// Returns the runtime id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the kind id.
    #[must_use]
    pub fn kind_id(&self) -> &str {
        &self.kind_id
    }

    /// Returns the version id.
    #[must_use]
    pub fn version_id(&self) -> &str {
        &self.version_id
    }

    /// Returns the class of the payload.
    #[must_use]
    pub const fn class_id(&self) -> ClassId {
        self.class
    }

    /// Returns the first day of validity.
    #[must_use]
    pub const fn valid_from(&self) -> NaiveDate {
        self.valid_from
    }

    /// Returns the last day of validity; `None` is unbounded.
    #[must_use]
    pub const fn valid_to(&self) -> Option<NaiveDate> {
        self.valid_to
    }

    /// Returns true if configuration lives in generations.
    #[must_use]
    pub const fn is_changing_over_time(&self) -> bool {
        self.changing_over_time
    }

    /// Returns true if the component may be modified.
    #[must_use]
    pub const fn is_modifiable(&self) -> bool {
        self.modifiable
    }

    pub(crate) fn set_modifiable(&mut self, modifiable: bool) {
        self.modifiable = modifiable;
    }

    /// Returns the payload.
    #[must_use]
    pub fn payload(&self) -> &dyn Any {
        &*self.payload
    }

    /// Returns the payload mutably.
    pub fn payload_mut(&mut self) -> &mut dyn Any {
        &mut *self.payload
    }

    /// Returns the payload as a concrete type.
    #[must_use]
    pub fn payload_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref()
    }

    /// Returns the generic configuration.
    #[must_use]
    pub const fn configuration(&self) -> &ProductConfiguration {
        &self.configuration
    }

    /// Returns the generic configuration mutably.
    pub fn configuration_mut(&mut self) -> &mut ProductConfiguration {
        &mut self.configuration
    }

    /// Returns the generations ordered by valid-from.
    #[must_use]
    pub fn generations(&self) -> &[ProductGeneration] {
        &self.generations
    }

    /// Adds a generation, keeping generations ordered by valid-from.
    pub fn add_generation(&mut self, mut generation: ProductGeneration) {
        generation.component_id = Arc::clone(&self.id);
        let position = self
            .generations
            .partition_point(|g| g.valid_from <= generation.valid_from);
        self.generations.insert(position, generation);
    }

    /// Returns the generation with the latest valid-from.
    #[must_use]
    pub fn latest_generation(&self) -> Option<&ProductGeneration> {
        self.generations.last()
    }

    /// Returns the generation with the latest valid-from mutably.
    pub fn latest_generation_mut(&mut self) -> Option<&mut ProductGeneration> {
        self.generations.last_mut()
    }

    /// Returns the generation effective at `date`.
    #[must_use]
    pub fn generation_base(&self, date: NaiveDate) -> Option<&ProductGeneration> {
        let index = self.generation_index(date)?;
        self.generations.get(index)
    }

    /// Returns the generation effective at `date` mutably.
    pub fn generation_base_mut(&mut self, date: NaiveDate) -> Option<&mut ProductGeneration> {
        let index = self.generation_index(date)?;
        self.generations.get_mut(index)
    }

    fn generation_index(&self, date: NaiveDate) -> Option<usize> {
        self.generations
            .partition_point(|g| g.valid_from <= date)
            .checked_sub(1)
    }
}

impl fmt::Debug for ProductComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductComponent")
            .field("id", &self.id)
            .field("class", &self.class)
            .field("valid_from", &self.valid_from)
            .field("valid_to", &self.valid_to)
            .field("generations", &self.generations.len())
            .finish_non_exhaustive()
    }
}

/// A generation of a product component, effective from a date.
pub struct ProductGeneration {
    component_id: Arc<str>,
    valid_from: NaiveDate,
    class: ClassId,
    payload: Box<dyn Any + Send + Sync>,
    configuration: ProductConfiguration,
}

impl ProductGeneration {
    /// Creates a generation around a payload; the class id is the payload type.
    pub fn new<T: Any + Send + Sync>(valid_from: NaiveDate, payload: T) -> Self {
        Self {
            component_id: "".into(),
            valid_from,
            class: ClassId::of::<T>(),
            payload: Box::new(payload),
            configuration: ProductConfiguration::default(),
        }
    }

    /// Overrides the class id.
    #[must_use]
    pub fn with_class(mut self, class: ClassId) -> Self {
        self.class = class;
        self
    }

    /// Returns the id of the owning component.
    #[must_use]
    pub fn component_id(&self) -> &str {
        &self.component_id
    }

    /// Returns the first day this generation is effective.
    #[must_use]
    pub const fn valid_from(&self) -> NaiveDate {
        self.valid_from
    }

    /// Returns the class of the payload.
    #[must_use]
    pub const fn class_id(&self) -> ClassId {
        self.class
    }

    /// Returns the payload.
    #[must_use]
    pub fn payload(&self) -> &dyn Any {
        &*self.payload
    }

    /// Returns the payload mutably.
    pub fn payload_mut(&mut self) -> &mut dyn Any {
        &mut *self.payload
    }

    /// Returns the payload as a concrete type.
    #[must_use]
    pub fn payload_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref()
    }

    /// Returns the generic configuration.
    #[must_use]
    pub const fn configuration(&self) -> &ProductConfiguration {
        &self.configuration
    }

    /// Returns the generic configuration mutably.
    pub fn configuration_mut(&mut self) -> &mut ProductConfiguration {
        &mut self.configuration
    }
}

impl fmt::Debug for ProductGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductGeneration")
            .field("component_id", &self.component_id)
            .field("valid_from", &self.valid_from)
            .field("class", &self.class)
            .finish_non_exhaustive()
    }
}

/// The object holding a part's configuration: a component or one of its generations.
#[derive(Clone, Copy, Debug)]
pub enum ProductObject<'a> {
    /// The component itself.
    Component(&'a ProductComponent),
    /// A generation of the component.
    Generation(&'a ProductComponent, &'a ProductGeneration),
}

impl<'a> ProductObject<'a> {
    /// Returns the component.
    #[must_use]
    pub const fn component(&self) -> &'a ProductComponent {
        match *self {
            Self::Component(c) | Self::Generation(c, _) => c,
        }
    }

    /// Returns the generation, if this is one.
    #[must_use]
    pub const fn generation(&self) -> Option<&'a ProductGeneration> {
        match *self {
            Self::Component(_) => None,
            Self::Generation(_, g) => Some(g),
        }
    }

    /// Returns the class of the payload.
    #[must_use]
    pub const fn class_id(&self) -> ClassId {
        match *self {
            Self::Component(c) => c.class_id(),
            Self::Generation(_, g) => g.class_id(),
        }
    }

    /// Returns the payload.
    #[must_use]
    pub fn payload(&self) -> &'a dyn Any {
        match *self {
            Self::Component(c) => c.payload(),
            Self::Generation(_, g) => g.payload(),
        }
    }

    /// Returns the generic configuration.
    #[must_use]
    pub const fn configuration(&self) -> &'a ProductConfiguration {
        match *self {
            Self::Component(c) => c.configuration(),
            Self::Generation(_, g) => g.configuration(),
        }
    }

    /// Returns the object to reference in validation messages.
    #[must_use]
    pub fn invalid_object(&self) -> InvalidObject {
        match *self {
            Self::Component(c) => InvalidObject::ProductComponent(Arc::clone(&c.id)),
            Self::Generation(c, g) => InvalidObject::Generation {
                component: Arc::clone(&c.id),
                valid_from: g.valid_from,
            },
        }
    }
}

impl fmt::Display for ProductObject<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Component(c) => write!(f, "{}", c.id),
            Self::Generation(c, g) => write!(f, "{} (generation {})", c.id, g.valid_from),
        }
    }
}

/// Mutable access to a component or one of its generations.
#[derive(Debug)]
pub enum ProductObjectMut<'a> {
    /// The component itself.
    Component(&'a mut ProductComponent),
    /// A generation of a component.
    Generation(&'a mut ProductGeneration),
}

impl ProductObjectMut<'_> {
    /// Returns the class of the payload.
    #[must_use]
    pub fn class_id(&self) -> ClassId {
        match self {
            Self::Component(c) => c.class_id(),
            Self::Generation(g) => g.class_id(),
        }
    }

    /// Returns the payload mutably.
    pub fn payload_mut(&mut self) -> &mut dyn Any {
        match self {
            Self::Component(c) => c.payload_mut(),
            Self::Generation(g) => g.payload_mut(),
        }
    }

    /// Returns the generic configuration mutably.
    pub fn configuration_mut(&mut self) -> &mut ProductConfiguration {
        match self {
            Self::Component(c) => c.configuration_mut(),
            Self::Generation(g) => g.configuration_mut(),
        }
    }
}

impl fmt::Display for ProductObjectMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Component(c) => write!(f, "{}", c.id),
            Self::Generation(g) => write!(f, "{} (generation {})", g.component_id, g.valid_from),
        }
    }
}

/// A link from a product component to a target component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductLink {
    /// Id of the target component.
    pub target: Arc<str>,
    /// Cardinality the target may be instantiated with on the policy side.
    pub cardinality: CardinalityRange,
}

impl ProductLink {
    /// Creates a link.
    #[must_use]
    pub fn new(target: &str, cardinality: CardinalityRange) -> Self {
        Self {
            target: target.into(),
            cardinality,
        }
    }
}
