//! Validation messages.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;

/// Severity of a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Informational.
    Info,
    /// Something is suspicious but usable.
    Warning,
    /// The configuration is invalid.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => f.write_str("info"),
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// The object a message refers to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum InvalidObject {
    /// A product component, by id.
    ProductComponent(Arc<str>),
    /// A generation of a product component.
    Generation {
        /// Id of the component.
        component: Arc<str>,
        /// Valid-from of the generation.
        valid_from: NaiveDate,
    },
    /// A link of a product association.
    Link {
        /// Id of the source component.
        source: Arc<str>,
        /// Name of the association.
        association: String,
        /// Id of the target component.
        target: Arc<str>,
    },
    /// A policy-side object, by description.
    ModelObject(String),
}

impl fmt::Display for InvalidObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProductComponent(id) => write!(f, "{id}"),
            Self::Generation {
                component,
                valid_from,
            } => write!(f, "{component} (generation {valid_from})"),
            Self::Link {
                source,
                association,
                target,
            } => write!(f, "{source}.{association} -> {target}"),
            Self::ModelObject(description) => write!(f, "{description}"),
        }
    }
}

/// An object and one of its properties that a message refers to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectProperty {
    /// The object.
    pub object: InvalidObject,
    /// The property name, if the message is about a single property.
    pub property: Option<String>,
    /// Index within a multi-valued property.
    pub index: Option<usize>,
}

impl ObjectProperty {
    /// Refers to a property of an object.
    #[must_use]
    pub fn new(object: InvalidObject, property: impl Into<String>) -> Self {
        Self {
            object,
            property: Some(property.into()),
            index: None,
        }
    }

    /// Refers to the object as a whole.
    #[must_use]
    pub const fn object(object: InvalidObject) -> Self {
        Self {
            object,
            property: None,
            index: None,
        }
    }

    /// Sets the index within a multi-valued property.
    #[must_use]
    pub const fn at(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

/// A validation message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// Stable message code.
    pub code: String,
    /// Localized text.
    pub text: String,
    /// Severity.
    pub severity: Severity,
    /// The object properties the message is about.
    pub invalid_properties: Vec<ObjectProperty>,
}

impl Message {
    /// Creates a message without object references.
    #[must_use]
    pub fn new(code: impl Into<String>, text: impl Into<String>, severity: Severity) -> Self {
        Self {
            code: code.into(),
            text: text.into(),
            severity,
            invalid_properties: Vec::new(),
        }
    }

    /// Creates an error message.
    #[must_use]
    pub fn error(code: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(code, text, Severity::Error)
    }

    /// Adds an object property reference.
    #[must_use]
    pub fn with_invalid_property(mut self, property: ObjectProperty) -> Self {
        self.invalid_properties.push(property);
        self
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.code, self.text)
    }
}

/// An ordered list of messages; validation appends to it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageList {
    messages: Vec<Message>,
}

impl MessageList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message.
    pub fn add(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Appends all messages of another list.
    pub fn add_all(&mut self, other: Self) {
        self.messages.extend(other.messages);
    }

    /// Returns the number of messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if there are no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns the messages in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    /// Returns the messages with the given code.
    pub fn by_code<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a Message> + 'a {
        self.messages.iter().filter(move |m| m.code == code)
    }

    /// Returns true if a message with the given code exists.
    #[must_use]
    pub fn contains_code(&self, code: &str) -> bool {
        self.by_code(code).next().is_some()
    }

    /// Returns the highest severity, if any message exists.
    #[must_use]
    pub fn severity(&self) -> Option<Severity> {
        self.messages.iter().map(|m| m.severity).max()
    }

    /// Returns true if any message has severity error.
    #[must_use]
    pub fn contains_errors(&self) -> bool {
        self.severity() == Some(Severity::Error)
    }
}

impl IntoIterator for MessageList {
    type Item = Message;
    type IntoIter = std::vec::IntoIter<Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}

impl<'a> IntoIterator for &'a MessageList {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
