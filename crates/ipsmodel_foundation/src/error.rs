//! Error types for the ipsmodel system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

/// The main error type for ipsmodel operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a not-found error for a part searched in the whole hierarchy of `scope`.
    #[must_use]
    pub fn not_found(kind: PartKind, name: impl Into<String>, scope: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound {
            kind,
            name: name.into(),
            scope: scope.into(),
            lookup: Lookup::Hierarchy,
        })
    }

    /// Creates a not-found error for a part that is not declared exactly in `scope`.
    #[must_use]
    pub fn not_declared(kind: PartKind, name: impl Into<String>, scope: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound {
            kind,
            name: name.into(),
            scope: scope.into(),
            lookup: Lookup::Declared,
        })
    }

    /// Creates an index out of bounds error.
    #[must_use]
    pub fn index_out_of_bounds(index: usize, length: usize) -> Self {
        Self::new(ErrorKind::IndexOutOfBounds { index, length })
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration(message.into()))
    }

    /// Creates an invocation error.
    #[must_use]
    pub fn invocation(
        method: impl Into<String>,
        arguments: Vec<String>,
        object: impl Into<String>,
        cause: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::Invocation {
            method: method.into(),
            arguments,
            object: object.into(),
            cause: cause.into(),
        })
    }

    /// Creates an illegal modification error.
    #[must_use]
    pub fn illegal_modification(component: impl Into<String>) -> Self {
        Self::new(ErrorKind::IllegalModification {
            component: component.into(),
        })
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Returns true if this is a not-found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound { .. })
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self.kind, ErrorKind::Configuration(_))
    }

    /// Returns true if this is an invocation error.
    #[must_use]
    pub const fn is_invocation(&self) -> bool {
        matches!(self.kind, ErrorKind::Invocation { .. })
    }

    /// Returns true if this is an illegal modification error.
    #[must_use]
    pub const fn is_illegal_modification(&self) -> bool {
        matches!(self.kind, ErrorKind::IllegalModification { .. })
    }
}

/// The kind of model element a lookup was searching for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    /// A policy or product component type.
    Type,
    /// An attribute.
    Attribute,
    /// An association.
    Association,
    /// A validation rule.
    ValidationRule,
    /// A table usage.
    TableUsage,
    /// A formula.
    Formula,
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Type => "type",
            Self::Attribute => "attribute",
            Self::Association => "association",
            Self::ValidationRule => "validation rule",
            Self::TableUsage => "table usage",
            Self::Formula => "formula",
        };
        f.write_str(name)
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A named element does not exist.
    #[error("{kind} not found: {name} {lookup} {scope}")]
    NotFound {
        /// What was searched for.
        kind: PartKind,
        /// The name that was searched for.
        name: String,
        /// The type (or registry) that was searched.
        scope: String,
        /// Whether the whole hierarchy or only the exact type was consulted.
        lookup: Lookup,
    },

    /// A declared-part index accessor was out of range.
    #[error("index out of bounds: {index} (length {length})")]
    IndexOutOfBounds {
        /// The index that was accessed.
        index: usize,
        /// The number of declared parts.
        length: usize,
    },

    /// The model lacks what an operation requires, or forbids the operation.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A resolved accessor failed or could not be invoked.
    #[error("invocation of {method}({}) on {object} failed: {cause}", .arguments.join(", "))]
    Invocation {
        /// Name of the accessor method.
        method: String,
        /// Rendered arguments.
        arguments: Vec<String>,
        /// Description of the object the method was invoked on.
        object: String,
        /// Underlying failure.
        cause: String,
    },

    /// A mutation was attempted on a component from a read-only repository.
    #[error("illegal modification of {component}: repository is not modifiable")]
    IllegalModification {
        /// The component that was to be modified.
        component: String,
    },

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// How far a name lookup searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// The type and all of its supertypes.
    Hierarchy,
    /// Only the exact type.
    Declared,
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hierarchy => f.write_str("in hierarchy of"),
            Self::Declared => f.write_str("is not declared in"),
        }
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Name of the type the operation ran on.
    pub type_name: Option<String>,
    /// Name of the part the operation ran on.
    pub part_name: Option<String>,
    /// Stack of resolution steps.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the type name.
    #[must_use]
    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Sets the part name.
    #[must_use]
    pub fn with_part(mut self, part_name: impl Into<String>) -> Self {
        self.part_name = Some(part_name.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.type_name, &self.part_name) {
            (Some(ty), Some(part)) => write!(f, "at {ty}.{part}")?,
            (Some(ty), None) => write!(f, "at {ty}")?,
            (None, Some(part)) => write!(f, "at {part}")?,
            (None, None) => {}
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
