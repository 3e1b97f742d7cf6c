//! Configuration methods of product classes.
//!
//! A product class (or its generation class) declares the methods that
//! read and write the configured default value and value set of a
//! product-relevant policy attribute. The meta-model finds them by their
//! role and attribute name.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use ipsmodel_foundation::{Value, ValueSet, normalize_name};
use ipsmodel_runtime::ValidationContext;

use crate::accessor::{InvokeFailure, Setter};

/// The kind of a declared method parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    /// The validation context of the caller.
    ValidationContext,
    /// The value being written.
    Value,
    /// Any other parameter, by type name.
    Other(&'static str),
}

/// The role a configuration method plays for its attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConfigMethodRole {
    /// Reads the configured default value.
    DefaultValueGetter,
    /// Writes the configured default value.
    DefaultValueSetter,
    /// Reads the configured value set.
    ValueSetGetter,
    /// Writes the configured value set.
    ValueSetSetter,
}

impl fmt::Display for ConfigMethodRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DefaultValueGetter => "default value getter",
            Self::DefaultValueSetter => "default value setter",
            Self::ValueSetGetter => "value set getter",
            Self::ValueSetSetter => "value set setter",
        };
        f.write_str(name)
    }
}

type ReadFn<R> = dyn Fn(&dyn Any, &ValidationContext) -> Result<R, InvokeFailure> + Send + Sync;

/// The typed implementation of a method.
#[derive(Clone)]
pub enum MethodBody {
    /// Returns a value.
    ReadValue(Arc<ReadFn<Value>>),
    /// Returns a value set.
    ReadValueSet(Arc<ReadFn<ValueSet>>),
    /// Writes a value.
    WriteValue(Setter<Value>),
    /// Writes a value set.
    WriteValueSet(Setter<ValueSet>),
}

impl fmt::Debug for MethodBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadValue(_) => write!(f, "ReadValue"),
            Self::ReadValueSet(_) => write!(f, "ReadValueSet"),
            Self::WriteValue(s) => write!(f, "WriteValue({})", s.method()),
            Self::WriteValueSet(s) => write!(f, "WriteValueSet({})", s.method()),
        }
    }
}

/// A method declared on a product class or its generation class.
#[derive(Clone, Debug)]
pub struct MethodDeclaration {
    /// Method name.
    pub name: String,
    /// Declared parameters in order.
    pub parameters: Vec<ParameterKind>,
    /// Role and attribute name, if the method is a configuration method.
    pub annotation: Option<(ConfigMethodRole, String)>,
    /// Implementation.
    pub body: MethodBody,
}

fn read<T: Any, R: 'static>(
    read: impl Fn(&T, &ValidationContext) -> R + Send + Sync + 'static,
) -> impl Fn(&dyn Any, &ValidationContext) -> Result<R, InvokeFailure> + Send + Sync + 'static {
    move |target, context| {
        target
            .downcast_ref::<T>()
            .map(|t| read(t, context))
            .ok_or_else(InvokeFailure::type_mismatch::<T>)
    }
}

impl MethodDeclaration {
    fn annotated(
        name: &str,
        role: ConfigMethodRole,
        attribute: &str,
        parameters: Vec<ParameterKind>,
        body: MethodBody,
    ) -> Self {
        Self {
            name: name.to_string(),
            parameters,
            annotation: Some((role, attribute.to_string())),
            body,
        }
    }

    /// A default value getter without parameters.
    pub fn default_value_getter<T: Any>(
        name: &str,
        attribute: &str,
        getter: impl Fn(&T) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self::annotated(
            name,
            ConfigMethodRole::DefaultValueGetter,
            attribute,
            Vec::new(),
            MethodBody::ReadValue(Arc::new(read::<T, _>(move |t, _| getter(t)))),
        )
    }

    /// A default value getter taking the validation context.
    pub fn default_value_getter_in_context<T: Any>(
        name: &str,
        attribute: &str,
        getter: impl Fn(&T, &ValidationContext) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self::annotated(
            name,
            ConfigMethodRole::DefaultValueGetter,
            attribute,
            vec![ParameterKind::ValidationContext],
            MethodBody::ReadValue(Arc::new(read::<T, _>(getter))),
        )
    }

    /// A value set getter without parameters.
    pub fn value_set_getter<T: Any>(
        name: &str,
        attribute: &str,
        getter: impl Fn(&T) -> ValueSet + Send + Sync + 'static,
    ) -> Self {
        Self::annotated(
            name,
            ConfigMethodRole::ValueSetGetter,
            attribute,
            Vec::new(),
            MethodBody::ReadValueSet(Arc::new(read::<T, _>(move |t, _| getter(t)))),
        )
    }

    /// A value set getter taking the validation context.
    pub fn value_set_getter_in_context<T: Any>(
        name: &str,
        attribute: &str,
        getter: impl Fn(&T, &ValidationContext) -> ValueSet + Send + Sync + 'static,
    ) -> Self {
        Self::annotated(
            name,
            ConfigMethodRole::ValueSetGetter,
            attribute,
            vec![ParameterKind::ValidationContext],
            MethodBody::ReadValueSet(Arc::new(read::<T, _>(getter))),
        )
    }

    /// A default value setter.
    pub fn default_value_setter<T: Any>(
        name: &str,
        attribute: &str,
        setter: impl Fn(&mut T, Value) -> Result<(), InvokeFailure> + Send + Sync + 'static,
    ) -> Self {
        Self::annotated(
            name,
            ConfigMethodRole::DefaultValueSetter,
            attribute,
            vec![ParameterKind::Value],
            MethodBody::WriteValue(Setter::typed::<T>(name, setter)),
        )
    }

    /// A value set setter.
    pub fn value_set_setter<T: Any>(
        name: &str,
        attribute: &str,
        setter: impl Fn(&mut T, ValueSet) -> Result<(), InvokeFailure> + Send + Sync + 'static,
    ) -> Self {
        Self::annotated(
            name,
            ConfigMethodRole::ValueSetSetter,
            attribute,
            vec![ParameterKind::Value],
            MethodBody::WriteValueSet(Setter::typed::<T>(name, setter)),
        )
    }

    /// Replaces the declared parameters.
    #[must_use]
    pub fn with_parameters(mut self, parameters: Vec<ParameterKind>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Returns the role, if the method is a configuration method.
    #[must_use]
    pub fn role(&self) -> Option<ConfigMethodRole> {
        self.annotation.as_ref().map(|(role, _)| *role)
    }

    /// Returns true if this method plays `role` for the named attribute.
    #[must_use]
    pub fn is_annotated(&self, role: ConfigMethodRole, attribute: &str) -> bool {
        self.annotation
            .as_ref()
            .is_some_and(|(r, a)| *r == role && normalize_name(a) == normalize_name(attribute))
    }

    /// Returns true if the method takes the validation context.
    #[must_use]
    pub fn takes_context(&self) -> bool {
        self.parameters.contains(&ParameterKind::ValidationContext)
    }
}
