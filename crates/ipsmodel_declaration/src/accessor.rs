//! Typed accessors bound to a runtime class.
//!
//! An accessor pairs a method name (for error reporting) with a closure
//! over `&dyn Any`. The `typed` constructors downcast to the declared class
//! and report a mismatch as an [`InvokeFailure`].

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use ipsmodel_foundation::Value;
use ipsmodel_runtime::{ObjectRef, ProductLink};
use thiserror::Error;

/// Failure of an accessor call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct InvokeFailure {
    message: String,
}

impl InvokeFailure {
    /// Creates a failure with a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The target was not an instance of `T`.
    #[must_use]
    pub fn type_mismatch<T: ?Sized>() -> Self {
        Self::new(format!("target is not a {}", std::any::type_name::<T>()))
    }

    /// The argument did not have the expected shape.
    #[must_use]
    pub fn bad_argument(argument: &impl fmt::Debug) -> Self {
        Self::new(format!("argument type mismatch: {argument:?}"))
    }

    /// Returns the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

type GetFn<R> = dyn Fn(&dyn Any) -> Result<R, InvokeFailure> + Send + Sync;
type SetFn<A> = dyn Fn(&mut dyn Any, A) -> Result<(), InvokeFailure> + Send + Sync;

/// A read accessor.
pub struct Getter<R> {
    method: Arc<str>,
    call: Arc<GetFn<R>>,
}

impl<R: 'static> Getter<R> {
    /// Creates a getter from an untyped closure.
    pub fn new(
        method: &str,
        call: impl Fn(&dyn Any) -> Result<R, InvokeFailure> + Send + Sync + 'static,
    ) -> Self {
        Self {
            method: method.into(),
            call: Arc::new(call),
        }
    }

    /// Creates a getter reading from a `T`.
    pub fn typed<T: Any>(method: &str, read: impl Fn(&T) -> R + Send + Sync + 'static) -> Self {
        Self::new(method, move |target| {
            target
                .downcast_ref::<T>()
                .map(&read)
                .ok_or_else(InvokeFailure::type_mismatch::<T>)
        })
    }

    /// Creates a fallible getter reading from a `T`.
    pub fn try_typed<T: Any>(
        method: &str,
        read: impl Fn(&T) -> Result<R, InvokeFailure> + Send + Sync + 'static,
    ) -> Self {
        Self::new(method, move |target| {
            let target = target
                .downcast_ref::<T>()
                .ok_or_else(InvokeFailure::type_mismatch::<T>)?;
            read(target)
        })
    }

    /// Returns the method name.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Invokes the getter.
    ///
    /// # Errors
    ///
    /// Returns the failure reported by the accessor.
    pub fn call(&self, target: &dyn Any) -> Result<R, InvokeFailure> {
        (self.call)(target)
    }
}

impl<R> Clone for Getter<R> {
    fn clone(&self) -> Self {
        Self {
            method: Arc::clone(&self.method),
            call: Arc::clone(&self.call),
        }
    }
}

impl<R> fmt::Debug for Getter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Getter").field(&self.method).finish()
    }
}

/// A write accessor.
pub struct Setter<A> {
    method: Arc<str>,
    call: Arc<SetFn<A>>,
}

impl<A: 'static> Setter<A> {
    /// Creates a setter from an untyped closure.
    pub fn new(
        method: &str,
        call: impl Fn(&mut dyn Any, A) -> Result<(), InvokeFailure> + Send + Sync + 'static,
    ) -> Self {
        Self {
            method: method.into(),
            call: Arc::new(call),
        }
    }

    /// Creates a setter writing to a `T`.
    pub fn typed<T: Any>(
        method: &str,
        write: impl Fn(&mut T, A) -> Result<(), InvokeFailure> + Send + Sync + 'static,
    ) -> Self {
        Self::new(method, move |target, argument| {
            let target = target
                .downcast_mut::<T>()
                .ok_or_else(InvokeFailure::type_mismatch::<T>)?;
            write(target, argument)
        })
    }

    /// Returns the method name.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Invokes the setter.
    ///
    /// # Errors
    ///
    /// Returns the failure reported by the accessor.
    pub fn call(&self, target: &mut dyn Any, argument: A) -> Result<(), InvokeFailure> {
        (self.call)(target, argument)
    }
}

impl<A> Clone for Setter<A> {
    fn clone(&self) -> Self {
        Self {
            method: Arc::clone(&self.method),
            call: Arc::clone(&self.call),
        }
    }
}

impl<A> fmt::Debug for Setter<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Setter").field(&self.method).finish()
    }
}

/// Reads an attribute value.
pub type ValueGetter = Getter<Value>;
/// Writes an attribute value.
pub type ValueSetter = Setter<Value>;
/// Reads the targets of a policy association.
pub type TargetsGetter = Getter<Vec<ObjectRef>>;
/// Replaces the target of a to-one policy association.
pub type TargetSetter = Setter<Option<ObjectRef>>;
/// Adds a target to a to-many policy association.
pub type TargetAdder = Setter<ObjectRef>;
/// Removes a target from a to-many policy association.
pub type TargetRemover = Setter<ObjectRef>;
/// Reads the links of a product association.
pub type LinksGetter = Getter<Vec<ProductLink>>;
/// Adds a link to a product association.
pub type LinkAdder = Setter<ProductLink>;
/// Removes the link to a target id from a product association.
pub type LinkRemover = Setter<Arc<str>>;
