//! Policy-side domain objects.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::class::ClassId;
use crate::product::ProductComponent;

/// A runtime domain object the meta-model can describe.
///
/// The meta-model reaches the concrete object through [`ModelObject::as_any`]
/// and the typed accessors registered in its declaration.
pub trait ModelObject: Any + Send + Sync + fmt::Debug {
    /// The runtime class of this object.
    fn class_id(&self) -> ClassId {
        ClassId::of::<Self>()
    }

    /// Upcasts to `Any` for typed access.
    fn as_any(&self) -> &dyn Any;

    /// Upcasts to `Any` for typed mutation.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// The product component configuring this object, if it is configurable.
    fn product_component(&self) -> Option<Arc<ProductComponent>> {
        None
    }

    /// The date at which configuration is read for this object.
    fn effective_from(&self) -> Option<NaiveDate> {
        None
    }
}

/// A shared reference to a model object.
pub type ObjectRef = Arc<dyn ModelObject>;

/// Returns true if both references point to the same object.
#[must_use]
pub fn same_object(a: &ObjectRef, b: &ObjectRef) -> bool {
    Arc::ptr_eq(a, b)
}
