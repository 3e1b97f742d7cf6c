//! Identity of runtime classes.

use std::fmt;

/// Identifies a runtime class: a domain object type, a product component
/// payload type, or a published interface.
///
/// Ids built with [`ClassId::of`] use the Rust type name; ids built with
/// [`ClassId::named`] can name types that exist only in a declaration.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(&'static str);

impl ClassId {
    /// The class id of a Rust type.
    #[must_use]
    pub fn of<T: ?Sized>() -> Self {
        Self(std::any::type_name::<T>())
    }

    /// A class id with an explicit name.
    #[must_use]
    pub const fn named(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the fully qualified name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }

    /// Returns the name without its module path.
    #[must_use]
    pub fn simple_name(self) -> &'static str {
        self.0.rsplit("::").next().unwrap_or(self.0)
    }
}

impl fmt::Debug for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({})", self.0)
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
