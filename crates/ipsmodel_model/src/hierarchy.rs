//! Walking a type and its supertypes.

use std::collections::HashSet;

use crate::part::PartMap;
use crate::types::{Type, TypeParts};

/// Visits the types of a hierarchy from the leaf upwards.
///
/// See [`Type::search_type_hierarchy`].
pub trait TypeHierarchyVisitor {
    /// Visits one type; returns false to stop the walk.
    fn visit_type(&mut self, ty: &Type) -> bool;
}

impl<F: FnMut(&Type) -> bool> TypeHierarchyVisitor for F {
    fn visit_type(&mut self, ty: &Type) -> bool {
        self(ty)
    }
}

pub(crate) type PartSelector<P> = fn(&TypeParts) -> &PartMap<P>;

/// Finds the most specific part with a name.
pub(crate) struct PartFinder<'n, P> {
    name: &'n str,
    select: PartSelector<P>,
    pub(crate) found: Option<P>,
}

impl<'n, P> PartFinder<'n, P> {
    pub(crate) const fn new(name: &'n str, select: PartSelector<P>) -> Self {
        Self {
            name,
            select,
            found: None,
        }
    }
}

impl<P: Clone> TypeHierarchyVisitor for PartFinder<'_, P> {
    fn visit_type(&mut self, ty: &Type) -> bool {
        self.found = (self.select)(ty.parts()).get(self.name).cloned();
        self.found.is_none()
    }
}

/// Collects the parts of a hierarchy; a name seen lower in the hierarchy
/// masks the same name further up.
pub(crate) struct PartCollector<P> {
    select: PartSelector<P>,
    seen: HashSet<String>,
    pub(crate) parts: Vec<P>,
}

impl<P> PartCollector<P> {
    pub(crate) fn new(select: PartSelector<P>) -> Self {
        Self {
            select,
            seen: HashSet::new(),
            parts: Vec::new(),
        }
    }
}

impl<P: Clone> TypeHierarchyVisitor for PartCollector<P> {
    fn visit_type(&mut self, ty: &Type) -> bool {
        for (key, part) in (self.select)(ty.parts()).iter() {
            if self.seen.insert(key.clone()) {
                self.parts.push(part.clone());
            }
        }
        true
    }
}
