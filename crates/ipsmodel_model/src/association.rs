//! Associations between component types.
//!
//! Policy associations connect model objects. Product associations connect
//! product components through links that carry the cardinality the target
//! may be instantiated with. A policy association and the product
//! association configuring it refer to each other by name only; the pair is
//! resolved through the registry when asked for.

use std::fmt;
use std::ops::Deref;
use std::sync::{Arc, Weak};

use chrono::NaiveDate;
use ipsmodel_declaration::{AssociationDeclaration, AssociationKind, ClassId, ExtensionProperties};
use ipsmodel_foundation::{
    Cardinality, CardinalityRange, Deprecation, Locale, PartKind, Result,
};
use ipsmodel_runtime::{
    ModelObject, ObjectRef, ProductComponent, ProductLink, ProductObject, RuntimeRepository,
    same_object,
};
use once_cell::race::OnceBox;

use crate::element::{DocumentationKind, ModelElement};
use crate::part::PartCore;
use crate::types::{Type, TypeCore};

struct AssociationInner {
    part: PartCore,
    declaration: AssociationDeclaration,
    matching: OnceBox<Weak<AssociationInner>>,
}

/// An association of a type.
#[derive(Clone)]
pub struct Association(Arc<AssociationInner>);

impl Association {
    pub(crate) fn build(owner: &Arc<TypeCore>, declaration: &AssociationDeclaration) -> Self {
        Self(Arc::new(AssociationInner {
            part: PartCore::new(
                owner,
                PartKind::Association,
                &declaration.name,
                declaration.deprecation.as_ref(),
                &declaration.extension_properties,
            ),
            declaration: declaration.clone(),
            matching: OnceBox::new(),
        }))
    }

    fn part(&self) -> &PartCore {
        &self.0.part
    }

    /// Returns the declaration.
    #[must_use]
    pub fn declaration(&self) -> &AssociationDeclaration {
        &self.0.declaration
    }

    /// Returns the plural name.
    #[must_use]
    pub fn plural_name(&self) -> Option<&str> {
        self.0.declaration.plural_name.as_deref()
    }

    /// Returns the class of the targets.
    #[must_use]
    pub fn target(&self) -> ClassId {
        self.0.declaration.target
    }

    /// Returns the type of the targets.
    ///
    /// # Errors
    ///
    /// Returns the registry error for the target class.
    pub fn target_type(&self) -> Result<Type> {
        self.part().owner.registry()?.type_of(self.target())
    }

    /// Returns the association kind.
    #[must_use]
    pub fn association_kind(&self) -> AssociationKind {
        self.0.declaration.kind
    }

    /// Returns the minimum number of targets.
    #[must_use]
    pub fn min_cardinality(&self) -> u32 {
        self.0.declaration.min
    }

    /// Returns the maximum number of targets.
    #[must_use]
    pub fn max_cardinality(&self) -> Cardinality {
        self.0.declaration.max
    }

    /// Returns the cardinality range with the minimum as default.
    #[must_use]
    pub fn cardinality(&self) -> CardinalityRange {
        CardinalityRange::new(self.min_cardinality(), self.max_cardinality(), self.min_cardinality())
    }

    /// Returns true if at most one target is allowed.
    #[must_use]
    pub fn is_to_one(&self) -> bool {
        self.max_cardinality() == Cardinality::Bounded(1)
    }

    /// Returns true if the association is the union of its subsets.
    #[must_use]
    pub fn is_derived_union(&self) -> bool {
        self.0.declaration.derived_union
    }

    /// Returns true if the association is a subset of a derived union.
    #[must_use]
    pub fn is_subset_of_derived_union(&self) -> bool {
        self.0.declaration.subset_of_derived_union.is_some()
    }

    /// Returns the name of the derived union this association is a subset of.
    #[must_use]
    pub fn derived_union(&self) -> Option<&str> {
        self.0.declaration.subset_of_derived_union.as_deref()
    }

    /// Returns the name of the inverse association.
    #[must_use]
    pub fn inverse(&self) -> Option<&str> {
        self.0.declaration.inverse.as_deref()
    }

    /// Returns true if links live in product generations.
    #[must_use]
    pub fn is_changing_over_time(&self) -> bool {
        self.0.declaration.changing_over_time
    }

    /// Returns the product component or generation holding the
    /// configuration of this association.
    ///
    /// # Errors
    ///
    /// Returns an invocation error if no generation is effective at `date`.
    pub fn product_object<'a>(
        &self,
        product: &'a ProductComponent,
        date: Option<NaiveDate>,
    ) -> Result<ProductObject<'a>> {
        self.part()
            .relevant(product, date, self.is_changing_over_time())
    }

    /// Returns the type declaring this association.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the registry has been dropped.
    pub fn owning_type(&self) -> Result<Type> {
        self.part().owning_type()
    }

    /// Returns the association this one overrides.
    #[must_use]
    pub fn super_association(&self) -> Option<Association> {
        self.part()
            .super_type()
            .and_then(|super_type| super_type.declared_association(self.name()).ok())
    }

    /// Returns true if this association overrides one of a supertype.
    #[must_use]
    pub fn is_overriding(&self) -> bool {
        self.super_association().is_some()
    }

    /// Returns the association on the other side of the product/policy pair.
    ///
    /// # Errors
    ///
    /// Returns the registry error if the referenced type or association
    /// does not exist.
    pub fn matching_association(&self) -> Result<Option<Association>> {
        let Some(reference) = self.0.declaration.matching else {
            return Ok(None);
        };
        if let Some(cached) = self.0.matching.get().and_then(Weak::upgrade) {
            return Ok(Some(Self(cached)));
        }
        let matching = self
            .part()
            .owner
            .registry()?
            .type_of(reference.source)?
            .association(reference.name)?;
        if self.part().owner.config.cache_matching_associations {
            // A concurrent caller may have published first; both hold the same part.
            let _ = self.0.matching.set(Box::new(Arc::downgrade(&matching.0)));
        }
        Ok(Some(matching))
    }

    /// Returns true if a matching association is declared.
    #[must_use]
    pub fn has_matching_association(&self) -> bool {
        self.0.declaration.matching.is_some()
    }
}

impl PartialEq for Association {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Association {}

impl fmt::Debug for Association {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Association")
            .field("name", &self.part().to_string())
            .field("target", &self.target())
            .field("cardinality", &(self.min_cardinality(), self.max_cardinality()))
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Association {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.part(), f)
    }
}

impl ModelElement for Association {
    fn name(&self) -> &str {
        &self.part().name
    }

    fn documentation(&self, kind: DocumentationKind, locale: &Locale) -> Option<String> {
        self.part().documentation(kind, locale, || {
            self.super_association()
                .and_then(|super_association| super_association.documentation(kind, locale))
        })
    }

    fn deprecation(&self) -> Option<&Deprecation> {
        self.part().deprecation.as_ref()
    }

    fn extension_properties(&self) -> &ExtensionProperties {
        &self.part().extension_properties
    }
}

/// An association of a policy component type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolicyAssociation(Association);

impl PolicyAssociation {
    pub(crate) const fn new(association: Association) -> Self {
        Self(association)
    }

    /// Returns the product association configuring this one.
    ///
    /// # Errors
    ///
    /// See [`Association::matching_association`].
    pub fn matching_product_association(&self) -> Result<Option<ProductAssociation>> {
        Ok(self.matching_association()?.map(ProductAssociation::new))
    }

    /// Returns the targets of this association on a source object.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no getter is declared and an
    /// invocation error if it fails.
    pub fn target_objects(&self, source: &dyn ModelObject) -> Result<Vec<ObjectRef>> {
        let getter = self
            .declaration()
            .targets_getter
            .as_ref()
            .ok_or_else(|| self.part().configuration_error("no targets getter declared"))?;
        getter.call(source.as_any()).map_err(|failure| {
            self.part()
                .invocation_error(getter.method(), Vec::new(), &source.class_id(), &failure)
        })
    }

    /// Adds targets to a source object. A to-one association keeps only the
    /// last target.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for derived unions or missing
    /// mutators, and an invocation error if a mutator fails.
    pub fn add_target_objects(&self, source: &mut dyn ModelObject, targets: Vec<ObjectRef>) -> Result<()> {
        self.check_not_derived_union()?;
        let class = source.class_id();
        if self.is_to_one() {
            let setter = self
                .declaration()
                .target_setter
                .as_ref()
                .ok_or_else(|| self.part().configuration_error("no target setter declared"))?;
            if let Some(target) = targets.into_iter().last() {
                setter
                    .call(source.as_any_mut(), Some(target))
                    .map_err(|failure| {
                        self.part()
                            .invocation_error(setter.method(), Vec::new(), &class, &failure)
                    })?;
            }
            return Ok(());
        }
        let adder = self
            .declaration()
            .target_adder
            .as_ref()
            .ok_or_else(|| self.part().configuration_error("no target adder declared"))?;
        for target in targets {
            let arguments = vec![target.class_id().to_string()];
            adder.call(source.as_any_mut(), target).map_err(|failure| {
                self.part()
                    .invocation_error(adder.method(), arguments, &class, &failure)
            })?;
        }
        Ok(())
    }

    /// Removes targets from a source object. Removing anything but the
    /// current target of a to-one association does nothing.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for derived unions or missing
    /// mutators, and an invocation error if a mutator fails.
    pub fn remove_target_objects(&self, source: &mut dyn ModelObject, targets: &[ObjectRef]) -> Result<()> {
        self.check_not_derived_union()?;
        let class = source.class_id();
        if self.is_to_one() {
            let setter = self
                .declaration()
                .target_setter
                .as_ref()
                .ok_or_else(|| self.part().configuration_error("no target setter declared"))?;
            let current = self.target_objects(&*source)?;
            let is_current = current
                .first()
                .is_some_and(|current| targets.iter().any(|target| same_object(current, target)));
            if is_current {
                setter.call(source.as_any_mut(), None).map_err(|failure| {
                    self.part()
                        .invocation_error(setter.method(), Vec::new(), &class, &failure)
                })?;
            }
            return Ok(());
        }
        let remover = self
            .declaration()
            .target_remover
            .as_ref()
            .ok_or_else(|| self.part().configuration_error("no target remover declared"))?;
        for target in targets {
            let arguments = vec![target.class_id().to_string()];
            remover
                .call(source.as_any_mut(), Arc::clone(target))
                .map_err(|failure| {
                    self.part()
                        .invocation_error(remover.method(), arguments, &class, &failure)
                })?;
        }
        Ok(())
    }

    fn check_not_derived_union(&self) -> Result<()> {
        if self.is_derived_union() {
            return Err(self
                .part()
                .configuration_error("derived unions cannot be modified"));
        }
        Ok(())
    }
}

impl Deref for PolicyAssociation {
    type Target = Association;

    fn deref(&self) -> &Association {
        &self.0
    }
}

/// An association of a product component type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductAssociation(Association);

impl ProductAssociation {
    pub(crate) const fn new(association: Association) -> Self {
        Self(association)
    }

    /// Returns the policy association configured by this one.
    ///
    /// # Errors
    ///
    /// See [`Association::matching_association`].
    pub fn matching_policy_association(&self) -> Result<Option<PolicyAssociation>> {
        Ok(self.matching_association()?.map(PolicyAssociation::new))
    }

    /// Returns the links of a product component, from the generation
    /// effective at `date` if the association changes over time.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for derived unions or a missing link
    /// getter, and an invocation error if the generation is missing or the
    /// getter fails.
    pub fn links(&self, product: &ProductComponent, date: Option<NaiveDate>) -> Result<Vec<ProductLink>> {
        self.check_not_derived_union()?;
        let getter = self
            .declaration()
            .links_getter
            .as_ref()
            .ok_or_else(|| self.part().configuration_error("no link getter declared"))?;
        let source = self
            .part()
            .relevant(product, date, self.is_changing_over_time())?;
        getter.call(source.payload()).map_err(|failure| {
            self.part()
                .invocation_error(getter.method(), Vec::new(), &source, &failure)
        })
    }

    /// Returns the link to a target component, if there is one.
    ///
    /// # Errors
    ///
    /// See [`ProductAssociation::links`].
    pub fn link(
        &self,
        product: &ProductComponent,
        target: &str,
        date: Option<NaiveDate>,
    ) -> Result<Option<ProductLink>> {
        Ok(self
            .links(product, date)?
            .into_iter()
            .find(|link| &*link.target == target))
    }

    /// Returns the target components found in a repository; targets that
    /// are not in the repository are skipped.
    ///
    /// # Errors
    ///
    /// See [`ProductAssociation::links`].
    pub fn target_objects(
        &self,
        repository: &dyn RuntimeRepository,
        product: &ProductComponent,
        date: Option<NaiveDate>,
    ) -> Result<Vec<Arc<ProductComponent>>> {
        Ok(self
            .links(product, date)?
            .iter()
            .filter_map(|link| repository.product_component(&link.target))
            .collect())
    }

    /// Adds a link to a product component.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for derived unions or a missing link
    /// adder, an illegal-modification error if the component is not
    /// modifiable, and an invocation error if the adder fails.
    pub fn add_link(
        &self,
        product: &mut ProductComponent,
        date: Option<NaiveDate>,
        link: ProductLink,
    ) -> Result<()> {
        self.check_not_derived_union()?;
        let adder = self
            .declaration()
            .link_adder
            .as_ref()
            .ok_or_else(|| self.part().configuration_error("no link adder declared"))?;
        let arguments = vec![link.target.to_string()];
        let mut source = self
            .part()
            .relevant_mut(product, date, self.is_changing_over_time())?;
        adder.call(source.payload_mut(), link).map_err(|failure| {
            self.part()
                .invocation_error(adder.method(), arguments, &source, &failure)
        })
    }

    /// Removes the link to a target component.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for derived unions or a missing link
    /// remover, an illegal-modification error if the component is not
    /// modifiable, and an invocation error if the remover fails.
    pub fn remove_link(
        &self,
        product: &mut ProductComponent,
        date: Option<NaiveDate>,
        target: &str,
    ) -> Result<()> {
        self.check_not_derived_union()?;
        let remover = self
            .declaration()
            .link_remover
            .as_ref()
            .ok_or_else(|| self.part().configuration_error("no link remover declared"))?;
        let mut source = self
            .part()
            .relevant_mut(product, date, self.is_changing_over_time())?;
        remover
            .call(source.payload_mut(), Arc::from(target))
            .map_err(|failure| {
                self.part()
                    .invocation_error(remover.method(), vec![target.to_string()], &source, &failure)
            })
    }

    fn check_not_derived_union(&self) -> Result<()> {
        if self.is_derived_union() {
            return Err(self
                .part()
                .configuration_error("links of derived unions are not accessible"));
        }
        Ok(())
    }
}

impl Deref for ProductAssociation {
    type Target = Association;

    fn deref(&self) -> &Association {
        &self.0
    }
}
