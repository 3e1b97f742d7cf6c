//! Policy and product component types.
//!
//! A [`Type`] is built once per declared class by the
//! [`ModelRegistry`](crate::ModelRegistry) and never changes afterwards.
//! It points to its supertype, so walking the hierarchy is a walk along
//! `Arc`s. Parts point back to the shared [`TypeCore`] of their owner, not
//! to the `Type` itself, which keeps the graph free of reference cycles.

use std::fmt;
use std::ops::Deref;
use std::sync::{Arc, Weak};

use ipsmodel_declaration::{ClassId, ExtensionProperties, TypeDeclaration, TypeKindDeclaration};
use ipsmodel_foundation::{Deprecation, Error, Locale, PartKind, Result};

use crate::association::{Association, PolicyAssociation, ProductAssociation};
use crate::attribute::{Attribute, PolicyAttribute, ProductAttribute};
use crate::config::ModelConfig;
use crate::element::{DocumentationKind, ModelElement, resolve_documentation};
use crate::formula::Formula;
use crate::hierarchy::{PartCollector, PartFinder, PartSelector, TypeHierarchyVisitor};
use crate::part::PartMap;
use crate::registry::{ModelRegistry, RegistryInner};
use crate::rule::ValidationRule;
use crate::table_usage::TableUsage;

/// The state of a type that its parts refer to.
pub(crate) struct TypeCore {
    pub(crate) declaration: Arc<TypeDeclaration>,
    pub(crate) super_type: Option<Type>,
    pub(crate) registry: Weak<RegistryInner>,
    pub(crate) config: ModelConfig,
    pub(crate) deprecation: Option<Deprecation>,
}

impl TypeCore {
    pub(crate) fn registry(&self) -> Result<ModelRegistry> {
        self.registry
            .upgrade()
            .map(ModelRegistry::from_inner)
            .ok_or_else(|| Error::internal("model registry has been dropped"))
    }
}

/// Declared parts of one type, by kind.
#[derive(Default)]
pub(crate) struct TypeParts {
    attributes: PartMap<Attribute>,
    associations: PartMap<Association>,
    validation_rules: PartMap<ValidationRule>,
    table_usages: PartMap<TableUsage>,
    formulas: PartMap<Formula>,
}

impl TypeParts {
    pub(crate) fn attributes(&self) -> &PartMap<Attribute> {
        &self.attributes
    }

    pub(crate) fn associations(&self) -> &PartMap<Association> {
        &self.associations
    }

    pub(crate) fn validation_rules(&self) -> &PartMap<ValidationRule> {
        &self.validation_rules
    }

    pub(crate) fn table_usages(&self) -> &PartMap<TableUsage> {
        &self.table_usages
    }

    pub(crate) fn formulas(&self) -> &PartMap<Formula> {
        &self.formulas
    }
}

/// A policy or product component type.
///
/// Cloning is cheap. Two `Type`s are equal if they are the same instance,
/// which the registry guarantees for each class.
#[derive(Clone)]
pub struct Type {
    core: Arc<TypeCore>,
    parts: Arc<TypeParts>,
}

impl Type {
    /// Builds a type from its declaration. The supertype must already be built.
    pub(crate) fn build(
        declaration: Arc<TypeDeclaration>,
        super_type: Option<Type>,
        registry: Weak<RegistryInner>,
        config: ModelConfig,
    ) -> Result<Self> {
        let name = declaration.name.clone();
        if let Some(super_type) = &super_type {
            if super_type.is_policy_type() != declaration.is_policy() {
                return Err(Error::configuration(format!(
                    "{name} and its supertype {} are not of the same kind",
                    super_type.name()
                )));
            }
        }
        if declaration.is_policy()
            && !(declaration.table_usages.is_empty() && declaration.formulas.is_empty())
        {
            return Err(Error::configuration(format!(
                "policy type {name} declares table usages or formulas"
            )));
        }
        if declaration.is_product() && !declaration.validation_rules.is_empty() {
            return Err(Error::configuration(format!(
                "product type {name} declares validation rules"
            )));
        }

        let core = Arc::new(TypeCore {
            deprecation: Deprecation::of(declaration.deprecation.as_ref()),
            declaration,
            super_type,
            registry,
            config,
        });
        let declaration = &core.declaration;
        let mut parts = TypeParts::default();
        for attribute in &declaration.attributes {
            let part = Attribute::build(&core, attribute)?;
            parts
                .attributes
                .insert(&attribute.name, part, PartKind::Attribute, &name)?;
        }
        for association in &declaration.associations {
            let part = Association::build(&core, association);
            parts
                .associations
                .insert(&association.name, part, PartKind::Association, &name)?;
            if let Some(plural) = &association.plural_name {
                parts.associations.alias(plural, &association.name);
            }
        }
        for rule in &declaration.validation_rules {
            let part = ValidationRule::build(&core, rule);
            parts
                .validation_rules
                .insert(&rule.name, part, PartKind::ValidationRule, &name)?;
        }
        for table_usage in &declaration.table_usages {
            let part = TableUsage::build(&core, table_usage);
            parts
                .table_usages
                .insert(&table_usage.name, part, PartKind::TableUsage, &name)?;
        }
        for formula in &declaration.formulas {
            let part = Formula::build(&core, formula);
            parts
                .formulas
                .insert(&formula.name, part, PartKind::Formula, &name)?;
        }

        Ok(Self {
            core,
            parts: Arc::new(parts),
        })
    }

    pub(crate) fn parts(&self) -> &TypeParts {
        &self.parts
    }

    pub(crate) fn config(&self) -> &ModelConfig {
        &self.core.config
    }

    pub(crate) fn registry(&self) -> Result<ModelRegistry> {
        self.core.registry()
    }

    /// Returns the qualified model name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.core.declaration.name
    }

    /// Returns the runtime class this type describes.
    #[must_use]
    pub fn class_id(&self) -> ClassId {
        self.core.declaration.class
    }

    /// Returns the declaration this type was built from.
    #[must_use]
    pub fn declaration(&self) -> &TypeDeclaration {
        &self.core.declaration
    }

    /// Returns `"PolicyCmptType"` or `"ProductCmptType"`.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        if self.is_policy_type() {
            "PolicyCmptType"
        } else {
            "ProductCmptType"
        }
    }

    /// Returns true if the type cannot be instantiated.
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.core.declaration.is_abstract
    }

    /// Returns the supertype.
    #[must_use]
    pub fn super_type(&self) -> Option<&Type> {
        self.core.super_type.as_ref()
    }

    /// Returns true if this type is `other` or one of its subtypes.
    #[must_use]
    pub fn is_same_or_sub(&self, other: &Type) -> bool {
        let mut found = false;
        self.search_type_hierarchy(&mut |ty: &Type| {
            found = ty == other;
            !found
        });
        found
    }

    /// Returns true for policy component types.
    #[must_use]
    pub fn is_policy_type(&self) -> bool {
        self.core.declaration.is_policy()
    }

    /// Returns true for product component types.
    #[must_use]
    pub fn is_product_type(&self) -> bool {
        self.core.declaration.is_product()
    }

    /// Views this type as a policy component type.
    #[must_use]
    pub fn as_policy(&self) -> Option<PolicyCmptType> {
        self.is_policy_type().then(|| PolicyCmptType(self.clone()))
    }

    /// Views this type as a product component type.
    #[must_use]
    pub fn as_product(&self) -> Option<ProductCmptType> {
        self.is_product_type().then(|| ProductCmptType(self.clone()))
    }

    /// Visits this type and then its supertypes, bottom-up, until the
    /// visitor returns false.
    pub fn search_type_hierarchy<V: TypeHierarchyVisitor + ?Sized>(&self, visitor: &mut V) {
        let mut current = Some(self);
        while let Some(ty) = current {
            if !visitor.visit_type(ty) {
                break;
            }
            current = ty.super_type();
        }
    }

    fn declared_part<P: Clone>(
        &self,
        select: PartSelector<P>,
        kind: PartKind,
        name: &str,
    ) -> Result<P> {
        select(&self.parts)
            .get(name)
            .cloned()
            .ok_or_else(|| Error::not_declared(kind, name, self.name()))
    }

    fn declared_part_at<P: Clone>(&self, select: PartSelector<P>, index: usize) -> Result<P> {
        let parts = select(&self.parts);
        parts
            .get_index(index)
            .cloned()
            .ok_or_else(|| Error::index_out_of_bounds(index, parts.len()))
    }

    fn declared_parts<P: Clone>(&self, select: PartSelector<P>) -> Vec<P> {
        select(&self.parts).values().cloned().collect()
    }

    fn find_part<P: Clone>(&self, select: PartSelector<P>, name: &str) -> Option<P> {
        let mut finder = PartFinder::new(name, select);
        self.search_type_hierarchy(&mut finder);
        finder.found
    }

    fn part<P: Clone>(&self, select: PartSelector<P>, kind: PartKind, name: &str) -> Result<P> {
        self.find_part(select, name)
            .ok_or_else(|| Error::not_found(kind, name, self.name()))
    }

    fn collect_parts<P: Clone>(&self, select: PartSelector<P>) -> Vec<P> {
        let mut collector = PartCollector::new(select);
        self.search_type_hierarchy(&mut collector);
        collector.parts
    }

    // Attributes

    /// Returns the attributes declared in this type, in declaration order.
    #[must_use]
    pub fn declared_attributes(&self) -> Vec<Attribute> {
        self.declared_parts(TypeParts::attributes)
    }

    /// Returns the attribute with a name declared in this type.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if this type does not declare it.
    pub fn declared_attribute(&self, name: &str) -> Result<Attribute> {
        self.declared_part(TypeParts::attributes, PartKind::Attribute, name)
    }

    /// Returns the attribute declared at a position in this type.
    ///
    /// # Errors
    ///
    /// Returns an index-out-of-bounds error for an invalid index.
    pub fn declared_attribute_at(&self, index: usize) -> Result<Attribute> {
        self.declared_part_at(TypeParts::attributes, index)
    }

    /// Returns true if this type declares an attribute with the name.
    #[must_use]
    pub fn is_attribute_declared(&self, name: &str) -> bool {
        self.parts.attributes.get(name).is_some()
    }

    /// Returns the most specific attribute with a name in the hierarchy.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no type in the hierarchy declares it.
    pub fn attribute(&self, name: &str) -> Result<Attribute> {
        self.part(TypeParts::attributes, PartKind::Attribute, name)
    }

    /// Returns true if the hierarchy has an attribute with the name.
    #[must_use]
    pub fn is_attribute_present(&self, name: &str) -> bool {
        self.find_part(TypeParts::attributes, name).is_some()
    }

    /// Returns the attributes of the whole hierarchy, most derived first.
    #[must_use]
    pub fn attributes(&self) -> Vec<Attribute> {
        self.collect_parts(TypeParts::attributes)
    }

    // Associations

    /// Returns the associations declared in this type, in declaration order.
    #[must_use]
    pub fn declared_associations(&self) -> Vec<Association> {
        self.declared_parts(TypeParts::associations)
    }

    /// Returns the association declared in this type by singular or plural name.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if this type does not declare it.
    pub fn declared_association(&self, name: &str) -> Result<Association> {
        self.declared_part(TypeParts::associations, PartKind::Association, name)
    }

    /// Returns the association declared at a position in this type.
    ///
    /// # Errors
    ///
    /// Returns an index-out-of-bounds error for an invalid index.
    pub fn declared_association_at(&self, index: usize) -> Result<Association> {
        self.declared_part_at(TypeParts::associations, index)
    }

    /// Returns true if this type declares an association with the name.
    #[must_use]
    pub fn is_association_declared(&self, name: &str) -> bool {
        self.parts.associations.get(name).is_some()
    }

    /// Returns the most specific association with a singular or plural
    /// name in the hierarchy.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no type in the hierarchy declares it.
    pub fn association(&self, name: &str) -> Result<Association> {
        self.part(TypeParts::associations, PartKind::Association, name)
    }

    /// Returns true if the hierarchy has an association with the name.
    #[must_use]
    pub fn is_association_present(&self, name: &str) -> bool {
        self.find_part(TypeParts::associations, name).is_some()
    }

    /// Returns the associations of the whole hierarchy, most derived first.
    #[must_use]
    pub fn associations(&self) -> Vec<Association> {
        self.collect_parts(TypeParts::associations)
    }

    // Validation rules

    /// Returns the validation rules declared in this type.
    #[must_use]
    pub fn declared_validation_rules(&self) -> Vec<ValidationRule> {
        self.declared_parts(TypeParts::validation_rules)
    }

    /// Returns the validation rule with a name declared in this type.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if this type does not declare it.
    pub fn declared_validation_rule(&self, name: &str) -> Result<ValidationRule> {
        self.declared_part(TypeParts::validation_rules, PartKind::ValidationRule, name)
    }

    /// Returns true if this type declares a validation rule with the name.
    #[must_use]
    pub fn is_validation_rule_declared(&self, name: &str) -> bool {
        self.parts.validation_rules.get(name).is_some()
    }

    /// Returns the most specific validation rule with a name in the hierarchy.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no type in the hierarchy declares it.
    pub fn validation_rule(&self, name: &str) -> Result<ValidationRule> {
        self.part(TypeParts::validation_rules, PartKind::ValidationRule, name)
    }

    /// Returns true if the hierarchy has a validation rule with the name.
    #[must_use]
    pub fn is_validation_rule_present(&self, name: &str) -> bool {
        self.find_part(TypeParts::validation_rules, name).is_some()
    }

    /// Returns the validation rules of the whole hierarchy, most derived first.
    #[must_use]
    pub fn validation_rules(&self) -> Vec<ValidationRule> {
        self.collect_parts(TypeParts::validation_rules)
    }

    // Table usages

    /// Returns the table usages declared in this type.
    #[must_use]
    pub fn declared_table_usages(&self) -> Vec<TableUsage> {
        self.declared_parts(TypeParts::table_usages)
    }

    /// Returns the table usage with a name declared in this type.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if this type does not declare it.
    pub fn declared_table_usage(&self, name: &str) -> Result<TableUsage> {
        self.declared_part(TypeParts::table_usages, PartKind::TableUsage, name)
    }

    /// Returns true if this type declares a table usage with the name.
    #[must_use]
    pub fn is_table_usage_declared(&self, name: &str) -> bool {
        self.parts.table_usages.get(name).is_some()
    }

    /// Returns the most specific table usage with a name in the hierarchy.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no type in the hierarchy declares it.
    pub fn table_usage(&self, name: &str) -> Result<TableUsage> {
        self.part(TypeParts::table_usages, PartKind::TableUsage, name)
    }

    /// Returns true if the hierarchy has a table usage with the name.
    #[must_use]
    pub fn is_table_usage_present(&self, name: &str) -> bool {
        self.find_part(TypeParts::table_usages, name).is_some()
    }

    /// Returns the table usages of the whole hierarchy, most derived first.
    #[must_use]
    pub fn table_usages(&self) -> Vec<TableUsage> {
        self.collect_parts(TypeParts::table_usages)
    }

    // Formulas

    /// Returns the formulas declared in this type.
    #[must_use]
    pub fn declared_formulas(&self) -> Vec<Formula> {
        self.declared_parts(TypeParts::formulas)
    }

    /// Returns the formula with a name declared in this type.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if this type does not declare it.
    pub fn declared_formula(&self, name: &str) -> Result<Formula> {
        self.declared_part(TypeParts::formulas, PartKind::Formula, name)
    }

    /// Returns true if this type declares a formula with the name.
    #[must_use]
    pub fn is_formula_declared(&self, name: &str) -> bool {
        self.parts.formulas.get(name).is_some()
    }

    /// Returns the most specific formula with a name in the hierarchy.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no type in the hierarchy declares it.
    pub fn formula(&self, name: &str) -> Result<Formula> {
        self.part(TypeParts::formulas, PartKind::Formula, name)
    }

    /// Returns true if the hierarchy has a formula with the name.
    #[must_use]
    pub fn is_formula_present(&self, name: &str) -> bool {
        self.find_part(TypeParts::formulas, name).is_some()
    }

    /// Returns the formulas of the whole hierarchy, most derived first.
    #[must_use]
    pub fn formulas(&self) -> Vec<Formula> {
        self.collect_parts(TypeParts::formulas)
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.core, &other.core)
    }
}

impl Eq for Type {}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Type")
            .field("name", &self.name())
            .field("kind", &self.kind_name())
            .field("super_type", &self.super_type().map(Type::name))
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ModelElement for Type {
    fn name(&self) -> &str {
        Type::name(self)
    }

    fn documentation(&self, kind: DocumentationKind, locale: &Locale) -> Option<String> {
        resolve_documentation(
            self.core.declaration.documentation.as_ref(),
            &format!("{}_{}", self.name(), kind.key()),
            locale,
            &self.core.config.default_locale,
            || {
                self.super_type()
                    .and_then(|super_type| super_type.documentation(kind, locale))
            },
        )
    }

    fn deprecation(&self) -> Option<&Deprecation> {
        self.core.deprecation.as_ref()
    }

    fn extension_properties(&self) -> &ExtensionProperties {
        &self.core.declaration.extension_properties
    }
}

/// A policy component type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolicyCmptType(Type);

impl PolicyCmptType {
    /// Returns the underlying type.
    #[must_use]
    pub fn as_type(&self) -> &Type {
        &self.0
    }

    /// Returns the supertype.
    #[must_use]
    pub fn super_policy_type(&self) -> Option<PolicyCmptType> {
        self.0.super_type().and_then(Type::as_policy)
    }

    /// Returns the product class configuring this type or a supertype.
    #[must_use]
    pub fn configured_by(&self) -> Option<ClassId> {
        let mut found = None;
        self.0.search_type_hierarchy(&mut |ty: &Type| {
            if let TypeKindDeclaration::Policy {
                configured_by: Some(class),
            } = ty.declaration().kind
            {
                found = Some(class);
            }
            found.is_none()
        });
        found
    }

    /// Returns true if instances of this type are configured by a product.
    #[must_use]
    pub fn is_configured_by_product(&self) -> bool {
        self.configured_by().is_some()
    }

    /// Returns the product component type configuring this type.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if this type is not configured by a
    /// product, or the registry error for the product class.
    pub fn product_cmpt_type(&self) -> Result<ProductCmptType> {
        let class = self.configured_by().ok_or_else(|| {
            Error::configuration(format!("{} is not configured by a product", self.name()))
        })?;
        self.0.registry()?.product_cmpt_type(class)
    }

    /// See [`Type::attribute`].
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no type in the hierarchy declares it.
    pub fn attribute(&self, name: &str) -> Result<PolicyAttribute> {
        self.0.attribute(name).map(PolicyAttribute::new)
    }

    /// See [`Type::declared_attribute`].
    ///
    /// # Errors
    ///
    /// Returns a not-found error if this type does not declare it.
    pub fn declared_attribute(&self, name: &str) -> Result<PolicyAttribute> {
        self.0.declared_attribute(name).map(PolicyAttribute::new)
    }

    /// See [`Type::attributes`].
    #[must_use]
    pub fn attributes(&self) -> Vec<PolicyAttribute> {
        self.0.attributes().into_iter().map(PolicyAttribute::new).collect()
    }

    /// See [`Type::declared_attributes`].
    #[must_use]
    pub fn declared_attributes(&self) -> Vec<PolicyAttribute> {
        self.0
            .declared_attributes()
            .into_iter()
            .map(PolicyAttribute::new)
            .collect()
    }

    /// See [`Type::association`].
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no type in the hierarchy declares it.
    pub fn association(&self, name: &str) -> Result<PolicyAssociation> {
        self.0.association(name).map(PolicyAssociation::new)
    }

    /// See [`Type::declared_association`].
    ///
    /// # Errors
    ///
    /// Returns a not-found error if this type does not declare it.
    pub fn declared_association(&self, name: &str) -> Result<PolicyAssociation> {
        self.0.declared_association(name).map(PolicyAssociation::new)
    }

    /// See [`Type::associations`].
    #[must_use]
    pub fn associations(&self) -> Vec<PolicyAssociation> {
        self.0
            .associations()
            .into_iter()
            .map(PolicyAssociation::new)
            .collect()
    }
}

impl Deref for PolicyCmptType {
    type Target = Type;

    fn deref(&self) -> &Type {
        &self.0
    }
}

impl TryFrom<Type> for PolicyCmptType {
    type Error = Error;

    fn try_from(ty: Type) -> Result<Self> {
        if ty.is_policy_type() {
            Ok(Self(ty))
        } else {
            Err(wrong_kind(&ty, "PolicyCmptType"))
        }
    }
}

/// A product component type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductCmptType(Type);

impl ProductCmptType {
    /// Returns the underlying type.
    #[must_use]
    pub fn as_type(&self) -> &Type {
        &self.0
    }

    /// Returns the supertype.
    #[must_use]
    pub fn super_product_type(&self) -> Option<ProductCmptType> {
        self.0.super_type().and_then(Type::as_product)
    }

    /// Returns true if components of this type have generations.
    #[must_use]
    pub fn is_changing_over_time(&self) -> bool {
        matches!(
            self.0.declaration().kind,
            TypeKindDeclaration::Product {
                changing_over_time: true,
                ..
            }
        )
    }

    /// Returns the class of the generations, if any.
    #[must_use]
    pub fn generation_class(&self) -> Option<ClassId> {
        match self.0.declaration().kind {
            TypeKindDeclaration::Product {
                generation_class, ..
            } => generation_class,
            TypeKindDeclaration::Policy { .. } => None,
        }
    }

    /// Returns the policy class configured by this type or a supertype.
    #[must_use]
    pub fn configures(&self) -> Option<ClassId> {
        let mut found = None;
        self.0.search_type_hierarchy(&mut |ty: &Type| {
            if let TypeKindDeclaration::Product {
                configures: Some(class),
                ..
            } = ty.declaration().kind
            {
                found = Some(class);
            }
            found.is_none()
        });
        found
    }

    /// Returns true if this type configures a policy component type.
    #[must_use]
    pub fn is_configuration_for_policy_cmpt_type(&self) -> bool {
        self.configures().is_some()
    }

    /// Returns the policy component type configured by this type.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if this type configures no policy
    /// type, or the registry error for the policy class.
    pub fn policy_cmpt_type(&self) -> Result<PolicyCmptType> {
        let class = self.configures().ok_or_else(|| {
            Error::configuration(format!("{} does not configure a policy type", self.name()))
        })?;
        self.0.registry()?.policy_cmpt_type(class)
    }

    /// See [`Type::attribute`].
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no type in the hierarchy declares it.
    pub fn attribute(&self, name: &str) -> Result<ProductAttribute> {
        self.0.attribute(name).map(ProductAttribute::new)
    }

    /// See [`Type::declared_attribute`].
    ///
    /// # Errors
    ///
    /// Returns a not-found error if this type does not declare it.
    pub fn declared_attribute(&self, name: &str) -> Result<ProductAttribute> {
        self.0.declared_attribute(name).map(ProductAttribute::new)
    }

    /// See [`Type::attributes`].
    #[must_use]
    pub fn attributes(&self) -> Vec<ProductAttribute> {
        self.0
            .attributes()
            .into_iter()
            .map(ProductAttribute::new)
            .collect()
    }

    /// See [`Type::declared_attributes`].
    #[must_use]
    pub fn declared_attributes(&self) -> Vec<ProductAttribute> {
        self.0
            .declared_attributes()
            .into_iter()
            .map(ProductAttribute::new)
            .collect()
    }

    /// See [`Type::association`].
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no type in the hierarchy declares it.
    pub fn association(&self, name: &str) -> Result<ProductAssociation> {
        self.0.association(name).map(ProductAssociation::new)
    }

    /// See [`Type::declared_association`].
    ///
    /// # Errors
    ///
    /// Returns a not-found error if this type does not declare it.
    pub fn declared_association(&self, name: &str) -> Result<ProductAssociation> {
        self.0.declared_association(name).map(ProductAssociation::new)
    }

    /// See [`Type::associations`].
    #[must_use]
    pub fn associations(&self) -> Vec<ProductAssociation> {
        self.0
            .associations()
            .into_iter()
            .map(ProductAssociation::new)
            .collect()
    }
}

impl Deref for ProductCmptType {
    type Target = Type;

    fn deref(&self) -> &Type {
        &self.0
    }
}

impl TryFrom<Type> for ProductCmptType {
    type Error = Error;

    fn try_from(ty: Type) -> Result<Self> {
        if ty.is_product_type() {
            Ok(Self(ty))
        } else {
            Err(wrong_kind(&ty, "ProductCmptType"))
        }
    }
}

fn wrong_kind(ty: &Type, expected: &str) -> Error {
    Error::configuration(format!(
        "{} is a {}, not a {expected}",
        ty.name(),
        ty.kind_name()
    ))
}
