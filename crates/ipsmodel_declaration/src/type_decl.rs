//! Type declarations.

use std::sync::Arc;

use ipsmodel_foundation::{DeprecationMarker, Value};
use ipsmodel_runtime::{ClassId, MessageBundle};

use crate::method::MethodDeclaration;
use crate::part::{
    AssociationDeclaration, AttributeDeclaration, ExtensionProperties, FormulaDeclaration,
    TableUsageDeclaration, ValidationRuleDeclaration,
};

/// Policy- or product-specific parts of a type declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeKindDeclaration {
    /// A policy component type.
    Policy {
        /// Product class configuring instances of this type.
        configured_by: Option<ClassId>,
    },
    /// A product component type.
    Product {
        /// Policy class configured by this product class.
        configures: Option<ClassId>,
        /// Whether components of this type have generations.
        changing_over_time: bool,
        /// Class of the generations.
        generation_class: Option<ClassId>,
    },
}

/// A declared policy or product component type.
#[derive(Clone, Debug)]
pub struct TypeDeclaration {
    /// Runtime class.
    pub class: ClassId,
    /// Published interface of the class, resolvable to the same type.
    pub published_interface: Option<ClassId>,
    /// Qualified model name.
    pub name: String,
    /// Policy or product specifics.
    pub kind: TypeKindDeclaration,
    /// Supertype class.
    pub super_class: Option<ClassId>,
    /// Whether the type is abstract.
    pub is_abstract: bool,
    /// Labels and descriptions of the type and its parts.
    pub documentation: Option<Arc<dyn MessageBundle>>,
    /// Deprecation marker.
    pub deprecation: Option<DeprecationMarker>,
    /// Extension properties.
    pub extension_properties: ExtensionProperties,
    /// Attributes in declaration order.
    pub attributes: Vec<AttributeDeclaration>,
    /// Associations in declaration order.
    pub associations: Vec<AssociationDeclaration>,
    /// Validation rules in declaration order.
    pub validation_rules: Vec<ValidationRuleDeclaration>,
    /// Table usages in declaration order.
    pub table_usages: Vec<TableUsageDeclaration>,
    /// Formulas in declaration order.
    pub formulas: Vec<FormulaDeclaration>,
    /// Methods of the class.
    pub methods: Vec<MethodDeclaration>,
    /// Methods of the generation class.
    pub generation_methods: Vec<MethodDeclaration>,
}

impl TypeDeclaration {
    fn new(class: ClassId, name: &str, kind: TypeKindDeclaration) -> Self {
        Self {
            class,
            published_interface: None,
            name: name.to_string(),
            kind,
            super_class: None,
            is_abstract: false,
            documentation: None,
            deprecation: None,
            extension_properties: ExtensionProperties::new(),
            attributes: Vec::new(),
            associations: Vec::new(),
            validation_rules: Vec::new(),
            table_usages: Vec::new(),
            formulas: Vec::new(),
            methods: Vec::new(),
            generation_methods: Vec::new(),
        }
    }

    /// Declares a policy component type.
    #[must_use]
    pub fn policy(class: ClassId, name: &str) -> Self {
        Self::new(class, name, TypeKindDeclaration::Policy { configured_by: None })
    }

    /// Declares a product component type.
    #[must_use]
    pub fn product(class: ClassId, name: &str) -> Self {
        Self::new(
            class,
            name,
            TypeKindDeclaration::Product {
                configures: None,
                changing_over_time: false,
                generation_class: None,
            },
        )
    }

    /// Returns true for policy component types.
    #[must_use]
    pub const fn is_policy(&self) -> bool {
        matches!(self.kind, TypeKindDeclaration::Policy { .. })
    }

    /// Returns true for product component types.
    #[must_use]
    pub const fn is_product(&self) -> bool {
        matches!(self.kind, TypeKindDeclaration::Product { .. })
    }

    /// Sets the supertype.
    #[must_use]
    pub fn with_super_class(mut self, super_class: ClassId) -> Self {
        self.super_class = Some(super_class);
        self
    }

    /// Sets the published interface.
    #[must_use]
    pub fn with_published_interface(mut self, interface: ClassId) -> Self {
        self.published_interface = Some(interface);
        self
    }

    /// Marks the type as abstract.
    #[must_use]
    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Pairs a policy type with the product class configuring it.
    ///
    /// Has no effect on product types.
    #[must_use]
    pub fn configured_by(mut self, product: ClassId) -> Self {
        if let TypeKindDeclaration::Policy { configured_by } = &mut self.kind {
            *configured_by = Some(product);
        }
        self
    }

    /// Pairs a product type with the policy class it configures.
    ///
    /// Has no effect on policy types.
    #[must_use]
    pub fn configures(mut self, policy: ClassId) -> Self {
        if let TypeKindDeclaration::Product { configures, .. } = &mut self.kind {
            *configures = Some(policy);
        }
        self
    }

    /// Gives a product type generations of the given class.
    ///
    /// Has no effect on policy types.
    #[must_use]
    pub fn with_generations(mut self, generation: ClassId) -> Self {
        if let TypeKindDeclaration::Product {
            changing_over_time,
            generation_class,
            ..
        } = &mut self.kind
        {
            *changing_over_time = true;
            *generation_class = Some(generation);
        }
        self
    }

    /// Sets the documentation bundle.
    #[must_use]
    pub fn with_documentation(mut self, bundle: Arc<dyn MessageBundle>) -> Self {
        self.documentation = Some(bundle);
        self
    }

    /// Marks the type as deprecated.
    #[must_use]
    pub fn deprecated(mut self, marker: DeprecationMarker) -> Self {
        self.deprecation = Some(marker);
        self
    }

    /// Adds an extension property.
    #[must_use]
    pub fn with_extension_property(mut self, id: &str, value: Value) -> Self {
        self.extension_properties.insert(id.to_string(), value);
        self
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attribute(mut self, attribute: AttributeDeclaration) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Adds an association.
    #[must_use]
    pub fn with_association(mut self, association: AssociationDeclaration) -> Self {
        self.associations.push(association);
        self
    }

    /// Adds a validation rule.
    #[must_use]
    pub fn with_validation_rule(mut self, rule: ValidationRuleDeclaration) -> Self {
        self.validation_rules.push(rule);
        self
    }

    /// Adds a table usage.
    #[must_use]
    pub fn with_table_usage(mut self, usage: TableUsageDeclaration) -> Self {
        self.table_usages.push(usage);
        self
    }

    /// Adds a formula.
    #[must_use]
    pub fn with_formula(mut self, formula: FormulaDeclaration) -> Self {
        self.formulas.push(formula);
        self
    }

    /// Adds a method of the class.
    #[must_use]
    pub fn with_method(mut self, method: MethodDeclaration) -> Self {
        self.methods.push(method);
        self
    }

    /// Adds a method of the generation class.
    #[must_use]
    pub fn with_generation_method(mut self, method: MethodDeclaration) -> Self {
        self.generation_methods.push(method);
        self
    }
}
