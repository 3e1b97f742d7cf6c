//! Attributes of policy and product component types.
//!
//! An [`Attribute`] is the kind-independent part: datatype, attribute kind,
//! value set kind, and the override chain. [`PolicyAttribute`] adds reading
//! and writing values on model objects and resolving the configured default
//! value and value set through the product side. [`ProductAttribute`] reads
//! and writes values on product components or their generations.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use chrono::NaiveDate;
use ipsmodel_declaration::{
    AttributeDeclaration, ConfigMethodRole, ExtensionProperties, MethodBody, ParameterKind,
};
use ipsmodel_foundation::{
    Datatype, Deprecation, Error, Locale, PartKind, Result, Value, ValueSet, ValueSetKind,
};
use ipsmodel_runtime::{
    ModelObject, ProductComponent, ProductObject, RuntimeRepository, ValidationContext,
};

use crate::configuration::{ConfigMethodCache, ResolvedMethod};
use crate::element::{DocumentationKind, ModelElement};
use crate::part::PartCore;
use crate::types::{Type, TypeCore};

/// How the value of an attribute comes about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// Set and read freely.
    Changeable,
    /// Fixed by the model.
    Constant,
    /// Computed whenever it is read; cannot be set.
    DerivedOnTheFly,
    /// Computed by an explicit call and stored.
    DerivedByExplicitMethodCall,
}

impl AttributeKind {
    /// Returns the kind for its declared name.
    #[must_use]
    pub fn for_name(name: &str) -> Option<Self> {
        match name {
            "changeable" => Some(Self::Changeable),
            "constant" => Some(Self::Constant),
            "derived" => Some(Self::DerivedOnTheFly),
            "computed" => Some(Self::DerivedByExplicitMethodCall),
            _ => None,
        }
    }

    /// Returns the declared name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Changeable => "changeable",
            Self::Constant => "constant",
            Self::DerivedOnTheFly => "derived",
            Self::DerivedByExplicitMethodCall => "computed",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

struct AttributeInner {
    part: PartCore,
    declaration: AttributeDeclaration,
    kind: AttributeKind,
    methods: ConfigMethodCache,
}

/// An attribute of a type.
#[derive(Clone)]
pub struct Attribute(Arc<AttributeInner>);

impl Attribute {
    pub(crate) fn build(owner: &Arc<TypeCore>, declaration: &AttributeDeclaration) -> Result<Self> {
        let part = PartCore::new(
            owner,
            PartKind::Attribute,
            &declaration.name,
            declaration.deprecation.as_ref(),
            &declaration.extension_properties,
        );
        let kind = AttributeKind::for_name(&declaration.kind).ok_or_else(|| {
            part.configuration_error(format!("unknown attribute kind {}", declaration.kind))
        })?;
        if kind == AttributeKind::Constant && declaration.constant_value.is_none() {
            return Err(part.configuration_error("constant attribute without a constant value"));
        }
        Ok(Self(Arc::new(AttributeInner {
            part,
            declaration: declaration.clone(),
            kind,
            methods: ConfigMethodCache::default(),
        })))
    }

    fn part(&self) -> &PartCore {
        &self.0.part
    }

    /// Returns the declaration.
    #[must_use]
    pub fn declaration(&self) -> &AttributeDeclaration {
        &self.0.declaration
    }

    /// Returns the datatype.
    #[must_use]
    pub fn datatype(&self) -> &Datatype {
        &self.0.declaration.datatype
    }

    /// Returns the attribute kind.
    #[must_use]
    pub fn kind(&self) -> AttributeKind {
        self.0.kind
    }

    /// Returns the kind of value set the model allows.
    #[must_use]
    pub fn value_set_kind(&self) -> ValueSetKind {
        self.0.declaration.value_set_kind
    }

    /// Returns true if the configuration lives in product generations.
    #[must_use]
    pub fn is_changing_over_time(&self) -> bool {
        self.0.declaration.changing_over_time
    }

    /// Returns true if a product configures this attribute.
    #[must_use]
    pub fn is_product_relevant(&self) -> bool {
        self.0.declaration.product_relevant
    }

    /// Returns the product component or generation holding the
    /// configuration of this attribute.
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

    /// Returns the type declaring this attribute.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the registry has been dropped.
    pub fn owning_type(&self) -> Result<Type> {
        self.part().owning_type()
    }

    /// Returns the attribute this one overrides: the attribute with the same
    /// name declared in the direct supertype.
    ///
    /// Only one level is looked at. Call again on the result to walk further.
    #[must_use]
    pub fn super_attribute(&self) -> Option<Attribute> {
        self.part()
            .super_type()
            .and_then(|super_type| super_type.declared_attribute(self.name()).ok())
    }

    /// Returns true if this attribute overrides one of a supertype.
    #[must_use]
    pub fn is_overriding(&self) -> bool {
        self.super_attribute().is_some()
    }

    /// Returns the value set the model allows for this attribute.
    ///
    /// A constant allows only its value. Otherwise the declared value set
    /// applies, or the one inferred from the datatype.
    #[must_use]
    pub fn model_value_set(&self, repository: Option<&dyn RuntimeRepository>) -> ValueSet {
        let declaration = &self.0.declaration;
        match (&declaration.constant_value, &declaration.value_set) {
            (Some(constant), _) if self.0.kind == AttributeKind::Constant => {
                ValueSet::enumeration([constant.clone()], false)
            }
            (_, Some(value_set)) => value_set.clone(),
            _ => self.inferred_value_set(repository),
        }
    }

    /// Returns the value set inferred from the datatype.
    #[must_use]
    pub fn inferred_value_set(&self, repository: Option<&dyn RuntimeRepository>) -> ValueSet {
        let datatype = self.datatype();
        let nullable = !datatype.is_primitive();
        if datatype.is_boolean() {
            return ValueSet::enumeration([Value::Boolean(true), Value::Boolean(false)], nullable);
        }
        match datatype.as_enum() {
            Some(enum_type) => {
                let mut values = enum_type.value_list();
                if enum_type.extensible {
                    if let Some(repository) = repository {
                        values.extend(repository.enum_values(&enum_type.name));
                    }
                }
                ValueSet::enumeration(values, true)
            }
            None => ValueSet::unrestricted(nullable),
        }
    }
}

impl PartialEq for Attribute {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Attribute {}

impl fmt::Debug for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attribute")
            .field("name", &self.part().to_string())
            .field("datatype", self.datatype())
            .field("kind", &self.0.kind)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.part(), f)
    }
}

impl ModelElement for Attribute {
    fn name(&self) -> &str {
        &self.part().name
    }

    fn documentation(&self, kind: DocumentationKind, locale: &Locale) -> Option<String> {
        self.part().documentation(kind, locale, || {
            self.super_attribute()
                .and_then(|super_attribute| super_attribute.documentation(kind, locale))
        })
    }

    fn deprecation(&self) -> Option<&Deprecation> {
        self.part().deprecation.as_ref()
    }

    fn extension_properties(&self) -> &ExtensionProperties {
        &self.part().extension_properties
    }
}

/// An attribute of a policy component type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolicyAttribute(Attribute);

impl PolicyAttribute {
    pub(crate) const fn new(attribute: Attribute) -> Self {
        Self(attribute)
    }

    /// Returns the value of this attribute on a model object.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no getter is declared and an
    /// invocation error if the getter fails.
    pub fn value(&self, object: &dyn ModelObject) -> Result<Value> {
        let declaration = self.declaration();
        if self.kind() == AttributeKind::Constant {
            if let Some(constant) = &declaration.constant_value {
                return Ok(constant.clone());
            }
        }
        let getter = declaration
            .getter
            .as_ref()
            .ok_or_else(|| self.part().configuration_error("no getter declared"))?;
        getter.call(object.as_any()).map_err(|failure| {
            self.part()
                .invocation_error(getter.method(), Vec::new(), &object.class_id(), &failure)
        })
    }

    /// Sets the value of this attribute on a model object.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for constant and derived-on-the-fly
    /// attributes or if no setter is declared, and an invocation error if
    /// the setter fails.
    pub fn set_value(&self, object: &mut dyn ModelObject, value: Value) -> Result<()> {
        match self.kind() {
            AttributeKind::Constant | AttributeKind::DerivedOnTheFly => {
                return Err(self
                    .part()
                    .configuration_error(format!("cannot set the value of a {} attribute", self.kind())));
            }
            AttributeKind::Changeable | AttributeKind::DerivedByExplicitMethodCall => {}
        }
        let setter = self
            .declaration()
            .setter
            .as_ref()
            .ok_or_else(|| self.part().configuration_error("no setter declared"))?;
        let class = object.class_id();
        let arguments = vec![value.to_string()];
        setter
            .call(object.as_any_mut(), value)
            .map_err(|failure| self.part().invocation_error(setter.method(), arguments, &class, &failure))
    }

    /// Returns the default value configured for a model object by its product.
    ///
    /// # Errors
    ///
    /// See [`PolicyAttribute::default_value_for`].
    pub fn default_value(&self, object: &dyn ModelObject) -> Result<Value> {
        self.default_value_for(object.product_component().as_deref(), object.effective_from())
    }

    /// Returns the default value configured by a product component.
    ///
    /// Attributes that are not product relevant use the class-level default.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the default cannot be resolved and
    /// an invocation error if the resolving method fails.
    pub fn default_value_for(
        &self,
        product: Option<&ProductComponent>,
        date: Option<NaiveDate>,
    ) -> Result<Value> {
        if !self.is_product_relevant() {
            return self
                .declaration()
                .default_value
                .clone()
                .ok_or_else(|| self.part().configuration_error("no default value declared"));
        }
        let product = self.configuring_product(product)?;
        let resolved = self.required_method(product, ConfigMethodRole::DefaultValueGetter)?;
        let MethodBody::ReadValue(read) = &resolved.method.body else {
            return Err(self.wrong_body(&resolved));
        };
        let target = self.part().relevant(product, date, resolved.on_generation)?;
        read(target.payload(), &ValidationContext::default()).map_err(|failure| {
            self.part()
                .invocation_error(&resolved.method.name, Vec::new(), &target, &failure)
        })
    }

    /// Returns the value set configured for a model object by its product.
    ///
    /// # Errors
    ///
    /// See [`PolicyAttribute::value_set_for`].
    pub fn value_set(&self, object: &dyn ModelObject, context: &ValidationContext) -> Result<ValueSet> {
        self.value_set_for(
            object.product_component().as_deref(),
            object.effective_from(),
            context,
        )
    }

    /// Returns the value set configured by a product component.
    ///
    /// Attributes that are not product relevant use the class-level value
    /// set. Without a configured value set the inferred one applies.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a resolving method with a wrong
    /// signature and an invocation error if it fails.
    pub fn value_set_for(
        &self,
        product: Option<&ProductComponent>,
        date: Option<NaiveDate>,
        context: &ValidationContext,
    ) -> Result<ValueSet> {
        let repository = context.repository();
        if !self.is_product_relevant() {
            return Ok(self.model_value_set(repository));
        }
        let product = self.configuring_product(product)?;
        let Some(resolved) = self.method(product, ConfigMethodRole::ValueSetGetter)? else {
            return Ok(self.inferred_value_set(repository));
        };
        let MethodBody::ReadValueSet(read) = &resolved.method.body else {
            return Err(self.wrong_body(&resolved));
        };
        let target = self.part().relevant(product, date, resolved.on_generation)?;
        let arguments = if resolved.method.takes_context() {
            vec![context.locale.to_string()]
        } else {
            Vec::new()
        };
        read(target.payload(), context).map_err(|failure| {
            self.part()
                .invocation_error(&resolved.method.name, arguments, &target, &failure)
        })
    }

    /// Sets the default value on a product component.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the product declares no setter and
    /// an illegal-modification error if the component is not modifiable.
    pub fn set_default_value(
        &self,
        product: &mut ProductComponent,
        date: Option<NaiveDate>,
        value: Value,
    ) -> Result<()> {
        let resolved = self.required_method(product, ConfigMethodRole::DefaultValueSetter)?;
        let MethodBody::WriteValue(setter) = &resolved.method.body else {
            return Err(self.wrong_body(&resolved));
        };
        let arguments = vec![value.to_string()];
        let mut target = self.part().relevant_mut(product, date, resolved.on_generation)?;
        setter.call(target.payload_mut(), value).map_err(|failure| {
            self.part()
                .invocation_error(setter.method(), arguments, &target, &failure)
        })
    }

    /// Sets the value set on a product component.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the product declares no setter and
    /// an illegal-modification error if the component is not modifiable.
    pub fn set_value_set(
        &self,
        product: &mut ProductComponent,
        date: Option<NaiveDate>,
        value_set: ValueSet,
    ) -> Result<()> {
        let resolved = self.required_method(product, ConfigMethodRole::ValueSetSetter)?;
        let MethodBody::WriteValueSet(setter) = &resolved.method.body else {
            return Err(self.wrong_body(&resolved));
        };
        let arguments = vec![value_set.to_string()];
        let mut target = self.part().relevant_mut(product, date, resolved.on_generation)?;
        setter.call(target.payload_mut(), value_set).map_err(|failure| {
            self.part()
                .invocation_error(setter.method(), arguments, &target, &failure)
        })
    }

    fn configuring_product<'a>(
        &self,
        product: Option<&'a ProductComponent>,
    ) -> Result<&'a ProductComponent> {
        product.ok_or_else(|| {
            self.part()
                .configuration_error("product relevant attribute without a configuring product component")
        })
    }

    /// Finds the configuration method for a role on the product's class.
    fn method(
        &self,
        product: &ProductComponent,
        role: ConfigMethodRole,
    ) -> Result<Option<Arc<ResolvedMethod>>> {
        let product_type = self.part().owner.registry()?.product_cmpt_type_of(product)?;
        let Some(resolved) = self.0.0.methods.resolve(&product_type, role, self.name()) else {
            return Ok(None);
        };
        let parameters = resolved.method.parameters.as_slice();
        let valid = match role {
            ConfigMethodRole::DefaultValueGetter | ConfigMethodRole::ValueSetGetter => {
                matches!(parameters, [] | [ParameterKind::ValidationContext])
            }
            ConfigMethodRole::DefaultValueSetter | ConfigMethodRole::ValueSetSetter => {
                parameters.len() == 1
            }
        };
        if !valid {
            return Err(self.part().configuration_error(format!(
                "{role} {} has an unsupported signature",
                resolved.method.name
            )));
        }
        Ok(Some(resolved))
    }

    fn required_method(
        &self,
        product: &ProductComponent,
        role: ConfigMethodRole,
    ) -> Result<Arc<ResolvedMethod>> {
        self.method(product, role)?.ok_or_else(|| {
            self.part().configuration_error(format!(
                "no {role} declared for product class {}",
                product.class_id()
            ))
        })
    }

    fn wrong_body(&self, resolved: &ResolvedMethod) -> Error {
        self.part().configuration_error(format!(
            "{} does not match its role {:?}",
            resolved.method.name,
            resolved.method.role()
        ))
    }
}

impl Deref for PolicyAttribute {
    type Target = Attribute;

    fn deref(&self) -> &Attribute {
        &self.0
    }
}

/// An attribute of a product component type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductAttribute(Attribute);

impl ProductAttribute {
    pub(crate) const fn new(attribute: Attribute) -> Self {
        Self(attribute)
    }

    /// Returns true if the value is a list of values.
    #[must_use]
    pub fn is_multi_valued(&self) -> bool {
        self.declaration().multi_valued
    }

    /// Returns the value on a product component, read from the generation
    /// effective at `date` if the attribute changes over time.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no getter is declared and an
    /// invocation error if the generation is missing or the getter fails.
    pub fn value(&self, product: &ProductComponent, date: Option<NaiveDate>) -> Result<Value> {
        let getter = self
            .declaration()
            .getter
            .as_ref()
            .ok_or_else(|| self.part().configuration_error("no getter declared"))?;
        let target = self
            .part()
            .relevant(product, date, self.is_changing_over_time())?;
        getter.call(target.payload()).map_err(|failure| {
            self.part()
                .invocation_error(getter.method(), Vec::new(), &target, &failure)
        })
    }

    /// Sets the value on a product component.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no setter is declared, an
    /// illegal-modification error if the component is not modifiable, and
    /// an invocation error if the setter fails.
    pub fn set_value(
        &self,
        product: &mut ProductComponent,
        date: Option<NaiveDate>,
        value: Value,
    ) -> Result<()> {
        let setter = self
            .declaration()
            .setter
            .as_ref()
            .ok_or_else(|| self.part().configuration_error("no setter declared"))?;
        let arguments = vec![value.to_string()];
        let mut target = self
            .part()
            .relevant_mut(product, date, self.is_changing_over_time())?;
        setter.call(target.payload_mut(), value).map_err(|failure| {
            self.part()
                .invocation_error(setter.method(), arguments, &target, &failure)
        })
    }
}

impl Deref for ProductAttribute {
    type Target = Attribute;

    fn deref(&self) -> &Attribute {
        &self.0
    }
}
