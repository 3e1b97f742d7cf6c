//! Declarations of the parts of a type.

use std::fmt;

use indexmap::IndexMap;
use ipsmodel_foundation::{
    Cardinality, Datatype, DeprecationMarker, Value, ValueSet, ValueSetKind,
};
use ipsmodel_runtime::{ClassId, Severity};

use crate::accessor::{
    LinkAdder, LinkRemover, LinksGetter, TargetAdder, TargetRemover, TargetSetter, TargetsGetter,
    ValueGetter, ValueSetter,
};

/// Extension property values by property id, in declaration order.
pub type ExtensionProperties = IndexMap<String, Value>;

/// A declared attribute.
#[derive(Clone, Debug)]
pub struct AttributeDeclaration {
    /// Attribute name.
    pub name: String,
    /// Datatype of the values.
    pub datatype: Datatype,
    /// Model name of the attribute kind (`changeable`, `constant`, `derived`, `computed`).
    pub kind: String,
    /// Kind of the model value set.
    pub value_set_kind: ValueSetKind,
    /// Whether the configuration lives in product generations.
    pub changing_over_time: bool,
    /// Whether a product component configures this attribute.
    pub product_relevant: bool,
    /// Whether a product attribute holds a list of values.
    pub multi_valued: bool,
    /// Reads the value.
    pub getter: Option<ValueGetter>,
    /// Writes the value.
    pub setter: Option<ValueSetter>,
    /// Class-level constant value.
    pub constant_value: Option<Value>,
    /// Class-level default value.
    pub default_value: Option<Value>,
    /// Class-level value set.
    pub value_set: Option<ValueSet>,
    /// Deprecation marker.
    pub deprecation: Option<DeprecationMarker>,
    /// Extension properties.
    pub extension_properties: ExtensionProperties,
}

impl AttributeDeclaration {
    /// Declares a changeable attribute with an unrestricted value set.
    #[must_use]
    pub fn new(name: &str, datatype: Datatype) -> Self {
        Self {
            name: name.to_string(),
            datatype,
            kind: "changeable".to_string(),
            value_set_kind: ValueSetKind::AllValues,
            changing_over_time: false,
            product_relevant: false,
            multi_valued: false,
            getter: None,
            setter: None,
            constant_value: None,
            default_value: None,
            value_set: None,
            deprecation: None,
            extension_properties: ExtensionProperties::new(),
        }
    }

    /// Sets the attribute kind by model name.
    #[must_use]
    pub fn with_kind(mut self, kind: &str) -> Self {
        self.kind = kind.to_string();
        self
    }

    /// Sets the value set kind.
    #[must_use]
    pub fn with_value_set_kind(mut self, kind: ValueSetKind) -> Self {
        self.value_set_kind = kind;
        self
    }

    /// Marks the attribute as configured in product generations.
    #[must_use]
    pub fn changing_over_time(mut self) -> Self {
        self.changing_over_time = true;
        self
    }

    /// Marks the attribute as configured by a product component.
    #[must_use]
    pub fn product_relevant(mut self) -> Self {
        self.product_relevant = true;
        self
    }

    /// Marks the attribute as multi-valued.
    #[must_use]
    pub fn multi_valued(mut self) -> Self {
        self.multi_valued = true;
        self
    }

    /// Sets the getter.
    #[must_use]
    pub fn with_getter(mut self, getter: ValueGetter) -> Self {
        self.getter = Some(getter);
        self
    }

    /// Sets the setter.
    #[must_use]
    pub fn with_setter(mut self, setter: ValueSetter) -> Self {
        self.setter = Some(setter);
        self
    }

    /// Sets the class-level constant.
    #[must_use]
    pub fn with_constant(mut self, value: Value) -> Self {
        self.constant_value = Some(value);
        self
    }

    /// Sets the class-level default value.
    #[must_use]
    pub fn with_default_value(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Sets the class-level value set.
    #[must_use]
    pub fn with_value_set(mut self, value_set: ValueSet) -> Self {
        self.value_set_kind = value_set.kind();
        self.value_set = Some(value_set);
        self
    }

    /// Marks the attribute as deprecated.
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
}

/// How strongly an association binds its targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssociationKind {
    /// The source owns the targets.
    Composition,
    /// A plain reference.
    Association,
    /// The reverse of a composition, from part to owner.
    CompositionToMaster,
}

impl fmt::Display for AssociationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Composition => f.write_str("composition"),
            Self::Association => f.write_str("association"),
            Self::CompositionToMaster => f.write_str("compositionToMaster"),
        }
    }
}

/// Reference to the association an association is paired with, on the
/// configuring or configured type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MatchingAssociationRef {
    /// Class declaring the matching association.
    pub source: ClassId,
    /// Name of the matching association.
    pub name: &'static str,
}

/// A declared association.
#[derive(Clone, Debug)]
pub struct AssociationDeclaration {
    /// Singular name.
    pub name: String,
    /// Plural name, for to-many associations.
    pub plural_name: Option<String>,
    /// Class of the targets.
    pub target: ClassId,
    /// Association kind.
    pub kind: AssociationKind,
    /// Lower bound.
    pub min: u32,
    /// Upper bound.
    pub max: Cardinality,
    /// Whether the association is a derived union of its subsets.
    pub derived_union: bool,
    /// Name of the derived union this association is a subset of.
    pub subset_of_derived_union: Option<String>,
    /// Name of the inverse association.
    pub inverse: Option<String>,
    /// Matching association on the paired type.
    pub matching: Option<MatchingAssociationRef>,
    /// Whether product links live in generations.
    pub changing_over_time: bool,
    /// Reads the targets of a policy association.
    pub targets_getter: Option<TargetsGetter>,
    /// Replaces the target of a to-one policy association.
    pub target_setter: Option<TargetSetter>,
    /// Adds a target to a to-many policy association.
    pub target_adder: Option<TargetAdder>,
    /// Removes a target from a to-many policy association.
    pub target_remover: Option<TargetRemover>,
    /// Reads the links of a product association.
    pub links_getter: Option<LinksGetter>,
    /// Adds a link to a product association.
    pub link_adder: Option<LinkAdder>,
    /// Removes a link from a product association.
    pub link_remover: Option<LinkRemover>,
    /// Deprecation marker.
    pub deprecation: Option<DeprecationMarker>,
    /// Extension properties.
    pub extension_properties: ExtensionProperties,
}

impl AssociationDeclaration {
    /// Declares an optional to-one association.
    #[must_use]
    pub fn new(name: &str, target: ClassId) -> Self {
        Self {
            name: name.to_string(),
            plural_name: None,
            target,
            kind: AssociationKind::Association,
            min: 0,
            max: Cardinality::Bounded(1),
            derived_union: false,
            subset_of_derived_union: None,
            inverse: None,
            matching: None,
            changing_over_time: false,
            targets_getter: None,
            target_setter: None,
            target_adder: None,
            target_remover: None,
            links_getter: None,
            link_adder: None,
            link_remover: None,
            deprecation: None,
            extension_properties: ExtensionProperties::new(),
        }
    }

    /// Sets the plural name.
    #[must_use]
    pub fn with_plural_name(mut self, plural_name: &str) -> Self {
        self.plural_name = Some(plural_name.to_string());
        self
    }

    /// Sets the association kind.
    #[must_use]
    pub fn with_kind(mut self, kind: AssociationKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the cardinality.
    #[must_use]
    pub fn with_cardinality(mut self, min: u32, max: Cardinality) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Marks the association as derived union.
    #[must_use]
    pub fn derived_union(mut self) -> Self {
        self.derived_union = true;
        self
    }

    /// Marks the association as subset of a derived union.
    #[must_use]
    pub fn subset_of(mut self, union: &str) -> Self {
        self.subset_of_derived_union = Some(union.to_string());
        self
    }

    /// Sets the inverse association.
    #[must_use]
    pub fn with_inverse(mut self, inverse: &str) -> Self {
        self.inverse = Some(inverse.to_string());
        self
    }

    /// Sets the matching association.
    #[must_use]
    pub fn matching(mut self, source: ClassId, name: &'static str) -> Self {
        self.matching = Some(MatchingAssociationRef { source, name });
        self
    }

    /// Marks the product links as living in generations.
    #[must_use]
    pub fn changing_over_time(mut self) -> Self {
        self.changing_over_time = true;
        self
    }

    /// Sets the targets getter.
    #[must_use]
    pub fn with_targets_getter(mut self, getter: TargetsGetter) -> Self {
        self.targets_getter = Some(getter);
        self
    }

    /// Sets the to-one target setter.
    #[must_use]
    pub fn with_target_setter(mut self, setter: TargetSetter) -> Self {
        self.target_setter = Some(setter);
        self
    }

    /// Sets the to-many target adder and remover.
    #[must_use]
    pub fn with_target_mutators(mut self, adder: TargetAdder, remover: TargetRemover) -> Self {
        self.target_adder = Some(adder);
        self.target_remover = Some(remover);
        self
    }

    /// Sets the product link accessors.
    #[must_use]
    pub fn with_link_accessors(
        mut self,
        getter: LinksGetter,
        adder: LinkAdder,
        remover: LinkRemover,
    ) -> Self {
        self.links_getter = Some(getter);
        self.link_adder = Some(adder);
        self.link_remover = Some(remover);
        self
    }

    /// Marks the association as deprecated.
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
}

/// A declared validation rule.
#[derive(Clone, Debug)]
pub struct ValidationRuleDeclaration {
    /// Rule name.
    pub name: String,
    /// Code of the message the rule creates.
    pub message_code: String,
    /// Severity of the message.
    pub severity: Severity,
    /// Whether the activation lives in product generations.
    pub changing_over_time: bool,
    /// Activation when no product configures the rule.
    pub activated_by_default: bool,
    /// Whether a product component configures the activation.
    pub product_relevant: bool,
    /// Deprecation marker.
    pub deprecation: Option<DeprecationMarker>,
    /// Extension properties.
    pub extension_properties: ExtensionProperties,
}

impl ValidationRuleDeclaration {
    /// Declares an error-severity rule that is active by default.
    #[must_use]
    pub fn new(name: &str, message_code: &str) -> Self {
        Self {
            name: name.to_string(),
            message_code: message_code.to_string(),
            severity: Severity::Error,
            changing_over_time: false,
            activated_by_default: true,
            product_relevant: false,
            deprecation: None,
            extension_properties: ExtensionProperties::new(),
        }
    }

    /// Sets the severity.
    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the default activation.
    #[must_use]
    pub fn activated_by_default(mut self, active: bool) -> Self {
        self.activated_by_default = active;
        self
    }

    /// Marks the rule as configured by a product component.
    #[must_use]
    pub fn product_relevant(mut self) -> Self {
        self.product_relevant = true;
        self
    }

    /// Marks the activation as living in product generations.
    #[must_use]
    pub fn changing_over_time(mut self) -> Self {
        self.changing_over_time = true;
        self
    }

    /// Marks the rule as deprecated.
    #[must_use]
    pub fn deprecated(mut self, marker: DeprecationMarker) -> Self {
        self.deprecation = Some(marker);
        self
    }
}

/// A declared table usage.
#[derive(Clone, Debug)]
pub struct TableUsageDeclaration {
    /// Usage name.
    pub name: String,
    /// Name of the table structure.
    pub structure: String,
    /// Whether a table must be assigned.
    pub required: bool,
    /// Whether the assignment lives in product generations.
    pub changing_over_time: bool,
    /// Deprecation marker.
    pub deprecation: Option<DeprecationMarker>,
    /// Extension properties.
    pub extension_properties: ExtensionProperties,
}

impl TableUsageDeclaration {
    /// Declares an optional table usage.
    #[must_use]
    pub fn new(name: &str, structure: &str) -> Self {
        Self {
            name: name.to_string(),
            structure: structure.to_string(),
            required: false,
            changing_over_time: false,
            deprecation: None,
            extension_properties: ExtensionProperties::new(),
        }
    }

    /// Marks the usage as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks the assignment as living in product generations.
    #[must_use]
    pub fn changing_over_time(mut self) -> Self {
        self.changing_over_time = true;
        self
    }
}

/// A declared formula.
#[derive(Clone, Debug)]
pub struct FormulaDeclaration {
    /// Formula name.
    pub name: String,
    /// Whether a formula text must be entered.
    pub required: bool,
    /// Whether the text lives in product generations.
    pub changing_over_time: bool,
    /// Deprecation marker.
    pub deprecation: Option<DeprecationMarker>,
    /// Extension properties.
    pub extension_properties: ExtensionProperties,
}

impl FormulaDeclaration {
    /// Declares an optional formula.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            required: false,
            changing_over_time: false,
            deprecation: None,
            extension_properties: ExtensionProperties::new(),
        }
    }

    /// Marks the formula as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks the text as living in product generations.
    #[must_use]
    pub fn changing_over_time(mut self) -> Self {
        self.changing_over_time = true;
        self
    }
}
