//! Validation rules of policy component types.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use ipsmodel_declaration::{ExtensionProperties, ValidationRuleDeclaration};
use ipsmodel_foundation::{Deprecation, Locale, PartKind, Result};
use ipsmodel_runtime::{ProductComponent, Severity};

use crate::element::{DocumentationKind, ModelElement};
use crate::part::PartCore;
use crate::types::{Type, TypeCore};

struct RuleInner {
    part: PartCore,
    declaration: ValidationRuleDeclaration,
}

/// A validation rule of a policy component type.
///
/// Product-relevant rules can be switched on and off per product component
/// (or generation); the others are always in their default state.
#[derive(Clone)]
pub struct ValidationRule(Arc<RuleInner>);

impl ValidationRule {
    pub(crate) fn build(owner: &Arc<TypeCore>, declaration: &ValidationRuleDeclaration) -> Self {
        Self(Arc::new(RuleInner {
            part: PartCore::new(
                owner,
                PartKind::ValidationRule,
                &declaration.name,
                declaration.deprecation.as_ref(),
                &declaration.extension_properties,
            ),
            declaration: declaration.clone(),
        }))
    }

    fn part(&self) -> &PartCore {
        &self.0.part
    }

    /// Returns the code of the message the rule creates.
    #[must_use]
    pub fn message_code(&self) -> &str {
        &self.0.declaration.message_code
    }

    /// Returns the severity of the message the rule creates.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.0.declaration.severity
    }

    /// Returns true if activation is configured per generation.
    #[must_use]
    pub fn is_changing_over_time(&self) -> bool {
        self.0.declaration.changing_over_time
    }

    /// Returns true if the rule is active unless configured otherwise.
    #[must_use]
    pub fn is_activated_by_default(&self) -> bool {
        self.0.declaration.activated_by_default
    }

    /// Returns true if products can switch the rule on and off.
    #[must_use]
    pub fn is_product_relevant(&self) -> bool {
        self.0.declaration.product_relevant
    }

    /// Returns the type declaring this rule.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the registry has been dropped.
    pub fn owning_type(&self) -> Result<Type> {
        self.part().owning_type()
    }

    /// Returns the rule this one overrides.
    #[must_use]
    pub fn super_validation_rule(&self) -> Option<ValidationRule> {
        self.part()
            .super_type()
            .and_then(|super_type| super_type.declared_validation_rule(self.name()).ok())
    }

    /// Returns true if this rule overrides one of a supertype.
    #[must_use]
    pub fn is_overriding(&self) -> bool {
        self.super_validation_rule().is_some()
    }

    /// Returns true if the rule is active for a product component.
    ///
    /// # Errors
    ///
    /// Returns an invocation error if the rule changes over time and no
    /// generation is effective at `date`.
    pub fn is_activated(&self, product: Option<&ProductComponent>, date: Option<NaiveDate>) -> Result<bool> {
        let default = self.is_activated_by_default();
        match product {
            Some(product) if self.is_product_relevant() => {
                let source = self
                    .part()
                    .relevant(product, date, self.is_changing_over_time())?;
                Ok(source
                    .configuration()
                    .rule_activation(self.name())
                    .unwrap_or(default))
            }
            _ => Ok(default),
        }
    }

    /// Switches the rule on or off for a product component.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the rule is not product relevant
    /// and an illegal-modification error if the component is not modifiable.
    pub fn set_activated(
        &self,
        product: &mut ProductComponent,
        date: Option<NaiveDate>,
        active: bool,
    ) -> Result<()> {
        if !self.is_product_relevant() {
            return Err(self
                .part()
                .configuration_error("rule is not product relevant"));
        }
        let mut source = self
            .part()
            .relevant_mut(product, date, self.is_changing_over_time())?;
        source
            .configuration_mut()
            .set_rule_activation(&self.0.part.name, active);
        Ok(())
    }
}

impl PartialEq for ValidationRule {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ValidationRule {}

impl fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRule")
            .field("name", &self.part().to_string())
            .field("message_code", &self.message_code())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.part(), f)
    }
}

impl ModelElement for ValidationRule {
    fn name(&self) -> &str {
        &self.part().name
    }

    fn documentation(&self, kind: DocumentationKind, locale: &Locale) -> Option<String> {
        self.part().documentation(kind, locale, || {
            self.super_validation_rule()
                .and_then(|rule| rule.documentation(kind, locale))
        })
    }

    fn deprecation(&self) -> Option<&Deprecation> {
        self.part().deprecation.as_ref()
    }

    fn extension_properties(&self) -> &ExtensionProperties {
        &self.part().extension_properties
    }
}
