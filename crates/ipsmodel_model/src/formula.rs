//! Formulas of product component types.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use ipsmodel_declaration::{ExtensionProperties, FormulaDeclaration};
use ipsmodel_foundation::{Deprecation, Locale, PartKind, Result};
use ipsmodel_runtime::{ProductComponent, ProductObject};

use crate::element::{DocumentationKind, ModelElement};
use crate::part::PartCore;
use crate::types::{Type, TypeCore};

struct FormulaInner {
    part: PartCore,
    declaration: FormulaDeclaration,
}

/// A formula whose text is configured by product components.
#[derive(Clone)]
pub struct Formula(Arc<FormulaInner>);

impl Formula {
    pub(crate) fn build(owner: &Arc<TypeCore>, declaration: &FormulaDeclaration) -> Self {
        Self(Arc::new(FormulaInner {
            part: PartCore::new(
                owner,
                PartKind::Formula,
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

    /// Returns true if every product component must configure a text.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.0.declaration.required
    }

    /// Returns true if the text is configured per generation.
    #[must_use]
    pub fn is_changing_over_time(&self) -> bool {
        self.0.declaration.changing_over_time
    }

    /// Returns the product component or generation holding the text.
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

    /// Returns the type declaring this formula.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the registry has been dropped.
    pub fn owning_type(&self) -> Result<Type> {
        self.part().owning_type()
    }

    /// Returns the formula this one overrides.
    #[must_use]
    pub fn super_formula(&self) -> Option<Formula> {
        self.part()
            .super_type()
            .and_then(|super_type| super_type.declared_formula(self.name()).ok())
    }

    /// Returns true if this formula overrides one of a supertype.
    #[must_use]
    pub fn is_overriding(&self) -> bool {
        self.super_formula().is_some()
    }

    /// Returns the formula text configured by a product component.
    ///
    /// # Errors
    ///
    /// Returns an invocation error if no generation is effective at `date`.
    pub fn formula_text(&self, product: &ProductComponent, date: Option<NaiveDate>) -> Result<Option<String>> {
        Ok(self
            .product_object(product, date)?
            .configuration()
            .formula_text(self.name())
            .map(str::to_string))
    }

    /// Returns true if no text or only whitespace is configured.
    ///
    /// # Errors
    ///
    /// See [`Formula::formula_text`].
    pub fn is_empty(&self, product: &ProductComponent, date: Option<NaiveDate>) -> Result<bool> {
        Ok(self
            .formula_text(product, date)?
            .is_none_or(|text| text.trim().is_empty()))
    }

    /// Sets the formula text on a product component.
    ///
    /// # Errors
    ///
    /// Returns an illegal-modification error if the component is not modifiable.
    pub fn set_formula_text(
        &self,
        product: &mut ProductComponent,
        date: Option<NaiveDate>,
        text: &str,
    ) -> Result<()> {
        let mut source = self
            .part()
            .relevant_mut(product, date, self.is_changing_over_time())?;
        source
            .configuration_mut()
            .set_formula_text(&self.0.part.name, text);
        Ok(())
    }
}

impl PartialEq for Formula {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Formula {}

impl fmt::Debug for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formula")
            .field("name", &self.part().to_string())
            .field("required", &self.is_required())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.part(), f)
    }
}

impl ModelElement for Formula {
    fn name(&self) -> &str {
        &self.part().name
    }

    fn documentation(&self, kind: DocumentationKind, locale: &Locale) -> Option<String> {
        self.part().documentation(kind, locale, || {
            self.super_formula()
                .and_then(|formula| formula.documentation(kind, locale))
        })
    }

    fn deprecation(&self) -> Option<&Deprecation> {
        self.part().deprecation.as_ref()
    }

    fn extension_properties(&self) -> &ExtensionProperties {
        &self.part().extension_properties
    }
}
