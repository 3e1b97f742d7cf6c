//! Table usages of product component types.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use ipsmodel_declaration::{ExtensionProperties, TableUsageDeclaration};
use ipsmodel_foundation::{Deprecation, Locale, PartKind, Result};
use ipsmodel_runtime::{ProductComponent, RuntimeRepository, TableInstance};

use crate::element::{DocumentationKind, ModelElement};
use crate::part::PartCore;
use crate::types::{Type, TypeCore};

struct TableUsageInner {
    part: PartCore,
    declaration: TableUsageDeclaration,
}

/// A table of a given structure that a product component refers to by name.
#[derive(Clone)]
pub struct TableUsage(Arc<TableUsageInner>);

impl TableUsage {
    pub(crate) fn build(owner: &Arc<TypeCore>, declaration: &TableUsageDeclaration) -> Self {
        Self(Arc::new(TableUsageInner {
            part: PartCore::new(
                owner,
                PartKind::TableUsage,
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

    /// Returns the name of the table structure.
    #[must_use]
    pub fn table_structure(&self) -> &str {
        &self.0.declaration.structure
    }

    /// Returns true if every product component must name a table.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.0.declaration.required
    }

    /// Returns true if the table name is configured per generation.
    #[must_use]
    pub fn is_changing_over_time(&self) -> bool {
        self.0.declaration.changing_over_time
    }

    /// Returns the type declaring this table usage.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the registry has been dropped.
    pub fn owning_type(&self) -> Result<Type> {
        self.part().owning_type()
    }

    /// Returns the table usage this one overrides.
    #[must_use]
    pub fn super_table_usage(&self) -> Option<TableUsage> {
        self.part()
            .super_type()
            .and_then(|super_type| super_type.declared_table_usage(self.name()).ok())
    }

    /// Returns true if this table usage overrides one of a supertype.
    #[must_use]
    pub fn is_overriding(&self) -> bool {
        self.super_table_usage().is_some()
    }

    /// Returns the name of the table used by a product component.
    ///
    /// # Errors
    ///
    /// Returns an invocation error if no generation is effective at `date`.
    pub fn table_name(&self, product: &ProductComponent, date: Option<NaiveDate>) -> Result<Option<String>> {
        let source = self
            .part()
            .relevant(product, date, self.is_changing_over_time())?;
        Ok(source
            .configuration()
            .table_name(self.name())
            .map(str::to_string))
    }

    /// Returns the table used by a product component, looked up in a repository.
    ///
    /// # Errors
    ///
    /// See [`TableUsage::table_name`].
    pub fn table(
        &self,
        repository: &dyn RuntimeRepository,
        product: &ProductComponent,
        date: Option<NaiveDate>,
    ) -> Result<Option<Arc<TableInstance>>> {
        Ok(self
            .table_name(product, date)?
            .and_then(|name| repository.table(&name)))
    }

    /// Sets the name of the table used by a product component.
    ///
    /// # Errors
    ///
    /// Returns an illegal-modification error if the component is not modifiable.
    pub fn set_table_name(
        &self,
        product: &mut ProductComponent,
        date: Option<NaiveDate>,
        table: &str,
    ) -> Result<()> {
        let mut source = self
            .part()
            .relevant_mut(product, date, self.is_changing_over_time())?;
        source
            .configuration_mut()
            .set_table_name(&self.0.part.name, table);
        Ok(())
    }
}

impl PartialEq for TableUsage {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for TableUsage {}

impl fmt::Debug for TableUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableUsage")
            .field("name", &self.part().to_string())
            .field("structure", &self.table_structure())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for TableUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.part(), f)
    }
}

impl ModelElement for TableUsage {
    fn name(&self) -> &str {
        &self.part().name
    }

    fn documentation(&self, kind: DocumentationKind, locale: &Locale) -> Option<String> {
        self.part().documentation(kind, locale, || {
            self.super_table_usage()
                .and_then(|usage| usage.documentation(kind, locale))
        })
    }

    fn deprecation(&self) -> Option<&Deprecation> {
        self.part().deprecation.as_ref()
    }

    fn extension_properties(&self) -> &ExtensionProperties {
        &self.part().extension_properties
    }
}
