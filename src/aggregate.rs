//! Cross-unit aggregation for the two run modes.
//!
//! - [`CorpusInventory`]: batch mode. One ordered-unique collection per kind across
//!   every unit; order is unit of first discovery, then position within that unit.
//! - [`PageScan`]: page mode. One [`UnitRecord`] per unit, no cross-unit dedup.
//!
//! Neither aggregate ever drops a unit's results because another unit failed.

use serde::Serialize;

use crate::fallback::PatternInventory;
use crate::global_scope::GlobalSnapshot;
use crate::symbols::{Inventory, OrderedNames, SourceUnit, SymbolKind};

/// A unit that contributed nothing, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitFailure {
    pub source: SourceUnit,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CorpusInventory {
    pub classes: OrderedNames,
    pub methods: OrderedNames,
    pub properties: OrderedNames,
    pub functions: OrderedNames,
    pub variables: OrderedNames,
    pub units_merged: usize,
    pub failures: Vec<UnitFailure>,
}

impl CorpusInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self, kind: SymbolKind) -> &OrderedNames {
        match kind {
            SymbolKind::Class => &self.classes,
            SymbolKind::Method => &self.methods,
            SymbolKind::Property => &self.properties,
            SymbolKind::Function => &self.functions,
            SymbolKind::Variable => &self.variables,
        }
    }

    fn names_mut(&mut self, kind: SymbolKind) -> &mut OrderedNames {
        match kind {
            SymbolKind::Class => &mut self.classes,
            SymbolKind::Method => &mut self.methods,
            SymbolKind::Property => &mut self.properties,
            SymbolKind::Function => &mut self.functions,
            SymbolKind::Variable => &mut self.variables,
        }
    }

    /// Fold a finished unit into the corpus. The inventory is consumed; it is never
    /// touched again after hand-off.
    pub fn merge(&mut self, inventory: Inventory) {
        for kind in SymbolKind::ALL {
            let src = inventory.names(kind);
            self.names_mut(kind).extend_from(src);
        }
        self.units_merged += 1;
    }

    pub fn record_failure(&mut self, source: SourceUnit, error: impl ToString) {
        self.failures.push(UnitFailure {
            source,
            error: error.to_string(),
        });
    }

    pub fn total_symbols(&self) -> usize {
        SymbolKind::ALL.iter().map(|k| self.names(*k).len()).sum()
    }
}

/// One entry of a page scan, shaped for the presentation layer.
///
/// Structural records carry `methods`/`properties`; pattern records carry
/// `constants`. A record with `error` carries no symbol data at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitRecord {
    pub source: SourceUnit,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub methods: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub functions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constants: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UnitRecord {
    fn empty(source: SourceUnit) -> Self {
        Self {
            source,
            classes: None,
            methods: None,
            properties: None,
            functions: None,
            variables: None,
            constants: None,
            error: None,
        }
    }

    pub fn structural(inventory: &Inventory) -> Self {
        Self {
            classes: Some(inventory.classes.to_vec()),
            methods: Some(inventory.methods.to_vec()),
            properties: Some(inventory.properties.to_vec()),
            functions: Some(inventory.functions.to_vec()),
            variables: Some(inventory.variables.to_vec()),
            ..Self::empty(inventory.source().clone())
        }
    }

    pub fn pattern(source: SourceUnit, found: &PatternInventory) -> Self {
        Self {
            classes: Some(found.classes.to_vec()),
            functions: Some(found.functions.to_vec()),
            variables: Some(found.variables.to_vec()),
            constants: Some(found.constants.to_vec()),
            ..Self::empty(source)
        }
    }

    pub fn global(snapshot: GlobalSnapshot) -> Self {
        Self {
            functions: Some(snapshot.functions),
            variables: Some(snapshot.variables),
            ..Self::empty(SourceUnit::GlobalScope)
        }
    }

    pub fn failed(source: SourceUnit, error: impl ToString) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::empty(source)
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Per-unit results of one page scan, in request order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageScan {
    pub files: Vec<UnitRecord>,
}

impl PageScan {
    pub fn push(&mut self, record: UnitRecord) {
        self.files.push(record);
    }

    pub fn errors(&self) -> usize {
        self.files.iter().filter(|r| r.is_error()).count()
    }
}
