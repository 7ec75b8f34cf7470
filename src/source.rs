use crate::error::ParseError;
use crate::fallback::extract_patterns;
use crate::symbols::{Inventory, SourceUnit};
use crate::walker::collect_structural;

/// Anything that can produce one unit's inventory: parsed text, raw text, or a live
/// environment snapshot.
pub trait InventorySource {
    fn unit(&self) -> &SourceUnit;

    fn collect(&self) -> Result<Inventory, ParseError>;
}

/// Source text analysed through the parser and structural walker.
#[derive(Debug, Clone)]
pub struct StructuralSource {
    unit: SourceUnit,
    text: String,
}

impl StructuralSource {
    pub fn new(unit: SourceUnit, text: impl Into<String>) -> Self {
        Self {
            unit,
            text: text.into(),
        }
    }
}

impl InventorySource for StructuralSource {
    fn unit(&self) -> &SourceUnit {
        &self.unit
    }

    fn collect(&self) -> Result<Inventory, ParseError> {
        collect_structural(self.unit.clone(), &self.text)
    }
}

/// Source text analysed by the lexical fallback. Never fails, but see
/// [`crate::fallback`] for what it cannot see.
#[derive(Debug, Clone)]
pub struct PatternSource {
    unit: SourceUnit,
    text: String,
}

impl PatternSource {
    pub fn new(unit: SourceUnit, text: impl Into<String>) -> Self {
        Self {
            unit,
            text: text.into(),
        }
    }
}

impl InventorySource for PatternSource {
    fn unit(&self) -> &SourceUnit {
        &self.unit
    }

    fn collect(&self) -> Result<Inventory, ParseError> {
        Ok(extract_patterns(&self.text).into_inventory(self.unit.clone()))
    }
}
