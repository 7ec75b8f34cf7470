//! Lexical fallback for contexts that cannot run the structural parser.
//!
//! **Lower fidelity than [`crate::walker`].** The scans see raw text only:
//! - no methods or properties (class bodies are not understood);
//! - false positives for declaration-shaped text inside strings and comments;
//! - misses declarations the patterns do not cover (destructuring, `$` in names,
//!   non-ASCII identifiers, keyword and name split by a comment).
//!
//! Use it as an approximation, never as a drop-in replacement for the structural path.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

use crate::symbols::{Inventory, OrderedNames, SourceUnit, SymbolKind};

struct Patterns {
    class: Regex,
    function: Regex,
    mutable: Regex,
    constant: Regex,
}

fn patterns() -> &'static Patterns {
    static RE: OnceLock<Patterns> = OnceLock::new();
    RE.get_or_init(|| Patterns {
        class: Regex::new(r"class\s+([A-Za-z0-9_]+)").unwrap(),
        function: Regex::new(r"function\s+([A-Za-z0-9_]+)\s*\(").unwrap(),
        mutable: Regex::new(r"(?:var|let)\s+([A-Za-z0-9_]+)\s*[=;]").unwrap(),
        constant: Regex::new(r"const\s+([A-Za-z0-9_]+)\s*=").unwrap(),
    })
}

/// What the pattern path can see. Constants stay separate here for reporting; they
/// fold into `variables` when converted into an [`Inventory`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatternInventory {
    pub classes: OrderedNames,
    pub functions: OrderedNames,
    pub variables: OrderedNames,
    pub constants: OrderedNames,
}

impl PatternInventory {
    pub fn into_inventory(self, unit: SourceUnit) -> Inventory {
        let mut inv = Inventory::new(unit);
        inv.classes = self.classes;
        inv.functions = self.functions;
        inv.variables = self.variables;
        for name in self.constants.iter() {
            inv.record(SymbolKind::Variable, name);
        }
        inv
    }
}

fn scan(re: &Regex, text: &str) -> OrderedNames {
    re.captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Run the four independent declaration scans over `text`.
pub fn extract_patterns(text: &str) -> PatternInventory {
    let p = patterns();
    PatternInventory {
        classes: scan(&p.class, text),
        functions: scan(&p.function, text),
        variables: scan(&p.mutable, text),
        constants: scan(&p.constant, text),
    }
}
