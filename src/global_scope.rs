//! Snapshot of a live environment's top-level bindings.
//!
//! This is not source analysis. The result depends on whatever the host environment
//! has defined at snapshot time and is not reproducible across environments or runs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ParseError;
use crate::source::InventorySource;
use crate::symbols::{Inventory, SourceUnit, SymbolKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalBinding {
    pub name: String,
    pub callable: bool,
}

/// The ambient global object, reduced to its own (non-inherited) bindings.
pub trait GlobalObject {
    fn own_bindings(&self) -> Vec<GlobalBinding>;
}

/// Own bindings captured by the host as `name -> typeof value`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeofSnapshot(pub BTreeMap<String, String>);

impl GlobalObject for TypeofSnapshot {
    fn own_bindings(&self) -> Vec<GlobalBinding> {
        self.0
            .iter()
            .map(|(name, type_of)| GlobalBinding {
                name: name.clone(),
                callable: type_of == "function",
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GlobalSnapshot {
    pub functions: Vec<String>,
    pub variables: Vec<String>,
}

pub struct GlobalScopeSnapshotter<G> {
    unit: SourceUnit,
    global: G,
}

impl<G: GlobalObject> GlobalScopeSnapshotter<G> {
    pub fn new(global: G) -> Self {
        Self {
            unit: SourceUnit::GlobalScope,
            global,
        }
    }

    /// Callables and everything else, each sorted lexicographically.
    pub fn snapshot(&self) -> GlobalSnapshot {
        let (mut functions, mut variables): (Vec<_>, Vec<_>) = (Vec::new(), Vec::new());
        for binding in self.global.own_bindings() {
            if binding.callable {
                functions.push(binding.name);
            } else {
                variables.push(binding.name);
            }
        }
        functions.sort();
        functions.dedup();
        variables.sort();
        variables.dedup();
        GlobalSnapshot { functions, variables }
    }
}

impl<G: GlobalObject> InventorySource for GlobalScopeSnapshotter<G> {
    fn unit(&self) -> &SourceUnit {
        &self.unit
    }

    fn collect(&self) -> Result<Inventory, ParseError> {
        let snap = self.snapshot();
        let mut inv = Inventory::new(self.unit.clone());
        for name in snap.functions {
            inv.record(SymbolKind::Function, name);
        }
        for name in snap.variables {
            inv.record(SymbolKind::Variable, name);
        }
        Ok(inv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedGlobal(Vec<(&'static str, bool)>);

    impl GlobalObject for FixedGlobal {
        fn own_bindings(&self) -> Vec<GlobalBinding> {
            self.0
                .iter()
                .map(|(n, c)| GlobalBinding {
                    name: n.to_string(),
                    callable: *c,
                })
                .collect()
        }
    }

    #[test]
    fn classifies_and_sorts() {
        let g = FixedGlobal(vec![("zeta", true), ("alpha", false), ("fetch", true), ("document", false)]);
        let snap = GlobalScopeSnapshotter::new(g).snapshot();
        assert_eq!(snap.functions, vec!["fetch", "zeta"]);
        assert_eq!(snap.variables, vec!["alpha", "document"]);
    }

    #[test]
    fn typeof_snapshot_treats_only_functions_as_callable() {
        let json = r#"{ "setTimeout": "function", "location": "object", "name": "string", "Foo": "function" }"#;
        let snap: TypeofSnapshot = serde_json::from_str(json).unwrap();
        let inv = GlobalScopeSnapshotter::new(snap).collect().unwrap();
        assert_eq!(inv.source(), &SourceUnit::GlobalScope);
        assert_eq!(inv.functions.to_vec(), vec!["Foo", "setTimeout"]);
        assert_eq!(inv.variables.to_vec(), vec!["location", "name"]);
        assert!(inv.classes.is_empty());
    }
}
