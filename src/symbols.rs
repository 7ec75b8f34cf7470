use indexmap::IndexSet;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Class,
    Method,
    Property,
    Function,
    /// Mutable bindings and constants alike.
    Variable,
}

impl SymbolKind {
    pub const ALL: [SymbolKind; 5] = [
        SymbolKind::Class,
        SymbolKind::Method,
        SymbolKind::Property,
        SymbolKind::Function,
        SymbolKind::Variable,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SymbolKind::Class => "class",
            SymbolKind::Method => "method",
            SymbolKind::Property => "property",
            SymbolKind::Function => "function",
            SymbolKind::Variable => "variable",
        }
    }

    /// Heading used by the text and XML reports.
    pub fn plural(self) -> &'static str {
        match self {
            SymbolKind::Class => "classes",
            SymbolKind::Method => "methods",
            SymbolKind::Property => "properties",
            SymbolKind::Function => "functions",
            SymbolKind::Variable => "variables",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub name: String,
}

/// Where a set of symbols came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceUnit {
    File(PathBuf),
    Url(String),
    /// An embedded script with no URL of its own.
    Inline,
    GlobalScope,
}

impl SourceUnit {
    pub fn file(path: impl AsRef<Path>) -> Self {
        SourceUnit::File(path.as_ref().to_path_buf())
    }

    /// Label used in reports and page records. Inline scripts have none.
    pub fn label(&self) -> Option<String> {
        match self {
            SourceUnit::File(p) => Some(p.to_string_lossy().replace('\\', "/")),
            SourceUnit::Url(u) => Some(u.clone()),
            SourceUnit::Inline => None,
            SourceUnit::GlobalScope => Some("Global Scope".to_string()),
        }
    }
}

impl fmt::Display for SourceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(l) => f.write_str(&l),
            None => f.write_str("inline"),
        }
    }
}

// Page records carry `null` for inline scripts, matching what the UI layer expects.
impl Serialize for SourceUnit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.label() {
            Some(l) => serializer.serialize_some(&l),
            None => serializer.serialize_none(),
        }
    }
}

/// Unique names in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedNames(IndexSet<String>);

impl OrderedNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` (and changes nothing) when the name is already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.0.insert(name.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }

    pub fn extend_from(&mut self, other: &OrderedNames) {
        for name in other.iter() {
            self.insert(name);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for OrderedNames {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut out = OrderedNames::new();
        for s in iter {
            out.insert(s);
        }
        out
    }
}

impl Serialize for OrderedNames {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

/// The unique declared names of one source unit, grouped by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inventory {
    source: SourceUnit,
    pub classes: OrderedNames,
    pub methods: OrderedNames,
    pub properties: OrderedNames,
    pub functions: OrderedNames,
    pub variables: OrderedNames,
}

impl Inventory {
    pub fn new(source: SourceUnit) -> Self {
        Self {
            source,
            classes: OrderedNames::new(),
            methods: OrderedNames::new(),
            properties: OrderedNames::new(),
            functions: OrderedNames::new(),
            variables: OrderedNames::new(),
        }
    }

    pub fn source(&self) -> &SourceUnit {
        &self.source
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

    pub(crate) fn names_mut(&mut self, kind: SymbolKind) -> &mut OrderedNames {
        match kind {
            SymbolKind::Class => &mut self.classes,
            SymbolKind::Method => &mut self.methods,
            SymbolKind::Property => &mut self.properties,
            SymbolKind::Function => &mut self.functions,
            SymbolKind::Variable => &mut self.variables,
        }
    }

    pub(crate) fn record(&mut self, kind: SymbolKind, name: impl Into<String>) -> bool {
        self.names_mut(kind).insert(name)
    }

    /// Every collected symbol, kinds in `SymbolKind::ALL` order.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        SymbolKind::ALL.into_iter().flat_map(move |kind| {
            self.names(kind).iter().map(move |name| Symbol {
                kind,
                name: name.to_string(),
            })
        })
    }

    pub fn is_empty(&self) -> bool {
        SymbolKind::ALL.iter().all(|k| self.names(*k).is_empty())
    }
}
