pub mod aggregate;
pub mod batch;
pub mod collectors;
pub mod config;
pub mod error;
pub mod fallback;
pub mod fetch;
pub mod global_scope;
pub mod page;
pub mod parse;
pub mod report;
pub mod scanner;
pub mod source;
pub mod symbols;
pub mod walker;

pub use aggregate::{CorpusInventory, PageScan, UnitRecord};
pub use error::{FetchError, ParseError, ScanError};
pub use symbols::{Inventory, OrderedNames, SourceUnit, Symbol, SymbolKind};
