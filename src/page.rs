//! Page-scan mode: the scripts of one page plus its global scope.

use serde::Deserialize;

use crate::aggregate::{PageScan, UnitRecord};
use crate::config::Strategy;
use crate::fallback::extract_patterns;
use crate::fetch::ScriptFetcher;
use crate::global_scope::{GlobalScopeSnapshotter, TypeofSnapshot};
use crate::source::{InventorySource, StructuralSource};
use crate::symbols::SourceUnit;

/// One `<script>` element: either external (`src`) or embedded text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptRef {
    Url(String),
    Inline(String),
}

/// Everything the host captured about one page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageManifest {
    pub scripts: Vec<ScriptRef>,
    /// Own bindings of the page's global object; absent when not captured.
    pub globals: Option<TypeofSnapshot>,
}

/// Analyse every script in manifest order, then the global scope.
///
/// External scripts are fetched strictly one after another. A failed fetch or a
/// failed parse yields an error-tagged record for that script only.
pub fn scan_page(manifest: &PageManifest, fetcher: &dyn ScriptFetcher, strategy: Strategy) -> PageScan {
    let mut scan = PageScan::default();

    for script in &manifest.scripts {
        let (unit, text) = match script {
            ScriptRef::Inline(text) => (SourceUnit::Inline, text.clone()),
            ScriptRef::Url(url) => {
                let unit = SourceUnit::Url(url.clone());
                match fetcher.fetch(url) {
                    Ok(text) => (unit, text),
                    Err(e) => {
                        tracing::warn!(url = %e.url, error = %e.message, "script fetch failed");
                        scan.push(UnitRecord::failed(unit, "Failed to fetch script"));
                        continue;
                    }
                }
            }
        };
        scan.push(analyze_script(unit, text, strategy));
    }

    if let Some(globals) = &manifest.globals {
        let snapshot = GlobalScopeSnapshotter::new(globals.clone()).snapshot();
        scan.push(UnitRecord::global(snapshot));
    }

    tracing::info!(records = scan.files.len(), errors = scan.errors(), "page scan complete");
    scan
}

fn analyze_script(unit: SourceUnit, text: String, strategy: Strategy) -> UnitRecord {
    match strategy {
        Strategy::Pattern => UnitRecord::pattern(unit, &extract_patterns(&text)),
        Strategy::Structural => match StructuralSource::new(unit.clone(), text).collect() {
            Ok(inventory) => UnitRecord::structural(&inventory),
            Err(e) => {
                tracing::warn!(unit = %e.unit, error = %e.message, "script parse failed");
                UnitRecord::failed(unit, e.message)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MapFetcher {
        scripts: HashMap<String, String>,
        requested: RefCell<Vec<String>>,
    }

    impl ScriptFetcher for MapFetcher {
        fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.requested.borrow_mut().push(url.to_string());
            self.scripts.get(url).cloned().ok_or_else(|| FetchError {
                url: url.to_string(),
                message: "HTTP status 404".to_string(),
            })
        }
    }

    fn manifest(json: &str) -> PageManifest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn failed_fetch_does_not_stop_later_scripts() {
        let fetcher = MapFetcher {
            scripts: HashMap::from([("https://a.test/ok.js".to_string(), "function ok() {}".to_string())]),
            ..Default::default()
        };
        let m = manifest(
            r#"{ "scripts": [
                {"url": "https://a.test/missing.js"},
                {"url": "https://a.test/ok.js"},
                {"inline": "const answer = 42;"}
            ] }"#,
        );

        let scan = scan_page(&m, &fetcher, Strategy::Pattern);
        assert_eq!(
            *fetcher.requested.borrow(),
            vec!["https://a.test/missing.js", "https://a.test/ok.js"]
        );
        assert_eq!(scan.files.len(), 3);
        assert_eq!(scan.files[0].error.as_deref(), Some("Failed to fetch script"));
        assert_eq!(scan.files[1].functions, Some(vec!["ok".to_string()]));
        assert_eq!(scan.files[2].source, SourceUnit::Inline);
        assert_eq!(scan.files[2].constants, Some(vec!["answer".to_string()]));
        assert_eq!(scan.errors(), 1);
    }

    #[test]
    fn units_are_not_deduplicated_against_each_other() {
        let m = manifest(r#"{ "scripts": [ {"inline": "var shared = 1;"}, {"inline": "var shared = 2;"} ] }"#);
        let scan = scan_page(&m, &MapFetcher::default(), Strategy::Pattern);
        assert_eq!(scan.files[0].variables, Some(vec!["shared".to_string()]));
        assert_eq!(scan.files[1].variables, Some(vec!["shared".to_string()]));
    }

    #[test]
    fn structural_strategy_reports_members_and_parse_errors() {
        let m = manifest(
            r#"{ "scripts": [ {"inline": "class A { go() {} speed = 1; }"}, {"inline": "class {"} ] }"#,
        );
        let scan = scan_page(&m, &MapFetcher::default(), Strategy::Structural);
        assert_eq!(scan.files[0].methods, Some(vec!["go".to_string()]));
        assert_eq!(scan.files[0].properties, Some(vec!["speed".to_string()]));
        assert_eq!(scan.files[0].constants, None);
        assert!(scan.files[1].is_error());
        assert_eq!(scan.files[1].classes, None);
    }

    #[test]
    fn global_scope_is_appended_last() {
        let m = manifest(
            r#"{ "scripts": [ {"inline": "let a;"} ], "globals": { "b": "number", "a": "function" } }"#,
        );
        let scan = scan_page(&m, &MapFetcher::default(), Strategy::Pattern);
        let last = scan.files.last().unwrap();
        assert_eq!(last.source, SourceUnit::GlobalScope);
        assert_eq!(last.functions, Some(vec!["a".to_string()]));
        assert_eq!(last.variables, Some(vec!["b".to_string()]));
    }
}
