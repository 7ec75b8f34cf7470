use std::path::Path;
use symscan::batch::scan_directory;
use symscan::config::ScanConfig;
use symscan::{ScanError, SourceUnit, SymbolKind};

fn write(root: &Path, rel: &str, body: &str) {
    let p = root.join(rel);
    std::fs::create_dir_all(p.parent().unwrap()).unwrap();
    std::fs::write(p, body).unwrap();
}

#[test]
fn shared_helper_is_reported_once() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.js", "function helper() {}\n");
    write(dir.path(), "lib/b.js", "function helper() {}\nfunction other() {}\n");

    let corpus = scan_directory(dir.path(), &ScanConfig::default()).unwrap();
    assert_eq!(corpus.functions.to_vec(), vec!["helper", "other"]);
    assert_eq!(corpus.units_merged, 2);
}

#[test]
fn one_malformed_file_is_isolated() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "1.js", "class One { run() {} }\n");
    write(dir.path(), "2.js", "function two( {\n");
    write(dir.path(), "3.js", "const { three, four } = require('./x');\n");

    let corpus = scan_directory(dir.path(), &ScanConfig::default()).unwrap();
    assert_eq!(corpus.units_merged, 2);
    assert_eq!(corpus.failures.len(), 1);
    assert_eq!(corpus.failures[0].source, SourceUnit::file("2.js"));

    assert_eq!(corpus.classes.to_vec(), vec!["One"]);
    assert_eq!(corpus.methods.to_vec(), vec!["run"]);
    assert!(corpus.functions.is_empty());
    assert_eq!(corpus.variables.to_vec(), vec!["three", "four"]);
}

#[test]
fn oversized_file_is_reported_not_dropped() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "big.js", "function bigHelper() { return 'a long enough body'; }\n");
    write(dir.path(), "small.js", "let s;\n");

    let cfg = ScanConfig {
        max_file_bytes: 16,
        ..ScanConfig::default()
    };
    let corpus = scan_directory(dir.path(), &cfg).unwrap();
    assert_eq!(corpus.units_merged, 1);
    assert_eq!(corpus.failures.len(), 1);
    assert_eq!(corpus.failures[0].source, SourceUnit::file("big.js"));
    assert!(corpus.failures[0].error.contains("exceeds max_file_bytes"));
    assert!(corpus.functions.is_empty());
    assert_eq!(corpus.variables.to_vec(), vec!["s"]);
}

#[test]
fn corpus_collections_never_repeat_a_name() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..5 {
        write(
            dir.path(),
            &format!("m{i}/index.js"),
            "class Shared { go() {} n = 1; }\nfunction f() {}\nlet v = 1;\nvar [v2, v] = [];\n",
        );
    }

    let corpus = scan_directory(dir.path(), &ScanConfig::default()).unwrap();
    for kind in SymbolKind::ALL {
        let names = corpus.names(kind).to_vec();
        let mut unique = names.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(names.len(), unique.len(), "duplicates in {kind}");
    }
    assert_eq!(corpus.variables.to_vec(), vec!["v", "v2"]);
}

#[test]
fn rescanning_unchanged_sources_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "x.js", "class X { a() {} b = 2; }\nconst { c, d: [e] } = o;\n");
    write(dir.path(), "y.mjs", "export function y() {}\nexport default class { z() {} }\n");

    let first = scan_directory(dir.path(), &ScanConfig::default()).unwrap();
    let second = scan_directory(dir.path(), &ScanConfig::default()).unwrap();
    for kind in SymbolKind::ALL {
        assert_eq!(first.names(kind), second.names(kind));
    }
    assert_eq!(first.methods.to_vec(), vec!["a", "z"]);
    assert_eq!(first.classes.to_vec(), vec!["X"]);
}

#[test]
fn non_source_files_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "notes.txt", "function notCode() {}");
    write(dir.path(), "data.json", "{\"a\": 1}");

    let corpus = scan_directory(dir.path(), &ScanConfig::default()).unwrap();
    assert_eq!(corpus.units_merged, 0);
    assert_eq!(corpus.total_symbols(), 0);
}

#[test]
fn missing_root_fails_before_scanning() {
    let dir = tempfile::tempdir().unwrap();
    let err = scan_directory(&dir.path().join("absent"), &ScanConfig::default()).unwrap_err();
    assert!(matches!(err, ScanError::RootMissing(_)));
}
