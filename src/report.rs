use anyhow::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fmt::Write as _;
use std::io::Cursor;

use crate::aggregate::{CorpusInventory, PageScan, UnitRecord};
use crate::symbols::SymbolKind;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
    Xml,
}

fn heading(kind: SymbolKind) -> &'static str {
    match kind {
        SymbolKind::Class => "Classes",
        SymbolKind::Method => "Class methods",
        SymbolKind::Property => "Class properties",
        SymbolKind::Function => "Functions",
        SymbolKind::Variable => "Variables and constants",
    }
}

/// Plain-text corpus report: one section per kind, then a failure summary.
pub fn render_corpus_text(corpus: &CorpusInventory) -> String {
    let mut out = String::new();
    for kind in SymbolKind::ALL {
        let names = corpus.names(kind);
        let _ = writeln!(out, "{} ({}):", heading(kind), names.len());
        for name in names.iter() {
            let _ = writeln!(out, "  {name}");
        }
        out.push('\n');
    }

    let _ = writeln!(out, "Scanned {} file(s).", corpus.units_merged + corpus.failures.len());
    if !corpus.failures.is_empty() {
        let _ = writeln!(out, "Skipped {} file(s):", corpus.failures.len());
        for f in &corpus.failures {
            let _ = writeln!(out, "  {}: {}", f.source, f.error);
        }
    }
    out
}

pub fn render_corpus_json(corpus: &CorpusInventory) -> Result<String> {
    Ok(serde_json::to_string_pretty(corpus)?)
}

pub fn render_corpus_xml(corpus: &CorpusInventory) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new("inventory")))?;

    for kind in SymbolKind::ALL {
        let tag = kind.plural();
        writer.write_event(Event::Start(BytesStart::new(tag)))?;
        for name in corpus.names(kind).iter() {
            writer.write_event(Event::Start(BytesStart::new("symbol")))?;
            writer.write_event(Event::Text(BytesText::new(name)))?;
            writer.write_event(Event::End(BytesEnd::new("symbol")))?;
        }
        writer.write_event(Event::End(BytesEnd::new(tag)))?;
    }

    if !corpus.failures.is_empty() {
        writer.write_event(Event::Start(BytesStart::new("failures")))?;
        for f in &corpus.failures {
            let source = f.source.to_string();
            let mut el = BytesStart::new("failure");
            el.push_attribute(("source", source.as_str()));
            writer.write_event(Event::Start(el))?;
            writer.write_event(Event::Text(BytesText::new(&f.error)))?;
            writer.write_event(Event::End(BytesEnd::new("failure")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("failures")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("inventory")))?;

    let bytes = writer.into_inner().into_inner();
    Ok(String::from_utf8(bytes)?)
}

pub fn render_corpus(corpus: &CorpusInventory, format: Format) -> Result<String> {
    match format {
        Format::Text => Ok(render_corpus_text(corpus)),
        Format::Json => render_corpus_json(corpus),
        Format::Xml => render_corpus_xml(corpus),
    }
}

fn push_section(out: &mut String, title: &str, items: Option<&Vec<String>>) {
    let Some(items) = items.filter(|v| !v.is_empty()) else { return };
    let _ = writeln!(out, "  {title}:");
    for item in items {
        let _ = writeln!(out, "    {item}");
    }
}

fn render_record_text(out: &mut String, record: &UnitRecord) {
    let label = record.source.label().unwrap_or_else(|| "Inline Script".to_string());
    let _ = writeln!(out, "{label}");
    if let Some(err) = &record.error {
        let _ = writeln!(out, "  error: {err}");
        return;
    }
    push_section(out, "Classes", record.classes.as_ref());
    push_section(out, "Methods", record.methods.as_ref());
    push_section(out, "Properties", record.properties.as_ref());
    push_section(out, "Functions", record.functions.as_ref());
    push_section(out, "Variables", record.variables.as_ref());
    push_section(out, "Constants", record.constants.as_ref());
}

/// Text form of a page scan, one block per unit.
pub fn render_page_text(scan: &PageScan) -> String {
    if scan.files.is_empty() {
        return "No JavaScript found.\n".to_string();
    }
    let mut out = String::new();
    for record in &scan.files {
        render_record_text(&mut out, record);
    }
    out
}

pub fn render_page(scan: &PageScan, format: Format) -> Result<String> {
    match format {
        Format::Text => Ok(render_page_text(scan)),
        Format::Json => Ok(serde_json::to_string_pretty(scan)?),
        Format::Xml => anyhow::bail!("XML output is only available for directory scans"),
    }
}
