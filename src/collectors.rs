//! Per-kind name extraction from recognized declaration nodes.
//!
//! Every collector either produces name(s) or skips. A skip (anonymous class, computed
//! member key) is not an error; the node simply has no statically known name.

use tree_sitter::Node;

use crate::symbols::{Inventory, SymbolKind};

/// Declaration shapes the walker recognizes, one per collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationShape {
    Class,
    Method,
    Property,
    Function,
    Variable,
    /// `for (const x of xs)` style heads bind names without a `variable_declarator`.
    LoopBinding,
}

impl DeclarationShape {
    /// Map a tree-sitter node onto the shape it declares, if any.
    pub fn classify(node: Node) -> Option<Self> {
        match node.kind() {
            "class_declaration" => Some(Self::Class),
            // `export default class { ... }` is the one place an unnamed class sits in
            // declaration position; the grammar parses it as a class expression.
            "class" if node.parent().is_some_and(|p| p.kind() == "export_statement") => Some(Self::Class),
            // Object-literal methods share the node kind but are not class members.
            "method_definition" if in_class_body(node) => Some(Self::Method),
            "field_definition" if in_class_body(node) => Some(Self::Property),
            "function_declaration" | "generator_function_declaration" => Some(Self::Function),
            "variable_declarator" => Some(Self::Variable),
            "for_in_statement" if node.child_by_field_name("kind").is_some() => Some(Self::LoopBinding),
            _ => None,
        }
    }

    pub fn kind(self) -> SymbolKind {
        match self {
            Self::Class => SymbolKind::Class,
            Self::Method => SymbolKind::Method,
            Self::Property => SymbolKind::Property,
            Self::Function => SymbolKind::Function,
            Self::Variable | Self::LoopBinding => SymbolKind::Variable,
        }
    }
}

fn in_class_body(node: Node) -> bool {
    node.parent().is_some_and(|p| p.kind() == "class_body")
}

/// Run the collector for `shape` on `node` and record what it finds.
pub fn collect(shape: DeclarationShape, node: Node, source: &[u8], inventory: &mut Inventory) {
    let kind = shape.kind();
    let names: Vec<String> = match shape {
        DeclarationShape::Class | DeclarationShape::Function => declared_name(node, source).into_iter().collect(),
        DeclarationShape::Method => member_key(node, "name", source).into_iter().collect(),
        DeclarationShape::Property => member_key(node, "property", source).into_iter().collect(),
        DeclarationShape::Variable => bound_names_of(node, "name", source),
        DeclarationShape::LoopBinding => bound_names_of(node, "left", source),
    };

    if names.is_empty() {
        tracing::trace!(kind = %kind, node = node.kind(), "declaration without a static name skipped");
        return;
    }
    for name in names {
        inventory.record(kind, name);
    }
}

fn node_text<'a>(source: &'a [u8], node: Node) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

fn declared_name(node: Node, source: &[u8]) -> Option<String> {
    let name = node.child_by_field_name("name")?;
    let text = node_text(source, name).trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Name of a class member key: identifier text, or the literal's value for quoted and
/// numeric keys. Computed keys (`[expr]`) have no static name.
fn member_key(node: Node, field: &str, source: &[u8]) -> Option<String> {
    let key = node.child_by_field_name(field)?;
    let text = node_text(source, key);
    let name = match key.kind() {
        "property_identifier" | "identifier" => text.to_string(),
        "number" => number_key_value(text),
        "private_property_identifier" => text.trim_start_matches('#').to_string(),
        "string" => unescape_string(&strip_string_quotes(text)),
        _ => return None,
    };
    (!name.is_empty()).then_some(name)
}

fn strip_string_quotes(s: &str) -> String {
    let t = s.trim();
    if t.len() >= 2 {
        let bytes = t.as_bytes();
        let first = bytes[0];
        let last = bytes[t.len() - 1];
        if (first == b'\'' && last == b'\'') || (first == b'"' && last == b'"') {
            return t[1..t.len() - 1].to_string();
        }
    }
    t.to_string()
}

/// The property key a numeric literal denotes: `0x10` is `16`, `1e3` is `1000`.
/// Falls back to the source text for literals outside what we can evaluate exactly.
fn number_key_value(text: &str) -> String {
    let cleaned: String = text.chars().filter(|c| *c != '_').collect();
    let digits = cleaned.strip_suffix('n').unwrap_or(&cleaned);

    let radix = match digits.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => Some(16),
        Some("0o") => Some(8),
        Some("0b") => Some(2),
        _ => None,
    };
    let value = match radix {
        Some(r) => u128::from_str_radix(&digits[2..], r).ok().map(|v| v.to_string()),
        None => digits.parse::<f64>().ok().filter(|v| v.is_finite()).map(|v| v.to_string()),
    };
    value.unwrap_or_else(|| text.to_string())
}

/// Resolve escape sequences in a string literal body.
///
/// Unknown escapes yield the escaped character itself; line continuations vanish.
fn unescape_string(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(esc) = chars.next() else {
            out.push('\\');
            break;
        };
        match esc {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            'x' => {
                let hex: String = chars.by_ref().take(2).collect();
                push_code_point(&mut out, &hex, "\\x");
            }
            'u' if chars.peek() == Some(&'{') => {
                chars.next();
                let hex: String = chars.by_ref().take_while(|c| *c != '}').collect();
                push_code_point(&mut out, &hex, "\\u");
            }
            'u' => {
                let hex: String = chars.by_ref().take(4).collect();
                push_code_point(&mut out, &hex, "\\u");
            }
            other => out.push(other),
        }
    }
    out
}

fn push_code_point(out: &mut String, hex: &str, raw_prefix: &str) {
    match u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
        Some(ch) => out.push(ch),
        // Lone surrogates and malformed escapes stay as written.
        None => {
            out.push_str(raw_prefix);
            out.push_str(hex);
        }
    }
}

fn bound_names_of(node: Node, field: &str, source: &[u8]) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(target) = node.child_by_field_name(field) {
        bound_names(target, source, &mut out);
    }
    out
}

/// Every identifier bound by a binding target, in source order.
///
/// Handles plain identifiers and arbitrarily nested object/array destructuring,
/// including defaults (`{ a = 1 }`, `[b = 2]`), renames (`{ key: c }`) and rest
/// elements (`...d`).
pub fn bound_names(pattern: Node, source: &[u8], out: &mut Vec<String>) {
    match pattern.kind() {
        "identifier" | "shorthand_property_identifier_pattern" => {
            let text = node_text(source, pattern);
            if !text.is_empty() {
                out.push(text.to_string());
            }
        }
        "object_pattern" | "array_pattern" => {
            let mut cursor = pattern.walk();
            for child in pattern.named_children(&mut cursor) {
                bound_names(child, source, out);
            }
        }
        "pair_pattern" => {
            if let Some(value) = pattern.child_by_field_name("value") {
                bound_names(value, source, out);
            }
        }
        "assignment_pattern" | "object_assignment_pattern" => {
            if let Some(left) = pattern.child_by_field_name("left") {
                bound_names(left, source, out);
            }
        }
        "rest_pattern" => {
            if let Some(inner) = pattern.named_child(0) {
                bound_names(inner, source, out);
            }
        }
        // Member expressions, comments, etc. bind nothing.
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_source;
    use crate::symbols::SourceUnit;

    fn first_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
        if node.kind() == kind {
            return Some(node);
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
        children.into_iter().find_map(|c| first_of_kind(c, kind))
    }

    fn declarator_names(src: &str) -> Vec<String> {
        let tree = parse_source(&SourceUnit::Inline, src).unwrap();
        let decl = first_of_kind(tree.root_node(), "variable_declarator").unwrap();
        bound_names_of(decl, "name", src.as_bytes())
    }

    #[test]
    fn plain_declarator_binds_one_name() {
        assert_eq!(declarator_names("let x = 1;"), vec!["x"]);
    }

    #[test]
    fn object_pattern_binds_every_name() {
        assert_eq!(declarator_names("const { a, b } = obj;"), vec!["a", "b"]);
    }

    #[test]
    fn nested_patterns_with_defaults_renames_and_rest() {
        let names = declarator_names("const { a = 1, b: { c }, d: [e, , f = 2], ...g } = obj;");
        assert_eq!(names, vec!["a", "c", "e", "f", "g"]);
    }

    #[test]
    fn array_rest_is_bound() {
        assert_eq!(declarator_names("var [head, ...tail] = list;"), vec!["head", "tail"]);
    }

    #[test]
    fn string_keys_are_unquoted() {
        assert_eq!(strip_string_quotes("'weird name'"), "weird name");
        assert_eq!(strip_string_quotes("\"x\""), "x");
        assert_eq!(strip_string_quotes("plain"), "plain");
    }

    #[test]
    fn string_escapes_are_resolved() {
        assert_eq!(unescape_string(r"a\'b"), "a'b");
        assert_eq!(unescape_string(r"tab\there"), "tab\there");
        assert_eq!(unescape_string(r"\x41\u0042\u{1F600}"), "AB\u{1F600}");
        assert_eq!(unescape_string(r"back\\slash"), "back\\slash");
        assert_eq!(unescape_string(r"\q"), "q");
    }

    #[test]
    fn numeric_keys_use_their_value() {
        assert_eq!(number_key_value("0x10"), "16");
        assert_eq!(number_key_value("0o17"), "15");
        assert_eq!(number_key_value("0B101"), "5");
        assert_eq!(number_key_value("1e3"), "1000");
        assert_eq!(number_key_value("1_000"), "1000");
        assert_eq!(number_key_value("1.50"), "1.5");
        assert_eq!(number_key_value("42"), "42");
        assert_eq!(number_key_value("7n"), "7");
    }

    #[test]
    fn classify_ignores_expressions() {
        let src = "const f = function named() {}; const g = () => 1;";
        let tree = parse_source(&SourceUnit::Inline, src).unwrap();
        let fe = first_of_kind(tree.root_node(), "function_expression").unwrap();
        assert_eq!(DeclarationShape::classify(fe), None);
        let arrow = first_of_kind(tree.root_node(), "arrow_function").unwrap();
        assert_eq!(DeclarationShape::classify(arrow), None);
    }
}
