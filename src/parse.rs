use tree_sitter::{Language, Node, Parser, Tree};

use crate::error::ParseError;
use crate::symbols::SourceUnit;

pub fn javascript() -> Language {
    tree_sitter_javascript::LANGUAGE.into()
}

/// Parse `source_text` as a JavaScript module.
///
/// Tree-sitter never rejects input outright; it recovers and marks the damage with
/// `ERROR` / `MISSING` nodes. Any such node turns the whole unit into a `ParseError`
/// so that half-parsed files never contribute partial inventories.
pub fn parse_source(unit: &SourceUnit, source_text: &str) -> Result<Tree, ParseError> {
    let fail = |message: String| ParseError {
        unit: unit.clone(),
        message,
    };

    let mut parser = Parser::new();
    parser
        .set_language(&javascript())
        .map_err(|e| fail(format!("failed to load grammar: {e}")))?;

    let tree = parser
        .parse(source_text, None)
        .ok_or_else(|| fail("parser returned no tree".to_string()))?;

    let root = tree.root_node();
    if root.has_error() {
        let message = match first_error(root) {
            Some(node) => describe_error(node),
            None => "syntax error".to_string(),
        };
        return Err(fail(message));
    }

    Ok(tree)
}

fn first_error(root: Node) -> Option<Node> {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        // Only descend into subtrees that actually contain the damage.
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}

fn describe_error(node: Node) -> String {
    let pos = node.start_position();
    let (line, column) = (pos.row + 1, pos.column + 1);
    if node.is_missing() {
        format!("missing `{}` at line {line}, column {column}", node.kind())
    } else {
        format!("syntax error at line {line}, column {column}")
    }
}
