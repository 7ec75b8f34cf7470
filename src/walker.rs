use tree_sitter::Tree;

use crate::collectors::{collect, DeclarationShape};
use crate::error::ParseError;
use crate::parse::parse_source;
use crate::symbols::{Inventory, SourceUnit};

/// Pre-order walk over every node of `tree`, feeding declaration nodes to collectors.
///
/// Recursion into children is generic: declarations nested inside any construct
/// (blocks, callbacks, object literals, class bodies) are reached.
pub fn walk_tree(tree: &Tree, source: &[u8], inventory: &mut Inventory) {
    let mut cursor = tree.walk();
    loop {
        let node = cursor.node();
        if let Some(shape) = DeclarationShape::classify(node) {
            collect(shape, node, source, inventory);
        }

        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

/// Parse and walk one unit, producing its inventory.
pub fn collect_structural(unit: SourceUnit, source_text: &str) -> Result<Inventory, ParseError> {
    let tree = parse_source(&unit, source_text)?;
    let mut inventory = Inventory::new(unit);
    walk_tree(&tree, source_text.as_bytes(), &mut inventory);
    Ok(inventory)
}
