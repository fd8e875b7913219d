//! Tree assertion helpers for integration tests.

use stencil::{Document, NodeId, Output, Tree};

/// Follow a path of child names from `from`.
pub fn child_path(tree: &Tree, from: NodeId, path: &[&str]) -> NodeId {
    path.iter().fold(from, |id, name| {
        tree.get_child(id, name)
            .unwrap_or_else(|| panic!("Expected child '{}' under '{}'", name, tree[id].name))
    })
}

/// Look up a top-level statement or API block.
pub fn top_level(doc: &Document, name: &str) -> NodeId {
    doc.get(name)
        .unwrap_or_else(|| panic!("Expected top-level statement '{}'", name))
}

/// Assert the node projects to its literal value.
pub fn assert_literal(tree: &Tree, id: NodeId, expected: &str) {
    assert_eq!(
        tree[id].output,
        Output::Literal(expected.to_string()),
        "Expected '{}' to hold literal {:?}",
        tree[id].name,
        expected
    );
}

/// Assert the node is a list with `len` items, each of `item_type`.
pub fn assert_items(tree: &Tree, id: NodeId, len: usize, item_type: &str) {
    let node = &tree[id];
    assert_eq!(node.output, Output::Items, "Expected '{}' to be a list", node.name);
    assert_eq!(node.items.len(), len, "Wrong item count for '{}'", node.name);
    for &item in &node.items {
        assert_eq!(tree[item].kind_type, item_type);
        assert_eq!(tree[item].parent, Some(id));
    }
}

/// Assert no node is reachable twice from `root`.
pub fn assert_tree_shape(tree: &Tree, root: NodeId) {
    let mut seen = std::collections::HashSet::new();
    for id in tree.descendants(root) {
        if !seen.insert(id) {
            panic!("Node {:?} ('{}') is shared", id, tree[id].name);
        }
    }
}
