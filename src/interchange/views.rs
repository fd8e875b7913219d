//! Serializable views over a tree.
//!
//! Views borrow the tree and serialize lazily, so the same resolved tree can
//! be written with any serde format.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::tree::{NodeId, Output, Tree};

/// Annotated form: every node is an object with its declared type, its hint,
/// and its value.
///
/// ```json
/// { "type": "dict", "value": { "age": { "type": "num", "hint": "years", "value": "18" } } }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct NodeView<'t> {
    tree: &'t Tree,
    id: NodeId,
}

impl<'t> NodeView<'t> {
    pub fn new(tree: &'t Tree, id: NodeId) -> Self {
        Self { tree, id }
    }

    fn at(&self, id: NodeId) -> Self {
        Self::new(self.tree, id)
    }
}

impl Serialize for NodeView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let node = &self.tree[self.id];
        let mut map = serializer.serialize_map(None)?;
        if !node.kind_type.is_empty() {
            map.serialize_entry("type", &node.type_text())?;
        }
        if !node.hint.is_empty() {
            map.serialize_entry("hint", &node.hint)?;
        }
        match &node.output {
            Output::Unset => {}
            Output::Literal(value) => map.serialize_entry("value", value)?,
            Output::Items => {
                let items = node.items.iter().map(|&id| self.at(id)).collect::<Vec<_>>();
                map.serialize_entry("value", &items)?;
            }
            Output::Children => {
                let children = Children {
                    view: *self,
                    as_payload: false,
                };
                map.serialize_entry("value", &children)?;
            }
        }
        map.end()
    }
}

/// Bare payload form: dicts become maps, lists sequences, and literals
/// values typed by the node's declared scalar type.
///
/// ```json
/// { "age": 18, "name": "bob", "tags": ["a", "b"] }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PayloadView<'t> {
    tree: &'t Tree,
    id: NodeId,
}

impl<'t> PayloadView<'t> {
    pub fn new(tree: &'t Tree, id: NodeId) -> Self {
        Self { tree, id }
    }
}

impl Serialize for PayloadView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let node = &self.tree[self.id];
        match &node.output {
            Output::Unset => serializer.serialize_none(),
            Output::Literal(value) => Scalar::of(&node.kind_type, value).serialize(serializer),
            Output::Items => {
                let mut seq = serializer.serialize_seq(Some(node.items.len()))?;
                for &item in &node.items {
                    seq.serialize_element(&PayloadView::new(self.tree, item))?;
                }
                seq.end()
            }
            Output::Children => Children {
                view: NodeView::new(self.tree, self.id),
                as_payload: true,
            }
            .serialize(serializer),
        }
    }
}

/// Keyed children of a dict node, in insertion order.
struct Children<'t> {
    view: NodeView<'t>,
    as_payload: bool,
}

impl Serialize for Children<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let tree = self.view.tree;
        let node = &tree[self.view.id];
        let mut map = serializer.serialize_map(Some(node.children.len()))?;
        for (name, &child) in &node.children {
            if self.as_payload {
                map.serialize_entry(name, &PayloadView::new(tree, child))?;
            } else {
                map.serialize_entry(name, &NodeView::new(tree, child))?;
            }
        }
        map.end()
    }
}

/// A literal interpreted through its declared type.
#[derive(Debug, Clone, PartialEq)]
enum Scalar<'v> {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(&'v str),
}

impl<'v> Scalar<'v> {
    fn of(kind_type: &str, raw: &'v str) -> Self {
        let text = raw.trim();
        let text = text.strip_suffix(",constant").unwrap_or(text).trim_end();
        if text == "none" {
            return Self::Null;
        }
        let typed = match kind_type {
            "num" | "int" | "float" => text
                .parse::<i64>()
                .map(Self::Int)
                .ok()
                .or_else(|| text.parse::<f64>().ok().map(Self::Float)),
            "bool" => text.parse::<bool>().ok().map(Self::Bool),
            _ => None,
        };
        typed.unwrap_or_else(|| Self::Text(unquote(text)))
    }
}

impl Serialize for Scalar<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Self::Null => serializer.serialize_none(),
            Self::Bool(b) => serializer.serialize_bool(b),
            Self::Int(i) => serializer.serialize_i64(i),
            Self::Float(f) => serializer.serialize_f64(f),
            Self::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// Strip one pair of matching surrounding quotes.
fn unquote(text: &str) -> &str {
    for quote in ['"', '\'', '`'] {
        if let Some(inner) = text
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    text
}
