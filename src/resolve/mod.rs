//! Instantiation engine: expanding type references into concrete subtrees.
//!
//! Given a node and a [`Registry`], [`resolve`] binds the node's generic
//! arguments to the template's parameters and copies every template member
//! into the node, recursively, until only basic types remain.
//!
//! ## Cases
//!
//! ```text
//! [N]base, base unknown   → N bare `base` items
//! base is an enum         → output = enum member value for the raw value
//! [N]base, base an enum   → N enum items sharing the raw value
//! base is a dict/list     → members copied with substituted types, resolved
//! [N]base, base dict/list → one expanded prototype, copied N times into items
//! ```
//!
//! Expansion is bounded by [`ResolveOptions::max_depth`] and
//! [`ResolveOptions::max_nodes`]; a self-referential type fails with
//! [`ResolveError::UnboundedRecursion`] instead of overflowing the stack.

mod engine;
mod error;
mod options;

use rayon::prelude::*;

pub use error::ResolveError;
pub use options::{MAX_INSTANTIATION_DEPTH, MAX_INSTANTIATION_NODES, ResolveOptions, UnknownEnumPolicy};

use crate::base::{array_len, join_generics, split_generics};
use crate::registry::Registry;
use crate::tree::{Node, NodeId, Tree};
use engine::Instantiator;

/// Resolve `node` in place against `registry`.
///
/// All or nothing: on error every node created by this call is dropped and
/// `node` is restored to its previous state.
pub fn resolve(
    tree: &mut Tree,
    node: NodeId,
    registry: &Registry,
    options: &ResolveOptions,
) -> Result<(), ResolveError> {
    let checkpoint = tree.checkpoint(node);
    let result = Instantiator::new(tree, node, registry, options).run();
    if let Err(err) = &result {
        tracing::debug!("resolution of '{}' failed: {}", tree[node].name, err.format());
        tree.rollback(checkpoint);
    }
    result
}

/// Build and resolve a standalone instance of `type_text`, e.g. an example
/// payload for `Page<User>`. The root is named after the base type.
pub fn instantiate(
    registry: &Registry,
    type_text: &str,
    options: &ResolveOptions,
) -> Result<(Tree, NodeId), ResolveError> {
    let (base, _) = split_generics(type_text);
    let (name, _) = array_len(&base);

    let mut tree = Tree::new();
    let root = tree.alloc(Node::new(type_text, &name, "", ""));
    resolve(&mut tree, root, registry, options)?;
    Ok((tree, root))
}

/// [`instantiate`] every type in `type_texts` concurrently.
///
/// The registry is only read, so passes share nothing mutable; each result
/// owns its own tree. Results keep the input order.
pub fn instantiate_all<S>(
    registry: &Registry,
    type_texts: &[S],
    options: &ResolveOptions,
) -> Vec<(String, Result<(Tree, NodeId), ResolveError>)>
where
    S: AsRef<str> + Sync,
{
    type_texts
        .par_iter()
        .map(|type_text| {
            let type_text = type_text.as_ref();
            (type_text.to_string(), instantiate(registry, type_text, options))
        })
        .collect()
}

impl Tree {
    /// Build a detached copy of `id` retyped as `type_text`, then resolve it.
    pub fn copy_as(
        &mut self,
        id: NodeId,
        type_text: &str,
        registry: &Registry,
        options: &ResolveOptions,
    ) -> Result<NodeId, ResolveError> {
        let source = &self[id];
        let mut node = Node::new(type_text, &source.name, &source.hint, &source.raw_value);
        node.span = source.span;
        let copy = self.alloc(node);
        match resolve(self, copy, registry, options) {
            Ok(()) => Ok(copy),
            Err(err) => {
                self.truncate(copy.index());
                Err(err)
            }
        }
    }

    /// Swap type and name: instantiate the type named by this node's name and
    /// generic arguments (`Page<User>` as a name becomes the type).
    pub fn exchange(
        &mut self,
        id: NodeId,
        registry: &Registry,
        options: &ResolveOptions,
    ) -> Result<NodeId, ResolveError> {
        let node = &self[id];
        let type_text = join_generics(&node.name, &node.args);
        self.copy_as(id, &type_text, registry, options)
    }
}
