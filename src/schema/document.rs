//! A parsed schema document.

use rustc_hash::FxHashSet;

use crate::base::{LineCol, line_col};
use crate::registry::Registry;
use crate::resolve::{ResolveError, ResolveOptions, resolve};
use crate::tree::{NodeId, Tree};

/// One parsed schema text: the statement tree, the types it can see, and its
/// API blocks.
///
/// A document starts unresolved. [`Document::resolve`] consumes it and
/// returns the fully instantiated document, or an error and nothing else.
#[derive(Debug, Clone)]
pub struct Document {
    source: String,
    tree: Tree,
    root: NodeId,
    types: Registry,
    definitions: Vec<String>,
    apis: Vec<NodeId>,
    resolved: bool,
}

impl Document {
    pub(super) fn new(
        source: String,
        tree: Tree,
        root: NodeId,
        types: Registry,
        definitions: Vec<String>,
        apis: Vec<NodeId>,
    ) -> Self {
        Self {
            source,
            tree,
            root,
            types,
            definitions,
            apis,
            resolved: false,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// The top-level dict holding every non-definition statement.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Base types plus the types this document defines.
    pub fn types(&self) -> &Registry {
        &self.types
    }

    /// Names of the types this document defines, in registration order.
    pub fn definitions(&self) -> &[String] {
        &self.definitions
    }

    /// Top-level `GET` / `POST` blocks in source order.
    pub fn apis(&self) -> &[NodeId] {
        &self.apis
    }

    /// The top-level API block named `name`.
    pub fn api(&self, name: &str) -> Option<NodeId> {
        self.apis
            .iter()
            .copied()
            .find(|&id| self.tree[id].name == name)
    }

    /// A top-level statement by name.
    pub fn get(&self, name: &str) -> Option<NodeId> {
        self.tree.get_child(self.root, name)
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Where `id` starts in the source, if it came from the text.
    pub fn position(&self, id: NodeId) -> Option<LineCol> {
        let span = self.tree.get(id)?.span?;
        Some(line_col(&self.source, span.start()))
    }

    /// Where the statement behind `err` starts in the source.
    pub fn locate(&self, err: &ResolveError) -> Option<LineCol> {
        err.span().map(|span| line_col(&self.source, span.start()))
    }

    /// Instantiate every statement against [`Self::types`].
    ///
    /// Statements resolve parent first. On error the document is dropped;
    /// there is no partially resolved result.
    pub fn resolve(mut self, options: &ResolveOptions) -> Result<Document, ResolveError> {
        if self.resolved {
            return Ok(self);
        }

        // API blocks shadowed by a later same-named statement still resolve
        let mut seen = FxHashSet::default();
        let mut statements = Vec::new();
        for start in std::iter::once(self.root).chain(self.apis.iter().copied()) {
            for id in self.tree.descendants(start) {
                if seen.insert(id) {
                    statements.push(id);
                }
            }
        }

        for id in statements {
            if let Err(err) = resolve(&mut self.tree, id, &self.types, options) {
                match self.locate(&err) {
                    Some(at) => tracing::debug!("document rejected at {}: {}", at, err.format()),
                    None => tracing::debug!("document rejected: {}", err.format()),
                }
                return Err(err);
            }
        }

        tracing::debug!(
            "resolved document: {} node(s) after instantiation",
            self.tree.len()
        );
        self.resolved = true;
        Ok(self)
    }
}
