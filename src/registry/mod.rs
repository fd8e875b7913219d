//! Type registry: named templates used during instantiation.
//!
//! A registry maps type names to template nodes. A name may be known without
//! a definition (built-in scalars, HTTP method names); such names resolve as
//! plain scalars and only serve to make the statement matcher recognise them.
//!
//! Templates are grafted into the registry's own [`Tree`], so a registry is
//! self-contained and can be shared read-only across threads once built.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use crate::base::array_len;
use crate::parser::{MatcherError, StatementMatcher};
use crate::resolve::{ResolveError, ResolveOptions, resolve};
use crate::tree::{Node, NodeId, Tree};

/// Built-in scalar and structural type names.
pub const BUILTIN_TYPES: &[&str] = &[
    "str", "num", "int", "float", "bool", "any", "dict", "list", "type", "enum",
];

/// HTTP method names that open API blocks.
pub static METHOD_TYPES: LazyLock<Registry> =
    LazyLock::new(|| Registry::with_names(["GET", "POST"]));

/// Name → template mapping.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    templates: Tree,
    names: FxHashMap<String, Option<NodeId>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry knowing `names` without definitions.
    pub fn with_names<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        let mut registry = Self::new();
        registry.declare(names);
        registry
    }

    /// Built-in scalar and structural names.
    pub fn builtin() -> Self {
        Self::with_names(BUILTIN_TYPES.iter().copied())
    }

    /// Built-ins plus the API method names; the usual base for parsing.
    pub fn bootstrap() -> Self {
        Self::builtin().union(&[&*METHOD_TYPES])
    }

    /// Register names as known but undefined.
    ///
    /// A declared name never erases an existing definition.
    pub fn declare<S: Into<String>>(&mut self, names: impl IntoIterator<Item = S>) {
        for name in names {
            self.names.entry(name.into()).or_insert(None);
        }
    }

    /// Register a template copied from `source`, replacing any previous
    /// definition with the same name.
    ///
    /// A template whose value is array notation (`type Ids = [3]num`) is
    /// pre-expanded: it receives one resolved element per array slot and its
    /// value becomes `List<element>`.
    pub fn define(&mut self, source: &Tree, id: NodeId) -> Result<NodeId, ResolveError> {
        self.define_with(source, id, &ResolveOptions::default())
    }

    /// [`Self::define`] with explicit limits for array pre-expansion.
    ///
    /// The whole expansion (slots times element size) is charged against
    /// `options.max_nodes` before anything is copied; on error the registry
    /// is unchanged.
    pub fn define_with(
        &mut self,
        source: &Tree,
        id: NodeId,
        options: &ResolveOptions,
    ) -> Result<NodeId, ResolveError> {
        let (element, len) = array_len(&source[id].raw_value);
        let slots = match len {
            Some(len) => {
                let mut scratch = Tree::new();
                let element_id = scratch.alloc(Node::new(&element, "", "", ""));
                resolve(&mut scratch, element_id, self, options)?;
                let size = scratch.descendants(element_id).len();
                if len.saturating_mul(size) > options.max_nodes {
                    tracing::debug!(
                        "array alias '{}' needs {} x {} node(s), over the budget of {}",
                        source[id].name,
                        len,
                        size,
                        options.max_nodes
                    );
                    return Err(ResolveError::ExpansionLimit {
                        limit: options.max_nodes,
                    });
                }
                Some((scratch, element_id, len))
            }
            None => None,
        };

        let template = self.templates.graft(source, id);
        if let Some((scratch, element_id, len)) = slots {
            for _ in 0..len {
                let copy = self.templates.graft(&scratch, element_id);
                self.templates.push_item(template, copy);
            }
            self.templates.project(template);
            self.templates[template].raw_value = format!("List<{}>", element.trim());
        }

        let name = self.templates[template].name.clone();
        tracing::debug!(
            "registered type '{}' ({} members)",
            name,
            self.templates[template].children.len() + self.templates[template].items.len()
        );
        self.names.insert(name, Some(template));
        Ok(template)
    }

    pub fn has(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// The template registered under `name`, if it has a definition.
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.lookup(name).map(|id| &self.templates[id])
    }

    /// Id of the template registered under `name` inside [`Self::templates`].
    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied().flatten()
    }

    /// The arena holding every template and its members.
    pub fn templates(&self) -> &Tree {
        &self.templates
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    /// Names that carry a definition.
    pub fn defined_names(&self) -> impl Iterator<Item = &str> {
        self.names
            .iter()
            .filter(|(_, def)| def.is_some())
            .map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Merge this registry with `others` into a new registry.
    ///
    /// Entries are applied in order (`self` first); a later definition
    /// replaces an earlier one with the same name, while a later declared-only
    /// name leaves an earlier definition in place.
    pub fn union(&self, others: &[&Registry]) -> Registry {
        let mut merged = Registry::new();
        for registry in std::iter::once(self).chain(others.iter().copied()) {
            for (name, def) in &registry.names {
                match def {
                    Some(id) => {
                        let template = merged.templates.graft(&registry.templates, *id);
                        merged.names.insert(name.clone(), Some(template));
                    }
                    None => merged.declare([name.clone()]),
                }
            }
        }
        merged
    }

    /// The statement pattern recognising this registry's names as types.
    pub fn to_matcher_pattern(&self) -> String {
        StatementMatcher::pattern(self.names())
    }

    /// Compile a matcher over the current name set.
    ///
    /// The matcher does not follow later changes to the registry.
    pub fn matcher(&self) -> Result<StatementMatcher, MatcherError> {
        StatementMatcher::new(self.names())
    }
}
