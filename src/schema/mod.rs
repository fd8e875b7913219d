//! Document builder: schema text → node tree + user type registry.
//!
//! ```text
//! text ──prescan──▶ vocabulary (base names + `type`/`enum` headers + generic names)
//!        │
//!        ▼
//!   StatementMatcher (immutable, built once per document)
//!        │  one stub per line
//!        ▼
//!   fold: `{` / `[` open a container, `}` / `]` close it,
//!         quoted values spanning lines absorb raw lines
//!        │
//!        ├──▶ output tree (rooted at a `dict` node)
//!        └──▶ definitions ──define──▶ Registry (base ∪ user types)
//! ```
//!
//! ## Example
//!
//! ```text
//! type Pair<A,B> = {
//!     A left
//!     B right
//! }
//!
//! GET /pairs = {
//!     [2]Pair<str,int> data
//! }
//! ```

mod builder;
mod document;
mod error;

pub use document::Document;
pub use error::SchemaError;

use crate::base::{array_len, split_generics};
use crate::parser::{MatcherError, StatementMatcher};
use crate::registry::Registry;
use crate::resolve::ResolveOptions;
use builder::Builder;

/// Parses schema text against a base registry.
#[derive(Debug, Clone)]
pub struct SchemaParser {
    registry: Registry,
    /// Budget for pre-expanding array aliases while registering definitions
    options: ResolveOptions,
}

impl Default for SchemaParser {
    fn default() -> Self {
        Self::new(Registry::bootstrap())
    }
}

impl SchemaParser {
    /// A parser whose documents resolve against `registry` plus their own
    /// definitions.
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            options: ResolveOptions::default(),
        }
    }

    /// Limits applied when array aliases are expanded during [`Self::parse`].
    pub fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    /// Add a shared type library; its definitions replace same-named base
    /// entries.
    pub fn with_registry(mut self, types: &Registry) -> Self {
        self.registry = self.registry.union(&[types]);
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Names the document's statements may start with: the base registry plus
    /// every type the document defines and their generic parameter names.
    pub fn vocabulary(&self, text: &str) -> Result<Vec<String>, MatcherError> {
        let mut names = self.registry.names().map(str::to_string).collect::<Vec<_>>();
        for statement in self.registry.matcher()?.find_statements(text) {
            if !matches!(statement.type_text, "type" | "enum") {
                continue;
            }
            let (name, params) = split_generics(statement.name);
            names.push(name);
            names.extend(params);
        }
        names.sort();
        names.dedup();
        Ok(names)
    }

    /// Build a [`Document`] from schema text.
    ///
    /// Malformed lines are skipped. Fails when the vocabulary cannot be
    /// compiled, or when registering a definition fails (an array alias whose
    /// element type cannot be instantiated within the parser's limits).
    pub fn parse(&self, text: &str) -> Result<Document, SchemaError> {
        let vocabulary = self.vocabulary(text)?;
        let matcher = StatementMatcher::new(vocabulary.iter().map(String::as_str))?;

        let mut builder = Builder::new(&matcher);
        builder.feed(text);
        let parsed = builder.finish();

        let mut types = self.registry.clone();
        let mut defined = Vec::with_capacity(parsed.definitions.len());
        // Array aliases pre-expand their element type, so they register last
        let (aliases, bodies): (Vec<_>, Vec<_>) = parsed
            .definitions
            .iter()
            .copied()
            .partition(|&id| array_len(&parsed.tree[id].raw_value).1.is_some());
        for id in bodies.into_iter().chain(aliases) {
            types.define_with(&parsed.tree, id, &self.options)?;
            defined.push(parsed.tree[id].name.clone());
        }

        tracing::debug!(
            "parsed document: {} statement(s), {} definition(s), {} api(s)",
            parsed.tree.len(),
            defined.len(),
            parsed.apis.len()
        );

        Ok(Document::new(
            text.to_string(),
            parsed.tree,
            parsed.root,
            types,
            defined,
            parsed.apis,
        ))
    }
}
