//! # stencil-base
//!
//! Parser and generic-instantiation engine for a compact, line-oriented schema
//! language: field declarations, nested dicts and lists, enums, and API blocks
//! tagged with an HTTP method.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! dispatch  → First-match rule dispatcher for post-processing
//!   ↓
//! schema    → Document builder: text → node tree + user type registry
//!   ↓
//! resolve   → Instantiation engine (task stack, limits, errors)
//!   ↓
//! registry  → Type registry, method-name singleton, matcher pattern
//!   ↓
//! parser    → Regex statement matcher producing stub nodes
//!   ↓
//! tree      → Node arena, Shape tag, Output projection
//!   ↓
//! base      → Type text helpers, logos literal classifier, TextRange
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use stencil::{ResolveOptions, SchemaParser};
//!
//! let text = "type Pair<A,B> = {\n  A left\n  B right\n}\nPair<str,int> p\n";
//! let doc = SchemaParser::default().parse(text)?.resolve(&ResolveOptions::default())?;
//! ```

// ============================================================================
// MODULES (dependency order: base → tree → parser → registry → resolve → schema)
// ============================================================================

/// Foundation: type text helpers, literal classification, TextRange
pub mod base;

/// Node arena: Node, NodeId, Tree, Shape, Output
pub mod tree;

/// Statement matcher: regex built from a type vocabulary
pub mod parser;

/// Type registry: templates and known names
pub mod registry;

/// Instantiation engine: expanding type references into subtrees
pub mod resolve;

/// Document builder: text to tree plus user types
pub mod schema;

/// First-match rule dispatcher
pub mod dispatch;

/// Serde views over resolved trees
#[cfg(feature = "interchange")]
pub mod interchange;

// Re-export commonly needed items
pub use base::{LineCol, TextRange, TextSize};
pub use dispatch::Dispatcher;
pub use parser::{MatcherError, Statement, StatementMatcher};
pub use registry::{METHOD_TYPES, Registry};
pub use resolve::{
    MAX_INSTANTIATION_DEPTH, MAX_INSTANTIATION_NODES, ResolveError, ResolveOptions,
    UnknownEnumPolicy, instantiate, instantiate_all, resolve,
};
pub use schema::{Document, SchemaError, SchemaParser};
pub use tree::{Node, NodeId, Output, Shape, Tree};
