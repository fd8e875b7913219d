//! Statement matcher for the schema description language
//!
//! This module turns raw schema text into flat stub nodes:
//! - **regex** compiled from the registry's known type names
//! - one [`Statement`] per matching line, carrying its source range
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! StatementMatcher (regex) → Statement (type, name, hint, value, range)
//!     ↓
//! Node::new → flat stub nodes (type inferred, generics split)
//!     ↓
//! schema → tree + type registry
//! ```
//!
//! Comment lines (`#` after trimming) and lines matching no statement shape
//! produce nothing; partial text degrades instead of failing.

mod matcher;

pub use matcher::{MatcherError, Statement, StatementMatcher};
