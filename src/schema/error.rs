//! Error types for building documents.

use thiserror::Error;

use crate::parser::MatcherError;
use crate::resolve::ResolveError;

/// Errors that stop a schema text from becoming a [`Document`](super::Document).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The document's vocabulary could not be compiled into a matcher.
    #[error(transparent)]
    Matcher(#[from] MatcherError),

    /// A type definition could not be registered.
    #[error(transparent)]
    Definition(#[from] ResolveError),
}

impl SchemaError {
    /// Stable diagnostic code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Matcher(_) => "E0101",
            Self::Definition(err) => err.code(),
        }
    }

    /// Format the error for display with its code.
    pub fn format(&self) -> String {
        format!("{}: {}", self.code(), self)
    }
}
