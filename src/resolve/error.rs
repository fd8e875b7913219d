//! Error types for instantiation.

use text_size::TextRange;
use thiserror::Error;

/// Errors that abort the instantiation of a schema unit.
///
/// Malformed statements are not errors; the matcher drops them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A generic usage supplies a different number of arguments than the
    /// template declares.
    #[error(
        "type '{type_name}' expects {expected} generic argument(s) but field '{field}' supplies {found}"
    )]
    ParameterCountMismatch {
        type_name: String,
        field: String,
        expected: usize,
        found: usize,
        span: Option<TextRange>,
    },

    /// An enum-typed field names a member the enum does not declare.
    #[error("enum '{enum_name}' has no member '{value}' (field '{field}')")]
    UnknownEnumValue {
        enum_name: String,
        value: String,
        field: String,
    },

    /// Expansion nested deeper than the configured limit, usually a type that
    /// contains itself.
    #[error("expansion of type '{type_name}' exceeded the maximum depth of {depth}")]
    UnboundedRecursion { type_name: String, depth: usize },

    /// Expansion produced more nodes than the configured budget.
    #[error("expansion exceeded the node budget of {limit}")]
    ExpansionLimit { limit: usize },
}

impl ResolveError {
    /// Stable diagnostic code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ParameterCountMismatch { .. } => "E0301",
            Self::UnknownEnumValue { .. } => "E0302",
            Self::UnboundedRecursion { .. } => "E0401",
            Self::ExpansionLimit { .. } => "E0402",
        }
    }

    /// Source range of the offending statement, when known.
    pub fn span(&self) -> Option<TextRange> {
        match self {
            Self::ParameterCountMismatch { span, .. } => *span,
            _ => None,
        }
    }

    /// Format the error for display with its code.
    pub fn format(&self) -> String {
        format!("{}: {}", self.code(), self)
    }
}
