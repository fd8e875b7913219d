//! Foundation types for the stencil toolchain.
//!
//! This module provides the text-level helpers used throughout the crate:
//! - [`split_generics`], [`array_len`], [`substitute`] - Type text handling
//! - [`classify_literal`], [`LiteralKind`] - Lexical type inference for values
//! - [`LineCol`], [`line_col`] - Byte offset to line/column conversion
//! - [`TextRange`], [`TextSize`] - Source ranges (byte offsets)
//!
//! This module has NO dependencies on other stencil modules.

mod literal;
mod position;
mod type_ref;

pub use literal::{LiteralKind, classify_literal};
pub use position::{LineCol, line_col};
pub use type_ref::{Bindings, array_len, join_generics, split_generics, substitute};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
