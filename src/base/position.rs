//! Position tracking for diagnostics
//!
//! Converts byte offsets recorded on statements into the line/column pair
//! reported to users when an instantiation fails.

use text_size::TextSize;

/// A position in source text (1-indexed line, 0-indexed column in bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

impl LineCol {
    pub fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

impl std::fmt::Display for LineCol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Locate `offset` within `text`.
///
/// Offsets past the end clamp to the end of the text.
pub fn line_col(text: &str, offset: TextSize) -> LineCol {
    let offset = usize::from(offset).min(text.len());
    let before = &text.as_bytes()[..offset];
    let line = before.iter().filter(|&&b| b == b'\n').count() as u32 + 1;
    let line_start = before
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1);
    LineCol::new(line, (offset - line_start) as u32)
}
