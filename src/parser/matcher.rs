//! Regex-based statement matcher.
//!
//! One statement per line, in the shape
//!
//! ```text
//! [ '[' size ']' ] typeName [ '<' genArgs '>' ] name [ '<' genArgs '>' ] [ ':' hint ] [ '=' value ]
//! ```
//!
//! The leading type is only recognised when it starts with a name the matcher
//! was built with, so the vocabulary must be complete before matching.

use regex::Regex;
use text_size::{TextRange, TextSize};
use thiserror::Error;

use crate::tree::Node;

/// The statement pattern for a vocabulary could not be compiled.
///
/// Names are escaped, so this only happens when the vocabulary is large
/// enough to exceed the regex size limit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("statement pattern over {names} type name(s) failed to compile: {message}")]
pub struct MatcherError {
    pub names: usize,
    pub message: String,
}

/// Raw capture groups of one matched statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement<'a> {
    pub type_text: &'a str,
    pub name: &'a str,
    pub hint: &'a str,
    pub value: &'a str,
    /// Byte range of the matched text within the whole input
    pub range: TextRange,
}

impl Statement<'_> {
    /// Build the stub node for this statement.
    pub fn to_node(&self) -> Node {
        Node::new(self.type_text, self.name, self.hint, self.value).with_span(self.range)
    }
}

/// Immutable matcher compiled from a fixed set of type names.
#[derive(Debug, Clone)]
pub struct StatementMatcher {
    regex: Regex,
}

impl StatementMatcher {
    /// Compile a matcher recognising `names` as leading type keywords.
    pub fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<Self, MatcherError> {
        let names = names.into_iter().collect::<Vec<_>>();
        let regex = Regex::new(&Self::pattern(names.iter().copied())).map_err(|err| MatcherError {
            names: names.len(),
            message: err.to_string(),
        })?;
        Ok(Self { regex })
    }

    /// The regular expression for a set of type names.
    ///
    /// Names are escaped and ordered longest first so the alternation is
    /// deterministic; an empty set drops the type group entirely.
    pub fn pattern<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
        let mut names = names.into_iter().collect::<Vec<_>>();
        names.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        names.dedup();

        let type_group = if names.is_empty() {
            String::new()
        } else {
            let alternation = names
                .iter()
                .map(|name| regex::escape(name))
                .collect::<Vec<_>>()
                .join("|");
            format!(r"(?:((?:\[\d*\])*(?:{alternation})\b(?:<[\w,<>\[\] ]*>)?)[ \t]+)?")
        };

        format!(r"^[ \t]*{type_group}([^:=\s][^:=\r\n]*)(?::[ \t]*([^=\r\n]*))?(?:=[ \t]*([^\r\n]*))?")
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Split `text` into statements, skipping comments and unmatched lines.
    pub fn find_statements<'a>(&self, text: &'a str) -> Vec<Statement<'a>> {
        let mut statements = Vec::new();
        let mut offset = 0usize;

        for line in text.split_inclusive('\n') {
            let line_start = offset;
            offset += line.len();
            statements.extend(self.match_line(line, line_start));
        }

        statements
    }

    /// Match a single line starting at byte `offset` of the whole input.
    ///
    /// Comments and lines that match no statement shape yield `None`.
    pub fn match_line<'a>(&self, line: &'a str, offset: usize) -> Option<Statement<'a>> {
        let line = line.trim_end_matches(['\r', '\n']);

        let Some(caps) = self.regex.captures(line) else {
            if !line.trim().is_empty() {
                tracing::trace!("skipping malformed statement: {:?}", line);
            }
            return None;
        };

        let whole = caps.get(0)?;
        if whole.as_str().trim_start().starts_with('#') {
            tracing::trace!("skipping comment: {:?}", whole.as_str().trim());
            return None;
        }

        let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());
        // The type group is absent from the pattern when built without names
        let (type_text, name, hint, value) = if caps.len() == 5 {
            (group(1), group(2), group(3), group(4))
        } else {
            ("", group(1), group(2), group(3))
        };

        let start = (whole.start() + offset) as u32;
        let end = (whole.end() + offset) as u32;
        Some(Statement {
            type_text,
            name,
            hint,
            value: value.trim_end(),
            range: TextRange::new(TextSize::new(start), TextSize::new(end)),
        })
    }

    /// Split `text` into stub nodes, one per statement.
    pub fn find_nodes(&self, text: &str) -> Vec<Node> {
        self.find_statements(text)
            .iter()
            .map(Statement::to_node)
            .collect()
    }
}
