//! Logos-based classifier for statement values.
//!
//! When a statement carries no explicit type, its type is inferred from the
//! lexical shape of the value after `=`.

use logos::Logos;

/// Lexical category of a statement value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    /// No value at all (a required field)
    Empty,
    /// Quoted text, or the opening line of a multi-line string
    Str,
    /// Integer or decimal number
    Number,
    /// `true` / `false`
    Bool,
    /// The `none` optional marker
    None,
    /// `{` opening a dict body
    OpenDict,
    /// `[` opening a list body
    OpenList,
    /// Any other bare text
    Word,
}

impl LiteralKind {
    /// The type name inferred for a value of this kind.
    pub fn inferred_type(&self) -> &'static str {
        match self {
            Self::Str | Self::Word => "str",
            Self::Number => "num",
            Self::Bool => "bool",
            Self::None | Self::Empty => "any",
            Self::OpenDict => "dict",
            Self::OpenList => "list",
        }
    }

    /// Whether the value is a plain literal that becomes the initial output.
    pub fn is_literal(&self) -> bool {
        !matches!(self, Self::Empty | Self::OpenDict | Self::OpenList)
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum LiteralToken {
    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r"'[^']*'")]
    #[regex(r"`[^`]*`")]
    Quoted,

    #[regex(r"-?[0-9]+")]
    #[regex(r"-?[0-9]*\.[0-9]+([eE][+-]?[0-9]+)?")]
    Number,

    #[token("true")]
    #[token("false")]
    Bool,

    #[token("none")]
    None,

    #[token("{")]
    LBrace,

    #[token("[")]
    LBracket,
}

impl From<LiteralToken> for LiteralKind {
    fn from(token: LiteralToken) -> Self {
        match token {
            LiteralToken::Quoted => Self::Str,
            LiteralToken::Number => Self::Number,
            LiteralToken::Bool => Self::Bool,
            LiteralToken::None => Self::None,
            LiteralToken::LBrace => Self::OpenDict,
            LiteralToken::LBracket => Self::OpenList,
        }
    }
}

/// Classify a raw statement value.
///
/// A trailing `,constant` marker is ignored. The value must lex as exactly one
/// token to get a specific kind; otherwise it is [`LiteralKind::Word`], or
/// [`LiteralKind::Str`] when it opens with a quote that is never closed.
pub fn classify_literal(value: &str) -> LiteralKind {
    let text = value.trim();
    let text = text.strip_suffix(",constant").unwrap_or(text).trim_end();
    if text.is_empty() {
        return LiteralKind::Empty;
    }

    let mut lexer = LiteralToken::lexer(text);
    let first = lexer.next();
    let spans_all = lexer.span().end == text.len();

    match first {
        Some(Ok(token)) if spans_all && lexer.next().is_none() => token.into(),
        _ if text.starts_with(['"', '\'', '`']) => LiteralKind::Str,
        _ => LiteralKind::Word,
    }
}
