//! The schema tree element.

use indexmap::IndexMap;
use text_size::TextRange;

use crate::base::{classify_literal, split_generics};
use crate::registry::METHOD_TYPES;

/// Index of a node inside its [`Tree`](super::Tree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// What a node is for output purposes.
///
/// Computed when the node is built and updated as children, items, or an enum
/// mapping are attached. Never re-derived from field heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Shape {
    #[default]
    Scalar,
    EnumRef,
    Dict,
    List,
}

/// The externally visible value of a node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Output {
    /// No value (required field, or an unmapped enum under the null policy)
    #[default]
    Unset,
    /// A literal value, or the concrete value of an enum member
    Literal(String),
    /// The node's ordered `items`
    Items,
    /// The node's keyed `children`
    Children,
}

impl Output {
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(value) => Some(value),
            _ => None,
        }
    }
}

/// One parsed or instantiated statement.
///
/// `args` are generic names split out of `name` (`Pair<A,B>` declares `A`,
/// `B`); `params` are generic arguments split out of `kind_type` (`Pair<str,int>`
/// supplies `str`, `int`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind_type: String,
    pub name: String,
    pub hint: String,
    pub raw_value: String,
    pub output: Output,
    pub parent: Option<NodeId>,
    pub args: Vec<String>,
    pub params: Vec<String>,
    pub items: Vec<NodeId>,
    pub children: IndexMap<String, NodeId>,
    pub span: Option<TextRange>,
    pub(super) shape: Shape,
}

impl Node {
    /// Build a stub node from the four statement fields.
    ///
    /// An empty type is inferred from the value's lexical shape. Generic
    /// arguments are split out of both the type and the name.
    pub fn new(type_text: &str, name_text: &str, hint_text: &str, value_text: &str) -> Self {
        let literal = classify_literal(value_text);
        let type_text = type_text.trim();
        let type_text = if type_text.is_empty() {
            literal.inferred_type()
        } else {
            type_text
        };
        let output = if literal.is_literal() {
            Output::Literal(value_text.to_string())
        } else {
            Output::Unset
        };

        let (kind_type, params) = split_generics(type_text);
        let (name, args) = split_generics(name_text.trim());

        let shape = if value_text == "[" || kind_type == "list" || kind_type.starts_with('[') {
            Shape::List
        } else if value_text == "{" || kind_type == "dict" {
            Shape::Dict
        } else {
            Shape::Scalar
        };

        Self {
            kind_type,
            name,
            hint: hint_text.trim().to_string(),
            raw_value: value_text.to_string(),
            output,
            parent: None,
            args,
            params,
            items: Vec::new(),
            children: IndexMap::new(),
            span: None,
            shape,
        }
    }

    pub fn with_span(mut self, span: TextRange) -> Self {
        self.span = Some(span);
        self
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Full type text including generic arguments, e.g. `Pair<str,int>`.
    pub fn type_text(&self) -> String {
        crate::base::join_generics(&self.kind_type, &self.params)
    }

    /// Header of an API block (`GET`, `POST`)
    pub fn is_api(&self) -> bool {
        METHOD_TYPES.has(&self.kind_type)
    }

    /// `type` definition statement
    pub fn is_type_def(&self) -> bool {
        self.kind_type == "type"
    }

    /// `enum` definition statement
    pub fn is_enum_def(&self) -> bool {
        self.kind_type == "enum"
    }

    pub fn is_definition(&self) -> bool {
        self.is_type_def() || self.is_enum_def()
    }

    /// Value opens a dict body
    pub fn is_open(&self) -> bool {
        self.raw_value == "{"
    }

    /// Value opens a list body
    pub fn is_bracket(&self) -> bool {
        self.raw_value == "["
    }

    /// Closes the innermost open body
    pub fn is_close(&self) -> bool {
        self.name == "}" || self.name == "]"
    }

    pub fn is_dict(&self) -> bool {
        self.shape == Shape::Dict
    }

    pub fn is_list(&self) -> bool {
        self.shape == Shape::List
    }

    /// Opening quote of a string value, if the value starts with one.
    pub fn multiline_quote(&self) -> Option<char> {
        self.raw_value
            .chars()
            .next()
            .filter(|c| matches!(c, '"' | '\'' | '`'))
    }

    /// Whether the name holds exactly one `quote`.
    pub fn has_quotation(&self, quote: char) -> bool {
        self.name.matches(quote).count() == 1
    }

    pub fn is_required(&self) -> bool {
        self.raw_value.is_empty()
    }

    pub fn is_constant(&self) -> bool {
        self.raw_value.ends_with(",constant")
    }

    pub fn is_optional(&self) -> bool {
        self.raw_value == "none" || (!self.is_required() && !self.is_constant())
    }
}
