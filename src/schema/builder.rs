//! Folds matched statements into a tree.

use text_size::{TextRange, TextSize};

use crate::base::classify_literal;
use crate::parser::{Statement, StatementMatcher};
use crate::tree::{Node, NodeId, Output, Tree};

/// Result of folding one document.
pub(super) struct Parsed {
    pub tree: Tree,
    pub root: NodeId,
    /// `type` / `enum` statements in source order, detached from `root`
    pub definitions: Vec<NodeId>,
    /// Top-level API blocks
    pub apis: Vec<NodeId>,
}

/// A string value still waiting for its closing quote.
struct OpenString {
    node: NodeId,
    quote: char,
}

pub(super) struct Builder<'m> {
    matcher: &'m StatementMatcher,
    tree: Tree,
    root: NodeId,
    /// Open containers, innermost last; `root` is never popped
    open: Vec<NodeId>,
    pending: Option<OpenString>,
    definitions: Vec<NodeId>,
    apis: Vec<NodeId>,
}

impl<'m> Builder<'m> {
    pub(super) fn new(matcher: &'m StatementMatcher) -> Self {
        let mut tree = Tree::new();
        let root = tree.alloc(Node::new("dict", "", "", "{"));
        Self {
            matcher,
            tree,
            root,
            open: vec![root],
            pending: None,
            definitions: Vec::new(),
            apis: Vec::new(),
        }
    }

    pub(super) fn feed(&mut self, text: &str) {
        let mut offset = 0usize;
        for line in text.split_inclusive('\n') {
            let start = offset;
            offset += line.len();

            if self.pending.is_some() {
                self.continue_string(line, offset);
                continue;
            }
            if let Some(statement) = self.matcher.match_line(line, start) {
                let node = self.stub(&statement);
                self.push(node);
            }
        }
    }

    /// Stub node for `statement` under the current container.
    ///
    /// Inside a list a bare literal (`"a"`, `3`) is an item value, not a name.
    fn stub(&self, statement: &Statement<'_>) -> Node {
        let text = statement.name.trim();
        let bare = statement.type_text.is_empty()
            && statement.hint.is_empty()
            && statement.value.is_empty()
            && !matches!(text, "}" | "]");
        if bare && self.tree[self.current()].is_list() && classify_literal(text).is_literal() {
            return Node::new("", "", "", text).with_span(statement.range);
        }
        statement.to_node()
    }

    pub(super) fn finish(mut self) -> Parsed {
        if let Some(open) = self.pending.take() {
            tracing::warn!(
                "string value of '{}' is never closed",
                self.tree[open.node].name
            );
        }
        // Unterminated blocks still count; definitions among them register
        while self.open.len() > 1 {
            if let Some(id) = self.open.pop() {
                tracing::warn!("block '{}' is never closed", self.tree[id].name);
                self.closed(id);
            }
        }

        self.tree.project(self.root);

        Parsed {
            tree: self.tree,
            root: self.root,
            definitions: self.definitions,
            apis: self.apis,
        }
    }

    fn push(&mut self, node: Node) {
        if node.is_close() {
            match self.open.len() {
                1 => tracing::warn!("ignoring unmatched '{}'", node.name),
                _ => {
                    if let Some(id) = self.open.pop() {
                        self.closed(id);
                    }
                }
            }
            return;
        }

        let opens = node.is_open() || node.is_bracket();
        let quote = node
            .multiline_quote()
            .filter(|&q| node.raw_value.matches(q).count() == 1);
        let definition = node.is_definition();
        let api = node.is_api();

        tracing::trace!(
            "statement '{}' type '{}' value {:?}",
            node.name,
            node.kind_type,
            node.raw_value
        );
        let parent = self.current();
        let id = self.tree.alloc(node);

        if definition {
            if !opens {
                self.definitions.push(id);
            }
        } else {
            self.tree.add(parent, id);
            if api && parent == self.root {
                self.apis.push(id);
            }
        }

        if opens {
            self.open.push(id);
        } else if let Some(quote) = quote {
            self.pending = Some(OpenString { node: id, quote });
        }
    }

    fn current(&self) -> NodeId {
        self.open.last().copied().unwrap_or(self.root)
    }

    fn closed(&mut self, id: NodeId) {
        if self.tree[id].is_definition() {
            self.definitions.push(id);
        } else {
            self.tree.project(id);
        }
    }

    /// Absorb one raw line into the pending string value.
    fn continue_string(&mut self, line: &str, end: usize) {
        let Some(open) = &self.pending else {
            return;
        };
        let (id, quote) = (open.node, open.quote);
        let text = line.trim_end_matches(['\r', '\n']);
        let done = text.matches(quote).count() == 1;

        let node = &mut self.tree[id];
        node.raw_value.push('\n');
        node.raw_value.push_str(text);
        if let Some(span) = node.span {
            let end = TextSize::new((end - (line.len() - text.len())) as u32);
            node.span = Some(TextRange::new(span.start(), end));
        }

        node.output = Output::Literal(node.raw_value.clone());
        if done {
            self.pending = None;
        }
    }
}
