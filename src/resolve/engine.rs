//! The instantiation worklist.
//!
//! Expansion runs on an explicit task stack rather than native recursion.
//! Tasks are pushed so that they pop in this order for one expansion:
//!
//! ```text
//! Copy(member 0) .. Copy(member n)   each pushes Resolve(copy) + inline Copies
//! Project(prototype)                 array instances only
//! Replicate(node, prototype, count)  array instances only
//! Project(node)
//! ```

use std::rc::Rc;

use crate::base::{Bindings, array_len, substitute};
use crate::registry::Registry;
use crate::tree::{Node, NodeId, Output, Shape, Tree};

use super::error::ResolveError;
use super::options::{ResolveOptions, UnknownEnumPolicy};

enum Task {
    /// Resolve a node's declared type
    Resolve { node: NodeId, depth: usize },
    /// Copy a template member under `parent`, then resolve the copy
    Copy {
        member: NodeId,
        parent: NodeId,
        bindings: Rc<Bindings>,
        as_item: bool,
        depth: usize,
    },
    /// Fill an array instance with copies of its expanded prototype
    Replicate {
        target: NodeId,
        proto: NodeId,
        count: usize,
    },
    Project(NodeId),
}

pub(super) struct Instantiator<'a> {
    tree: &'a mut Tree,
    root: NodeId,
    /// Arena length before this pass; ids at or above it are ours
    floor: usize,
    registry: &'a Registry,
    options: &'a ResolveOptions,
    stack: Vec<Task>,
    created: usize,
}

impl<'a> Instantiator<'a> {
    pub(super) fn new(
        tree: &'a mut Tree,
        root: NodeId,
        registry: &'a Registry,
        options: &'a ResolveOptions,
    ) -> Self {
        let floor = tree.len();
        Self {
            tree,
            root,
            floor,
            registry,
            options,
            stack: Vec::new(),
            created: 0,
        }
    }

    pub(super) fn run(mut self) -> Result<(), ResolveError> {
        self.stack.push(Task::Resolve {
            node: self.root,
            depth: 0,
        });

        while let Some(task) = self.stack.pop() {
            match task {
                Task::Resolve { node, depth } => {
                    self.assert_owned(node);
                    self.resolve_node(node, depth)?
                }
                Task::Copy {
                    member,
                    parent,
                    bindings,
                    as_item,
                    depth,
                } => {
                    self.assert_owned(parent);
                    self.copy_member(member, parent, bindings, as_item, depth)?
                }
                Task::Replicate {
                    target,
                    proto,
                    count,
                } => {
                    self.assert_owned(target);
                    self.replicate(target, proto, count)?
                }
                Task::Project(node) => {
                    self.assert_owned(node);
                    self.tree.project(node)
                }
            }
        }

        tracing::trace!("resolution created {} node(s)", self.created);
        Ok(())
    }

    /// Rollback restores only the root, so no other pre-existing node may be
    /// written.
    fn assert_owned(&self, id: NodeId) {
        debug_assert!(
            id == self.root || id.index() >= self.floor,
            "instantiation wrote to pre-existing node {} ('{}')",
            id.index(),
            self.tree[id].name
        );
    }

    fn charge(&mut self, nodes: usize) -> Result<(), ResolveError> {
        self.created += nodes;
        if self.created > self.options.max_nodes {
            return Err(ResolveError::ExpansionLimit {
                limit: self.options.max_nodes,
            });
        }
        Ok(())
    }

    fn alloc(&mut self, node: Node) -> Result<NodeId, ResolveError> {
        self.charge(1)?;
        Ok(self.tree.alloc(node))
    }

    /// Template id for `base` when it names a dict or list definition.
    fn expandable(&self, base: &str) -> Option<NodeId> {
        let template = self.registry.lookup(base)?;
        let node = &self.registry.templates()[template];
        let structural = matches!(node.shape(), Shape::Dict | Shape::List);
        (structural && !node.is_enum_def()).then_some(template)
    }

    fn resolve_node(&mut self, node: NodeId, depth: usize) -> Result<(), ResolveError> {
        let (base, len) = array_len(&self.tree[node].kind_type);
        if depth > self.options.max_depth {
            return Err(ResolveError::UnboundedRecursion {
                type_name: base,
                depth: self.options.max_depth,
            });
        }

        let registry = self.registry;
        match registry.lookup(&base) {
            Some(template) if registry.templates()[template].is_enum_def() => match len {
                Some(count) => self.replicate_enum(node, &base, count, depth),
                None => self.resolve_enum(node, template),
            },
            Some(template) if self.expandable(&base).is_some() => {
                self.expand(node, template, &base, len, depth)
            }
            // Unknown, declared-only, or scalar alias: a basic type
            _ => self.resolve_basic(node, &base, len),
        }
    }

    fn resolve_basic(
        &mut self,
        node: NodeId,
        base: &str,
        len: Option<usize>,
    ) -> Result<(), ResolveError> {
        if let Some(len) = len {
            for _ in 0..len {
                let item = self.alloc(Node::new(base, "", "", ""))?;
                self.tree.push_item(node, item);
            }
        }
        self.tree.project(node);
        Ok(())
    }

    /// `[N]Enum`: N items of the enum type sharing the node's raw value.
    fn replicate_enum(
        &mut self,
        node: NodeId,
        base: &str,
        count: usize,
        depth: usize,
    ) -> Result<(), ResolveError> {
        self.stack.push(Task::Project(node));
        let raw = self.tree[node].raw_value.clone();
        for _ in 0..count {
            let item = self.alloc(Node::new(base, "", "", &raw))?;
            self.tree.push_item(node, item);
            self.stack.push(Task::Resolve {
                node: item,
                depth: depth + 1,
            });
        }
        Ok(())
    }

    fn resolve_enum(&mut self, node: NodeId, template: NodeId) -> Result<(), ResolveError> {
        let registry = self.registry;
        let templates = registry.templates();
        let raw = self.tree[node].raw_value.trim();
        let value = raw.strip_suffix(",constant").unwrap_or(raw).to_string();
        self.tree.set_shape(node, Shape::EnumRef);

        // A required enum field has nothing to map yet
        if value.is_empty() {
            return Ok(());
        }

        match templates.get_child(template, &value) {
            Some(member) => {
                self.tree[node].output = Output::Literal(templates[member].raw_value.clone());
                Ok(())
            }
            None => match self.options.unknown_enum {
                UnknownEnumPolicy::Error => Err(ResolveError::UnknownEnumValue {
                    enum_name: templates[template].name.clone(),
                    value,
                    field: self.tree[node].name.clone(),
                }),
                UnknownEnumPolicy::Null => {
                    tracing::warn!(
                        "enum '{}' has no member '{}' (field '{}'), leaving it unset",
                        templates[template].name,
                        value,
                        self.tree[node].name
                    );
                    self.tree[node].output = Output::Unset;
                    Ok(())
                }
            },
        }
    }

    fn expand(
        &mut self,
        node: NodeId,
        template: NodeId,
        base: &str,
        len: Option<usize>,
        depth: usize,
    ) -> Result<(), ResolveError> {
        let registry = self.registry;
        let tpl = &registry.templates()[template];
        let usage = &self.tree[node];
        let bindings = Bindings::zip(&tpl.args, &usage.params).map_err(|(expected, found)| {
            ResolveError::ParameterCountMismatch {
                type_name: base.to_string(),
                field: usage.name.clone(),
                expected,
                found,
                span: usage.span,
            }
        })?;
        let bindings = Rc::new(bindings);

        tracing::trace!(
            "expanding '{}' into '{}' (depth {}, {} binding(s))",
            base,
            usage.name,
            depth,
            bindings.len()
        );

        self.stack.push(Task::Project(node));
        let target = match len {
            Some(count) => {
                let proto = self.alloc(Node::new(&tpl.name, &tpl.name, &tpl.hint, &tpl.raw_value))?;
                self.stack.push(Task::Replicate {
                    target: node,
                    proto,
                    count,
                });
                self.stack.push(Task::Project(proto));
                proto
            }
            None => node,
        };

        self.push_copies(tpl, target, &bindings, depth + 1);
        Ok(())
    }

    /// Queue copies of every member of `source` so they attach in order.
    fn push_copies(&mut self, source: &Node, parent: NodeId, bindings: &Rc<Bindings>, depth: usize) {
        let as_item = source.shape() == Shape::List;
        let members = if as_item {
            source.items.clone()
        } else {
            source.children.values().copied().collect()
        };
        for member in members.into_iter().rev() {
            self.stack.push(Task::Copy {
                member,
                parent,
                bindings: Rc::clone(bindings),
                as_item,
                depth,
            });
        }
    }

    fn copy_member(
        &mut self,
        member: NodeId,
        parent: NodeId,
        bindings: Rc<Bindings>,
        as_item: bool,
        depth: usize,
    ) -> Result<(), ResolveError> {
        let registry = self.registry;
        let src = &registry.templates()[member];
        let type_text = substitute(&src.type_text(), &bindings);

        let mut node = Node::new(&type_text, &src.name, &src.hint, &src.raw_value);
        node.span = src.span;
        let copy = self.alloc(node)?;
        if as_item {
            self.tree.push_item(parent, copy);
        } else {
            self.tree.add(parent, copy);
        }

        self.stack.push(Task::Resolve { node: copy, depth });

        // Inline bodies are copied structurally unless the member's own type
        // regenerates them from the registry.
        let (base, _) = array_len(&self.tree[copy].kind_type);
        if self.expandable(&base).is_none() {
            self.push_copies(src, copy, &bindings, depth);
        }
        Ok(())
    }

    fn replicate(&mut self, target: NodeId, proto: NodeId, count: usize) -> Result<(), ResolveError> {
        let size = self.tree.descendants(proto).len();
        self.tree.push_item(target, proto);
        for _ in 1..count {
            self.charge(size)?;
            let copy = self.tree.duplicate(proto);
            self.tree.push_item(target, copy);
        }
        Ok(())
    }
}
