//! Instantiation limits and policies.

/// Default maximum nesting of type expansions.
pub const MAX_INSTANTIATION_DEPTH: usize = 64;

/// Default maximum number of nodes one resolution may create.
pub const MAX_INSTANTIATION_NODES: usize = 100_000;

/// What to do when an enum field names a member the enum lacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnknownEnumPolicy {
    /// Abort with [`ResolveError::UnknownEnumValue`](super::ResolveError::UnknownEnumValue)
    #[default]
    Error,
    /// Leave the output unset and log a warning
    Null,
}

/// Knobs for one resolution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    pub max_depth: usize,
    pub max_nodes: usize,
    pub unknown_enum: UnknownEnumPolicy,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            max_depth: MAX_INSTANTIATION_DEPTH,
            max_nodes: MAX_INSTANTIATION_NODES,
            unknown_enum: UnknownEnumPolicy::default(),
        }
    }
}

impl ResolveOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    pub fn with_unknown_enum(mut self, policy: UnknownEnumPolicy) -> Self {
        self.unknown_enum = policy;
        self
    }
}
