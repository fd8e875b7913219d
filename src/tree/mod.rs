//! Schema tree: nodes, shapes, and the arena that owns them.
//!
//! ## Key Types
//!
//! - [`Node`]: one statement (type, name, hint, raw value, resolved output)
//! - [`NodeId`]: index of a node inside a [`Tree`]
//! - [`Tree`]: arena owning every node of one document or template set
//! - [`Shape`]: stored classification (`Scalar | EnumRef | Dict | List`)
//! - [`Output`]: the value handed to serializers

mod arena;
mod node;

pub use arena::{Checkpoint, Tree};
pub use node::{Node, NodeId, Output, Shape};
