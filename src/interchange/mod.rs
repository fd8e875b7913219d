//! Serialization of resolved trees (feature `interchange`).
//!
//! The core only guarantees the shape of each node's output; these views map
//! that shape onto serde so any serde format can encode it.
//!
//! ```text
//! Output::Children ──▶ map    (insertion order)
//! Output::Items    ──▶ sequence
//! Output::Literal  ──▶ scalar (typed by the declared type in payloads)
//! Output::Unset    ──▶ omitted (NodeView) / null (PayloadView)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use stencil::{ResolveOptions, SchemaParser};
//!
//! let doc = SchemaParser::default().parse(text)?.resolve(&ResolveOptions::default())?;
//! let payload = doc.to_json()?;
//! ```

mod error;
mod views;

pub use error::InterchangeError;
pub use views::{NodeView, PayloadView};

use crate::schema::Document;
use crate::tree::NodeId;

impl Document {
    /// The resolved document as a bare JSON payload.
    pub fn to_json(&self) -> Result<serde_json::Value, InterchangeError> {
        self.payload_json(self.root())
    }

    /// The resolved document with types and hints, one object per node.
    pub fn to_annotated_json(&self) -> Result<serde_json::Value, InterchangeError> {
        if !self.is_resolved() {
            return Err(InterchangeError::Unresolved);
        }
        Ok(serde_json::to_value(NodeView::new(self.tree(), self.root()))?)
    }

    /// One statement of the resolved document as a bare JSON payload.
    pub fn payload_json(&self, id: NodeId) -> Result<serde_json::Value, InterchangeError> {
        if !self.is_resolved() {
            return Err(InterchangeError::Unresolved);
        }
        Ok(serde_json::to_value(PayloadView::new(self.tree(), id))?)
    }
}
