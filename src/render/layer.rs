//! Page content builder.
//!
//! Collects `printpdf` operations for one page. Image pages only ever
//! place XObjects, so the surface here is deliberately small.

use printpdf::{Op, XObjectId, XObjectTransform};

/// A builder that collects PDF operations for a single page
#[derive(Default)]
pub struct LayerBuilder {
    ops: Vec<Op>,
}

impl LayerBuilder {
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Get the collected operations
    pub fn into_ops(self) -> Vec<Op> {
        self.ops
    }

    /// Get a reference to the operations (for inspection)
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Place a registered XObject with the given transform
    pub fn use_xobject(&mut self, id: XObjectId, transform: XObjectTransform) {
        self.ops.push(Op::UseXobject { id, transform });
    }
}
