//! Operator-list walker.
//!
//! Walks a decoded page's drawing operations in a single, strictly
//! sequential pass. Drawing order is semantically meaningful, so every device
//! callback and diagnostic fires in input order. Image-paint operations are
//! dispatched synchronously: the walker does not look at the next operation
//! until the device has finished with the current image.

use crate::error::{PlanError, Result};
use crate::interp::device::PageDevice;
use crate::model::{ObjectStore, OpCode, Operand, Operation, OperatorList, PathGroup};
use serde::Serialize;
use tracing::{debug, warn};

/// Per-walk counters, for reporting and tests.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WalkStats {
    /// Operations seen, including pass-throughs.
    pub operations: usize,
    /// Path-construction groups traversed.
    pub path_groups: usize,
    /// Images successfully dispatched through the device.
    pub images_dispatched: usize,
    /// Image dispatches that failed and were isolated.
    pub images_failed: usize,
}

/// Single-pass walker over a page's operator list.
pub struct PageWalker<'a, D: PageDevice + ?Sized> {
    device: &'a mut D,
    objects: &'a ObjectStore,
}

impl<'a, D: PageDevice + ?Sized> PageWalker<'a, D> {
    pub fn new(device: &'a mut D, objects: &'a ObjectStore) -> Self {
        Self { device, objects }
    }

    /// Walk the operator list in painting order.
    ///
    /// A failure dispatching one image is logged and isolated; subsequent
    /// operations still execute. A malformed path-construction block aborts
    /// the walk, since argument pairing can no longer be trusted.
    pub fn walk(&mut self, list: &OperatorList) -> Result<WalkStats> {
        let mut stats = WalkStats::default();

        for (index, op) in list.operations().iter().enumerate() {
            stats.operations += 1;
            self.device.note_op(index, op);

            match op.code {
                OpCode::ConstructPath => {
                    let group = PathGroup::from_args(&op.args)?;
                    stats.path_groups += 1;
                    self.device.paint_path(&group);
                }
                OpCode::PaintImageXObject => match self.dispatch_image(op) {
                    Ok(()) => stats.images_dispatched += 1,
                    Err(err) => {
                        stats.images_failed += 1;
                        warn!(index, %err, "image dispatch failed, continuing walk");
                    }
                },
                code => {
                    debug!(index, op = code.name(), code = code.code(), "pass-through operator");
                }
            }
        }

        Ok(stats)
    }

    fn dispatch_image(&mut self, op: &Operation) -> Result<()> {
        let name = op
            .args
            .first()
            .and_then(Operand::as_str)
            .ok_or_else(|| {
                PlanError::MalformedDump("paintImageXObject: missing reference name".into())
            })?;
        let image = self.objects.get(name)?;
        self.device.render_image(name, image)
    }
}
