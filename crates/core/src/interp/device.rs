//! Page device - output interface for walked page content.
//!
//! Devices translate the walker's callbacks into the desired output. The
//! cleanup bridge feeds painted images through the processing boundary;
//! `OpLogger` writes the drawing sequence out for inspection. Every callback
//! fires in painting order.

use crate::error::Result;
use crate::model::{OpCode, Operation, PageImage, PathGroup};
use std::io::Write;

/// Output interface for walked page content.
pub trait PageDevice {
    /// Called once per operation, in painting order, before any
    /// operation-specific handling.
    fn note_op(&mut self, _index: usize, _op: &Operation) {}

    /// A decoded path-construction group, sub-operators already paired with
    /// their argument groups.
    fn paint_path(&mut self, _group: &PathGroup) {}

    /// A raster image about to be painted. An error here is isolated to this
    /// image by the walker; later operations still dispatch.
    fn render_image(&mut self, _name: &str, _image: &PageImage) -> Result<()> {
        Ok(())
    }
}

/// Writes the drawing sequence as text, one operation per line, recursing
/// into path groups with their paired arguments indented beneath.
pub struct OpLogger<'a, W: Write> {
    out: &'a mut W,
}

impl<'a, W: Write> OpLogger<'a, W> {
    pub fn new(out: &'a mut W) -> Self {
        Self { out }
    }

    fn fmt_args(args: &[f64]) -> String {
        let parts: Vec<String> = args.iter().map(|n| format!("{n}")).collect();
        parts.join(", ")
    }
}

impl<'a, W: Write> PageDevice for OpLogger<'a, W> {
    fn note_op(&mut self, index: usize, op: &Operation) {
        match op.code {
            // Path groups and images get their own detail lines.
            OpCode::ConstructPath | OpCode::PaintImageXObject => {
                let _ = writeln!(self.out, "{index:4}  {}", op.code.name());
            }
            _ => {
                let args = serde_json::to_string(&op.args).unwrap_or_default();
                let _ = writeln!(self.out, "{index:4}  {} {args}", op.code.name());
            }
        }
    }

    fn paint_path(&mut self, group: &PathGroup) {
        let bbox = group
            .bbox
            .map(|b| format!("{b:?}"))
            .unwrap_or_else(|| "none".to_string());
        let _ = writeln!(self.out, "      bbox = {bbox}");
        for (code, args) in group.pairs() {
            let _ = writeln!(self.out, "          {}({})", code.name(), Self::fmt_args(args));
        }
    }

    fn render_image(&mut self, name: &str, image: &PageImage) -> Result<()> {
        let _ = writeln!(
            self.out,
            "      paintImageXObject {name} ({}x{}, kind {})",
            image.width, image.height, image.kind
        );
        Ok(())
    }
}
