//! The external processing boundary.
//!
//! The pixel cleanup/encoding routine is an opaque collaborator: it takes a
//! raw pixel buffer plus its dimensions and bit depth, and synchronously
//! returns an encoded raster and, optionally, a vector-overlay fragment.
//! It is modeled as an injectable trait so the pipeline runs (and is tested)
//! against substitutes without the real routine.

use crate::error::{PlanError, Result};

/// What the processing routine hands back for one image.
///
/// Produced once per dispatched image and consumed immediately by the
/// presenter; the pipeline never retains or caches one.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedArtifact {
    /// Encoded raster image, ready to display.
    pub image: Vec<u8>,
    /// Media type of `image`.
    pub mime: &'static str,
    /// Optional scalable-graphics fragment to draw in registration with the
    /// raster.
    pub overlay: Option<String>,
}

/// The cleanup/encoding routine's calling contract.
pub trait ImageProcessor {
    /// Process one raw pixel buffer.
    ///
    /// Synchronous and blocking: the caller does not continue until this
    /// returns. `bits_per_pixel` tells the routine how to interpret `pixels`.
    fn process(
        &mut self,
        pixels: &[u8],
        width: u32,
        height: u32,
        bits_per_pixel: u8,
    ) -> Result<ProcessedArtifact>;
}

/// Holds the processing routine once it has been loaded.
///
/// The routine must be installed before the first dispatch; taking it from an
/// empty handle is a precondition violation surfaced as `ProcessorNotReady`,
/// checked before a walk begins rather than in the middle of one.
#[derive(Default)]
pub struct ProcessorHandle {
    inner: Option<Box<dyn ImageProcessor>>,
}

impl ProcessorHandle {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn install(&mut self, processor: Box<dyn ImageProcessor>) {
        self.inner = Some(processor);
    }

    pub fn installed(&self) -> bool {
        self.inner.is_some()
    }

    /// Borrow the installed routine.
    pub fn processor(&mut self) -> Result<&mut dyn ImageProcessor> {
        match self.inner.as_deref_mut() {
            Some(processor) => Ok(processor),
            None => Err(PlanError::ProcessorNotReady),
        }
    }
}

/// Deterministic stand-in for the real routine.
///
/// Returns a fixed artifact for every call and records the call parameters,
/// so tests can assert on dispatch order and the exact buffer/bit-depth
/// handed across the boundary.
#[derive(Debug, Default)]
pub struct FixedProcessor {
    overlay: Option<String>,
    /// (buffer length, width, height, bits per pixel) per invocation.
    pub calls: Vec<(usize, u32, u32, u8)>,
}

impl FixedProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overlay(overlay: impl Into<String>) -> Self {
        Self {
            overlay: Some(overlay.into()),
            calls: Vec::new(),
        }
    }
}

impl ImageProcessor for FixedProcessor {
    fn process(
        &mut self,
        pixels: &[u8],
        width: u32,
        height: u32,
        bits_per_pixel: u8,
    ) -> Result<ProcessedArtifact> {
        self.calls.push((pixels.len(), width, height, bits_per_pixel));
        Ok(ProcessedArtifact {
            image: format!("processed {width}x{height}@{bits_per_pixel}").into_bytes(),
            mime: "application/octet-stream",
            overlay: self.overlay.clone(),
        })
    }
}
