//! Image dispatch bridge: the walker-facing side of the processing boundary.

use crate::error::Result;
use crate::interp::device::PageDevice;
use crate::model::PageImage;
use crate::present::Presenter;
use crate::processor::ImageProcessor;
use std::time::Instant;
use tracing::debug;

/// Feeds each painted image through the external processing routine and
/// forwards the result to a presenter.
///
/// The processing call is synchronous and blocking from the walker's
/// perspective, so per-image ordering holds and at most one call is ever in
/// flight. Results are forwarded immediately, never buffered.
pub struct CleanupBridge<'a, P: ImageProcessor + ?Sized, S: Presenter + ?Sized> {
    processor: &'a mut P,
    presenter: &'a mut S,
    processed: usize,
}

impl<'a, P: ImageProcessor + ?Sized, S: Presenter + ?Sized> CleanupBridge<'a, P, S> {
    pub fn new(processor: &'a mut P, presenter: &'a mut S) -> Self {
        Self {
            processor,
            presenter,
            processed: 0,
        }
    }

    /// Images processed so far.
    pub fn processed(&self) -> usize {
        self.processed
    }
}

impl<'a, P: ImageProcessor + ?Sized, S: Presenter + ?Sized> PageDevice
    for CleanupBridge<'a, P, S>
{
    fn render_image(&mut self, name: &str, image: &PageImage) -> Result<()> {
        let bits_per_pixel = image.bits_per_pixel()?;
        debug!(
            name,
            width = image.width,
            height = image.height,
            bits_per_pixel,
            bytes = image.data.len(),
            "dispatching image"
        );

        let started = Instant::now();
        let artifact = self
            .processor
            .process(&image.data, image.width, image.height, bits_per_pixel)?;
        debug!(
            name,
            elapsed_ms = started.elapsed().as_secs_f64() * 1e3,
            overlay = artifact.overlay.is_some(),
            "processing finished"
        );

        self.presenter.present(artifact);
        self.processed += 1;
        Ok(())
    }
}
