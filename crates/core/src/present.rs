//! Result presentation: display surfaces and artifact files.
//!
//! A presenter consumes each `ProcessedArtifact` as it comes off the
//! processing boundary. `PageView` is the in-memory display surface an
//! interactive front end reads from; `ArtifactWriter` drops artifacts into an
//! output directory for batch runs.

use crate::error::Result;
use crate::processor::ProcessedArtifact;
use bytes::Bytes;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::error;

/// A displayable binary resource: encoded image bytes plus their media type.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaResource {
    pub data: Bytes,
    pub mime: &'static str,
}

/// Sink for processed artifacts.
///
/// May be called zero or many times per page load; each call fully supersedes
/// the previous raster from the viewer's perspective.
pub trait Presenter {
    fn present(&mut self, artifact: ProcessedArtifact);
}

/// In-memory display surface: the current raster plus at most one overlay
/// child positioned at the raster's origin.
#[derive(Debug, Default)]
pub struct PageView {
    image: Option<MediaResource>,
    overlay: Option<String>,
    generation: u64,
}

impl PageView {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently displayed raster, if any.
    pub fn image(&self) -> Option<&MediaResource> {
        self.image.as_ref()
    }

    /// The currently installed overlay fragment, if any.
    pub fn overlay(&self) -> Option<&str> {
        self.overlay.as_deref()
    }

    /// Bumped on every raster replacement, so a display layer can tell that
    /// the old resource was superseded rather than composited over.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Remove the injected overlay. Removing when none exists is a no-op.
    pub fn clear_overlay(&mut self) {
        self.overlay = None;
    }
}

impl Presenter for PageView {
    fn present(&mut self, artifact: ProcessedArtifact) {
        self.image = Some(MediaResource {
            data: Bytes::from(artifact.image),
            mime: artifact.mime,
        });
        self.generation += 1;
        if let Some(overlay) = artifact.overlay {
            self.clear_overlay();
            self.overlay = Some(overlay);
        }
    }
}

fn ext_for_mime(mime: &str) -> &'static str {
    match mime {
        "image/bmp" => ".bmp",
        "image/png" => ".png",
        _ => ".bin",
    }
}

/// Writes each artifact to sequentially numbered files in an output
/// directory: the raster with an extension matching its media type, the
/// overlay as a sibling `.svg`.
pub struct ArtifactWriter {
    outdir: PathBuf,
    seq: usize,
}

impl ArtifactWriter {
    pub fn new(outdir: impl AsRef<Path>) -> Result<Self> {
        let outdir = outdir.as_ref().to_path_buf();
        fs::create_dir_all(&outdir)?;
        Ok(Self { outdir, seq: 0 })
    }

    /// Number of artifacts written so far.
    pub fn written(&self) -> usize {
        self.seq
    }

    /// Write one artifact; returns the raster's path.
    pub fn write(&mut self, artifact: &ProcessedArtifact) -> Result<PathBuf> {
        self.seq += 1;
        let base = format!("plan_{}", self.seq);
        let image_path = self
            .outdir
            .join(format!("{base}{}", ext_for_mime(artifact.mime)));
        fs::write(&image_path, &artifact.image)?;
        if let Some(overlay) = &artifact.overlay {
            fs::write(self.outdir.join(format!("{base}.svg")), overlay)?;
        }
        Ok(image_path)
    }
}

impl Presenter for ArtifactWriter {
    fn present(&mut self, artifact: ProcessedArtifact) {
        if let Err(err) = self.write(&artifact) {
            error!(%err, "failed to write artifact");
        }
    }
}
