//! blueline - plan-sheet extraction, cleanup dispatch, and viewing pipeline.
//!
//! Walks a rendered page's operator list, forwards every painted raster
//! image across an injectable processing boundary, and routes the returned
//! artifact (an encoded raster plus an optional vector overlay) to a display
//! surface sitting behind a pannable, zoomable viewport transform.

pub mod document;
pub mod error;
pub mod high_level;
pub mod interp;
pub mod model;
pub mod present;
pub mod processor;
pub mod raster;
pub mod session;
pub mod utils;
pub mod viewport;

pub use error::{PlanError, Result};

// Re-export main types for convenience
pub use document::{DumpDocument, PageDump};
pub use high_level::{sweep_document, sweep_page};
pub use interp::{CleanupBridge, OpLogger, PageDevice, PageWalker, WalkStats};
pub use model::{
    ImageKind, ObjectStore, OpCode, Operand, Operation, OperatorList, PageImage, PathGroup,
};
pub use present::{ArtifactWriter, MediaResource, PageView, Presenter};
pub use processor::{FixedProcessor, ImageProcessor, ProcessedArtifact, ProcessorHandle};
pub use raster::{RasterProcessor, encode_bmp};
pub use session::{Session, read_selection};
pub use viewport::{FrameScheduler, ViewportController, ViewportState, ZOOM_SENSITIVITY};
