//! Error types for the blueline pipeline.

use thiserror::Error;

/// Primary error type for plan extraction and dispatch.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("select exactly one file to process, got {0}")]
    InputSelection(usize),

    #[error("unknown image encoding tag: {0}")]
    UnknownEncoding(u8),

    #[error("malformed path arguments: {ops} sub-operators, {args} argument groups")]
    MalformedOperatorArgs { ops: usize, args: usize },

    #[error("image object not found: {0}")]
    ObjectNotFound(String),

    #[error("external processing failed: {0}")]
    ExternalProcessing(String),

    #[error("processing routine not installed")]
    ProcessorNotReady,

    #[error("a document load is already in progress")]
    LoadInProgress,

    #[error("malformed page dump: {0}")]
    MalformedDump(String),

    #[error("page index out of range: {0}")]
    PageOutOfRange(usize),

    #[error("unsupported raster layout: {0}")]
    UnsupportedRaster(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias for PlanError.
pub type Result<T> = std::result::Result<T, PlanError>;
