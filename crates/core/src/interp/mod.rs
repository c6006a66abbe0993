//! Operator-list interpretation and dispatch.
//!
//! This module contains:
//! - `walker`: the single-pass, order-preserving operator-list walker
//! - `device`: the output seam walked content is dispatched through
//! - `bridge`: the device that feeds images across the processing boundary

pub mod bridge;
pub mod device;
pub mod walker;

// Re-export main types for convenience
pub use bridge::CleanupBridge;
pub use device::{OpLogger, PageDevice};
pub use walker::{PageWalker, WalkStats};
