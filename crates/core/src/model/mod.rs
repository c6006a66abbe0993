//! Data model for decoded page content.
//!
//! This module contains:
//! - `ops`: operator-list types (operator codes, operands, path groups)
//! - `image`: named image objects and their pixel encodings

pub mod image;
pub mod ops;

pub use image::{ImageKind, ObjectStore, PageImage};
pub use ops::{OpCode, Operand, Operation, OperatorList, PathGroup};
