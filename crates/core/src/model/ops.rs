//! Operator-list model.
//!
//! The rendering collaborator hands over a decoded page as two parallel
//! arrays: an ordered list of operator codes and an ordered list of argument
//! lists. This module gives that wire shape a typed form. Drawing order is
//! semantically meaningful, so the list preserves input order exactly.

use crate::error::{PlanError, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Operator codes emitted by the rendering collaborator.
///
/// Discriminants match the upstream renderer's operator table. Codes outside
/// the set the pipeline acts on are carried through as `Unknown` and surface
/// only in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCode {
    Dependency,
    Save,
    Restore,
    Transform,
    MoveTo,
    LineTo,
    CurveTo,
    CurveTo2,
    CurveTo3,
    ClosePath,
    Rectangle,
    BeginText,
    EndText,
    PaintImageXObject,
    ConstructPath,
    Unknown(u16),
}

/// Reverse lookup from numeric code to operator name, for diagnostics.
static OP_NAMES: Lazy<HashMap<u16, &'static str>> = Lazy::new(|| {
    let mut names = HashMap::new();
    names.insert(1, "dependency");
    names.insert(10, "save");
    names.insert(11, "restore");
    names.insert(12, "transform");
    names.insert(13, "moveTo");
    names.insert(14, "lineTo");
    names.insert(15, "curveTo");
    names.insert(16, "curveTo2");
    names.insert(17, "curveTo3");
    names.insert(18, "closePath");
    names.insert(19, "rectangle");
    names.insert(31, "beginText");
    names.insert(32, "endText");
    names.insert(85, "paintImageXObject");
    names.insert(91, "constructPath");
    names
});

impl OpCode {
    /// Decode a numeric operator code. Total: unrecognized codes map to
    /// `Unknown` rather than failing, since the walker must tolerate any
    /// operator the collaborator emits.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => Self::Dependency,
            10 => Self::Save,
            11 => Self::Restore,
            12 => Self::Transform,
            13 => Self::MoveTo,
            14 => Self::LineTo,
            15 => Self::CurveTo,
            16 => Self::CurveTo2,
            17 => Self::CurveTo3,
            18 => Self::ClosePath,
            19 => Self::Rectangle,
            31 => Self::BeginText,
            32 => Self::EndText,
            85 => Self::PaintImageXObject,
            91 => Self::ConstructPath,
            other => Self::Unknown(other),
        }
    }

    /// The numeric code as emitted by the collaborator.
    pub const fn code(self) -> u16 {
        match self {
            Self::Dependency => 1,
            Self::Save => 10,
            Self::Restore => 11,
            Self::Transform => 12,
            Self::MoveTo => 13,
            Self::LineTo => 14,
            Self::CurveTo => 15,
            Self::CurveTo2 => 16,
            Self::CurveTo3 => 17,
            Self::ClosePath => 18,
            Self::Rectangle => 19,
            Self::BeginText => 31,
            Self::EndText => 32,
            Self::PaintImageXObject => 85,
            Self::ConstructPath => 91,
            Self::Unknown(code) => code,
        }
    }

    /// Human-readable operator name for logging.
    pub fn name(self) -> &'static str {
        OP_NAMES.get(&self.code()).copied().unwrap_or("unknown")
    }
}

/// A single operator argument as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    Null,
    Num(f64),
    Text(String),
    Array(Vec<Operand>),
}

impl Operand {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Num(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Operand]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }
}

/// One drawing operation: an operator code plus its argument list.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub code: OpCode,
    pub args: Vec<Operand>,
}

/// The decoded sequence of drawing operations for one page.
///
/// Built from the collaborator's parallel code/argument arrays; construction
/// fails fast when the arrays disagree in length, since silently pairing a
/// truncated prefix would reorder or drop paint operations.
#[derive(Debug, Clone, Default)]
pub struct OperatorList {
    ops: Vec<Operation>,
}

impl OperatorList {
    pub fn from_arrays(fn_array: Vec<u16>, args_array: Vec<Vec<Operand>>) -> Result<Self> {
        if fn_array.len() != args_array.len() {
            return Err(PlanError::MalformedOperatorArgs {
                ops: fn_array.len(),
                args: args_array.len(),
            });
        }
        let ops = fn_array
            .into_iter()
            .zip(args_array)
            .map(|(code, args)| Operation {
                code: OpCode::from_code(code),
                args,
            })
            .collect();
        Ok(Self { ops })
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Operations in original painting order.
    pub fn operations(&self) -> &[Operation] {
        &self.ops
    }
}

/// The decoded argument block of a `constructPath` operation: sub-operator
/// codes, one argument group per sub-operator, and the path's bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct PathGroup {
    pub ops: Vec<OpCode>,
    pub args: Vec<Vec<f64>>,
    pub bbox: Option<[f64; 4]>,
}

impl PathGroup {
    /// Decode a `constructPath` argument list.
    ///
    /// Sub-operator *i* pairs with argument group *i*; a length mismatch is a
    /// malformed-input condition and fails fast.
    pub fn from_args(args: &[Operand]) -> Result<Self> {
        let ops_block = args
            .first()
            .and_then(Operand::as_array)
            .ok_or_else(|| PlanError::MalformedDump("constructPath: missing sub-operator array".into()))?;
        let args_block = args
            .get(1)
            .and_then(Operand::as_array)
            .ok_or_else(|| PlanError::MalformedDump("constructPath: missing sub-argument array".into()))?;

        if ops_block.len() != args_block.len() {
            return Err(PlanError::MalformedOperatorArgs {
                ops: ops_block.len(),
                args: args_block.len(),
            });
        }

        let ops = ops_block
            .iter()
            .map(|op| {
                op.as_f64()
                    .map(|n| OpCode::from_code(n as u16))
                    .ok_or_else(|| {
                        PlanError::MalformedDump("constructPath: non-numeric sub-operator".into())
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let groups = args_block
            .iter()
            .map(|group| {
                group
                    .as_array()
                    .map(|items| items.iter().filter_map(Operand::as_f64).collect())
                    .ok_or_else(|| {
                        PlanError::MalformedDump("constructPath: sub-argument group is not an array".into())
                    })
            })
            .collect::<Result<Vec<Vec<f64>>>>()?;

        let bbox = args.get(2).and_then(Operand::as_array).and_then(|b| {
            let coords: Vec<f64> = b.iter().filter_map(Operand::as_f64).collect();
            coords.try_into().ok()
        });

        Ok(Self {
            ops,
            args: groups,
            bbox,
        })
    }

    /// Sub-operators paired with their argument groups, in input order.
    pub fn pairs(&self) -> impl Iterator<Item = (OpCode, &[f64])> {
        self.ops
            .iter()
            .copied()
            .zip(self.args.iter().map(Vec::as_slice))
    }
}
