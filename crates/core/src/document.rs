//! Page dumps: the serialized hand-off from the rendering collaborator.
//!
//! General PDF rendering is out of scope here; the renderer is an external
//! collaborator treated as a black box. What crosses the boundary is its
//! decoded output for one or more pages: the page's user unit and view box,
//! the parallel operator code/argument arrays, and the named image objects.
//! This module parses that hand-off from its JSON form.

use crate::error::{PlanError, Result};
use crate::model::{ObjectStore, Operand, OperatorList};
use serde::{Deserialize, Serialize};

const fn default_user_unit() -> f64 {
    1.0
}

/// One decoded page as handed over by the renderer.
///
/// Field names follow the collaborator's own (camelCase) vocabulary so a dump
/// can be produced by serializing its page object directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDump {
    #[serde(default = "default_user_unit")]
    pub user_unit: f64,
    /// Page view box (x0, y0, x1, y1), if the renderer supplied one.
    #[serde(default)]
    pub view: Vec<f64>,
    /// Ordered operator codes.
    pub fn_array: Vec<u16>,
    /// Ordered argument lists, parallel to `fn_array`.
    pub args_array: Vec<Vec<Operand>>,
    /// Named image objects referenced by paint operations.
    #[serde(default)]
    pub objects: ObjectStore,
}

impl PageDump {
    /// Pair the operator arrays into a typed list, failing fast when the
    /// arrays disagree in length.
    pub fn operator_list(&self) -> Result<OperatorList> {
        OperatorList::from_arrays(self.fn_array.clone(), self.args_array.clone())
    }
}

/// A multi-page dump document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DumpDocument {
    #[serde(default)]
    pub pages: Vec<PageDump>,
}

impl DumpDocument {
    /// Parse a dump from raw JSON bytes. Any parse failure aborts the whole
    /// load attempt.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        serde_json::from_slice(data).map_err(|err| PlanError::MalformedDump(err.to_string()))
    }

    pub fn num_pages(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, index: usize) -> Result<&PageDump> {
        self.pages
            .get(index)
            .ok_or(PlanError::PageOutOfRange(index))
    }
}
