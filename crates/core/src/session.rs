//! Load lifecycle: file selection and document hand-off.

use crate::document::DumpDocument;
use crate::error::{PlanError, Result};
use std::fs;
use std::path::Path;
use tracing::info;

/// Read a file selection fully into memory.
///
/// Exactly one file must be selected; zero or several abort this load attempt
/// before any bytes are read. The whole file is in memory before processing
/// starts, so a truncated read can never reach the walker.
pub fn read_selection<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<u8>> {
    if paths.len() != 1 {
        return Err(PlanError::InputSelection(paths.len()));
    }
    let path = paths[0].as_ref();
    let data = fs::read(path)?;
    info!(path = %path.display(), bytes = data.len(), "read selection");
    Ok(data)
}

/// Serializes document loads.
///
/// A second load while one is in flight is rejected rather than cancelling
/// the first; the caller retries once the active load finishes.
#[derive(Debug, Default)]
pub struct Session {
    loading: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_in_progress(&self) -> bool {
        self.loading
    }

    /// Claim the load slot; fails if a load is already active.
    pub fn begin_load(&mut self) -> Result<()> {
        if self.loading {
            return Err(PlanError::LoadInProgress);
        }
        self.loading = true;
        Ok(())
    }

    /// Release the load slot. Safe to call after a failed load.
    pub fn finish_load(&mut self) {
        self.loading = false;
    }

    /// Parse a page dump under the load guard.
    pub fn load_document(&mut self, data: &[u8]) -> Result<DumpDocument> {
        self.begin_load()?;
        let result = DumpDocument::from_json(data);
        self.finish_load();
        result
    }
}
