//! Best-Score Records
//!
//! One record slot per grid size. Saving keeps the maximum of the stored and
//! the offered score, so callers can report every game-over score without
//! checking the current best first.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::store::StoreError;

#[derive(Debug, Serialize, Deserialize)]
struct SavedRecord {
    record: u32,
}

/// Filesystem store for best scores, one slot per grid size.
#[derive(Clone, Debug)]
pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    /// A store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the record slot for a grid size.
    pub fn slot_path(&self, grid_size: usize) -> PathBuf {
        self.dir.join(format!("record_{grid_size}.json"))
    }

    /// Offer a score; the slot keeps the maximum of stored and offered.
    ///
    /// Returns the record after the update.
    pub fn save_record(&self, grid_size: usize, score: u32) -> Result<u32, StoreError> {
        let record = self.restore_record(grid_size).max(score);

        fs::create_dir_all(&self.dir)?;
        let path = self.slot_path(grid_size);
        fs::write(&path, serde_json::to_string_pretty(&SavedRecord { record })?)?;
        debug!(path = %path.display(), record, "record saved");
        Ok(record)
    }

    /// The stored best score, or 0 when nothing (readable) is stored.
    pub fn restore_record(&self, grid_size: usize) -> u32 {
        let path = self.slot_path(grid_size);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(_) => return 0,
        };

        match serde_json::from_str::<SavedRecord>(&contents) {
            Ok(saved) => saved.record,
            Err(error) => {
                warn!(path = %path.display(), %error, "discarding corrupt record slot");
                0
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
