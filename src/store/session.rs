//! Session Save Slots
//!
//! Persists a full board plus score and elapsed play time, one JSON slot per
//! grid size. Every cell of the N x N square is written, keyed `"x_y"`, with
//! 0 marking an empty cell - so a slot is self-describing and a partially
//! corrupted one degrades cell by cell instead of failing wholesale.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::core::location::Location;
use crate::game::grid::Grid;
use crate::store::StoreError;

/// One persisted session: board contents, score, and elapsed time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SavedSession {
    /// Board side length this slot belongs to.
    pub grid_size: usize,

    /// Cell values keyed `"x_y"`, 0 for empty. Malformed values
    /// deserialize as 0 rather than poisoning the whole slot.
    #[serde(default, deserialize_with = "lenient_cells")]
    pub cells: BTreeMap<String, u32>,

    /// Score at save time. Malformed values deserialize as 0.
    #[serde(default, deserialize_with = "lenient_u32")]
    pub score: u32,

    /// Elapsed play time at save time, in milliseconds.
    #[serde(default, deserialize_with = "lenient_u64")]
    pub elapsed_ms: u64,

    /// When the slot was written.
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
}

impl SavedSession {
    /// Occupied cells as locations, dropping malformed keys and values that
    /// are not positive powers of two.
    pub fn tile_values(&self) -> BTreeMap<Location, u32> {
        let mut values = BTreeMap::new();
        for (key, &value) in &self.cells {
            let Some(location) = parse_cell_key(key) else {
                warn!(%key, "discarding unparsable cell key");
                continue;
            };
            if value == 0 {
                continue;
            }
            if value < 2 || !value.is_power_of_two() {
                warn!(%key, value, "discarding non-power-of-two cell value");
                continue;
            }
            values.insert(location, value);
        }
        values
    }

    /// Elapsed play time at save time.
    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms)
    }
}

/// Filesystem store for session slots, one per grid size.
#[derive(Clone, Debug)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// A store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the slot for a grid size.
    pub fn slot_path(&self, grid_size: usize) -> PathBuf {
        self.dir.join(format!("session_{grid_size}.json"))
    }

    /// Write the board, score, and elapsed time into the slot for the
    /// board's size, replacing any previous save.
    pub fn save(&self, grid: &Grid, score: u32, elapsed: Duration) -> Result<(), StoreError> {
        let size = grid.size();
        let mut cells = BTreeMap::new();
        for x in 0..size as i32 {
            for y in 0..size as i32 {
                let value = grid
                    .tile_at(Location::new(x, y))
                    .map(|tile| tile.value)
                    .unwrap_or(0);
                cells.insert(format!("{x}_{y}"), value);
            }
        }

        let saved = SavedSession {
            grid_size: size,
            cells,
            score,
            elapsed_ms: elapsed.as_millis() as u64,
            saved_at: Some(Utc::now()),
        };

        fs::create_dir_all(&self.dir)?;
        let path = self.slot_path(size);
        fs::write(&path, serde_json::to_string_pretty(&saved)?)?;
        debug!(path = %path.display(), score, "session saved");
        Ok(())
    }

    /// Read back the slot for a grid size.
    ///
    /// A missing, unreadable, or unparsable slot is "nothing to restore",
    /// never an error.
    pub fn restore(&self, grid_size: usize) -> Option<SavedSession> {
        let path = self.slot_path(grid_size);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(_) => {
                debug!(path = %path.display(), "no saved session");
                return None;
            }
        };

        match serde_json::from_str::<SavedSession>(&contents) {
            Ok(saved) => Some(saved),
            Err(error) => {
                warn!(path = %path.display(), %error, "discarding corrupt session slot");
                None
            }
        }
    }

    /// Remove the slot for a grid size, if present.
    pub fn clear(&self, grid_size: usize) -> Result<(), StoreError> {
        let path = self.slot_path(grid_size);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

fn parse_cell_key(key: &str) -> Option<Location> {
    let (x, y) = key.split_once('_')?;
    Some(Location::new(x.parse().ok()?, y.parse().ok()?))
}

fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(0))
}

fn lenient_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_u64().unwrap_or(0))
}

fn lenient_cells<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, u32>, D::Error> {
    let raw: BTreeMap<String, serde_json::Value> = BTreeMap::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(key, value)| {
            let value = value
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(0);
            (key, value)
        })
        .collect())
}

// =============================================================================
// TESTS
// =============================================================================
