//! Tile Model
//!
//! A tile holds a power-of-two value and knows where it sits. The `merged`
//! marker is only meaningful for the duration of a single move: the engine
//! sets it when the tile absorbs a partner and clears every remaining flag
//! before the move returns.

use serde::{Deserialize, Serialize};

use crate::core::location::Location;

/// A single board tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Face value, a power of two >= 2.
    pub value: u32,

    /// Current cell. Always matches the grid key the tile is stored under.
    pub location: Location,

    /// Whether this tile already absorbed a merge during the current move.
    pub merged: bool,
}

impl Tile {
    /// Create a tile with the given value at a location.
    pub fn new(value: u32, location: Location) -> Self {
        Self {
            value,
            location,
            merged: false,
        }
    }

    /// Whether `other` could merge into this tile, value-wise.
    #[inline]
    pub fn is_mergeable(&self, other: &Tile) -> bool {
        self.value == other.value
    }

    /// Absorb a partner tile: double the value and mark this tile merged.
    pub fn merge(&mut self) {
        self.value <<= 1;
        self.merged = true;
    }

    /// Reset the per-move merged marker.
    #[inline]
    pub fn clear_merge(&mut self) {
        self.merged = false;
    }
}

// =============================================================================
// TESTS
// =============================================================================
