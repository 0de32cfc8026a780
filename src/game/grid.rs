//! Board Aggregate
//!
//! The grid maps every location of the N x N square to an optional tile.
//! Invariants: the key set is always exactly the full coordinate square, and
//! an occupied cell holds a tile whose own `location` matches the key.
//!
//! One grid exists per game session, owned by the session controller. Uses
//! BTreeMap so iteration order (and therefore every downstream random draw)
//! is deterministic.

use std::collections::BTreeMap;
use std::fmt;

use crate::core::location::Location;
use crate::game::tile::Tile;

/// The playing board.
#[derive(Clone, Debug)]
pub struct Grid {
    size: usize,
    cells: BTreeMap<Location, Option<Tile>>,
}

impl Grid {
    /// Create an empty `size` x `size` grid with every cell present.
    pub fn new(size: usize) -> Self {
        let mut cells = BTreeMap::new();
        for x in 0..size as i32 {
            for y in 0..size as i32 {
                cells.insert(Location::new(x, y), None);
            }
        }
        Self { size, cells }
    }

    /// Board side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether a location lies on this board.
    #[inline]
    pub fn is_valid(&self, location: Location) -> bool {
        location.is_valid_for(self.size)
    }

    /// The tile at a location, if the location is on the board and occupied.
    #[inline]
    pub fn tile_at(&self, location: Location) -> Option<&Tile> {
        self.cells.get(&location).and_then(|cell| cell.as_ref())
    }

    /// Mutable access to the tile at a location.
    #[inline]
    pub fn tile_at_mut(&mut self, location: Location) -> Option<&mut Tile> {
        self.cells.get_mut(&location).and_then(|cell| cell.as_mut())
    }

    /// Whether a location is on the board and unoccupied.
    #[inline]
    pub fn is_empty_cell(&self, location: Location) -> bool {
        matches!(self.cells.get(&location), Some(None))
    }

    /// Put a tile into the cell named by its own `location` field.
    ///
    /// Replaces whatever occupied the cell. Placement outside the board is a
    /// programming error and is ignored in release builds.
    pub fn place(&mut self, tile: Tile) {
        debug_assert!(self.is_valid(tile.location), "placement off the board");
        if let Some(cell) = self.cells.get_mut(&tile.location) {
            *cell = Some(tile);
        }
    }

    /// Remove and return the tile at a location, leaving the cell empty.
    pub fn take(&mut self, location: Location) -> Option<Tile> {
        self.cells.get_mut(&location).and_then(|cell| cell.take())
    }

    /// Empty every cell, keeping the full key set.
    pub fn clear(&mut self) {
        for cell in self.cells.values_mut() {
            *cell = None;
        }
    }

    /// All unoccupied locations, in coordinate order.
    pub fn empty_locations(&self) -> Vec<Location> {
        self.cells
            .iter()
            .filter(|(_, cell)| cell.is_none())
            .map(|(loc, _)| *loc)
            .collect()
    }

    /// Whether every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.cells.values().all(|cell| cell.is_some())
    }

    /// Iterator over all tiles on the board, in coordinate order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.values().filter_map(|cell| cell.as_ref())
    }

    /// Number of occupied cells.
    pub fn tile_count(&self) -> usize {
        self.cells.values().filter(|cell| cell.is_some()).count()
    }

    /// Total number of cells (always size squared).
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Reset the per-move merged marker on every tile.
    pub fn clear_merged_flags(&mut self) {
        for cell in self.cells.values_mut() {
            if let Some(tile) = cell {
                tile.clear_merge();
            }
        }
    }
}

impl fmt::Display for Grid {
    /// Render the board row by row, `.` for empty cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size as i32 {
            for x in 0..self.size as i32 {
                match self.tile_at(Location::new(x, y)) {
                    Some(tile) => write!(f, "{:>6}", tile.value)?,
                    None => write!(f, "{:>6}", ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
