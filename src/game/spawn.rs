//! Spawn Selector
//!
//! Places new random tiles into empty cells: one after every move that
//! changed the board, and the opening one or two tiles at game start.

use crate::core::rng::DeterministicRng;
use crate::game::grid::Grid;
use crate::game::tile::Tile;

/// Chance (percent) that a spawned tile is a 4 instead of a 2.
pub const FOUR_TILE_PERCENT: u32 = 10;

/// Chance (percent) that a second tile is placed at game start.
pub const SECOND_START_TILE_PERCENT: u32 = 80;

/// Draw a random tile value: 2 most of the time, occasionally 4.
fn random_tile_value(rng: &mut DeterministicRng) -> u32 {
    if rng.chance(FOUR_TILE_PERCENT) {
        4
    } else {
        2
    }
}

/// Place one random tile into a uniformly chosen empty cell.
///
/// Returns `None` when the grid is full - nothing spawned. Never selects an
/// occupied location.
pub fn spawn_tile(grid: &mut Grid, rng: &mut DeterministicRng) -> Option<Tile> {
    let empty = grid.empty_locations();
    let location = *rng.choose(&empty)?;

    let tile = Tile::new(random_tile_value(rng), location);
    grid.place(tile);
    Some(tile)
}

/// Place the opening tiles of a fresh game.
///
/// Always places one tile; places a second with
/// [`SECOND_START_TILE_PERCENT`] probability. When both starters would be 4,
/// the second is forced down to 2 so the opening is never two 4s.
pub fn starting_tiles(grid: &mut Grid, rng: &mut DeterministicRng) -> Vec<Tile> {
    let mut open = grid.empty_locations();
    rng.shuffle(&mut open);
    let mut slots = open.into_iter();

    let mut placed = Vec::with_capacity(2);

    let Some(first_loc) = slots.next() else {
        return placed;
    };
    let first = Tile::new(random_tile_value(rng), first_loc);
    grid.place(first);
    placed.push(first);

    if rng.chance(SECOND_START_TILE_PERCENT) {
        if let Some(second_loc) = slots.next() {
            let mut value = random_tile_value(rng);
            if value == 4 && first.value == 4 {
                value = 2;
            }
            let second = Tile::new(value, second_loc);
            grid.place(second);
            placed.push(second);
        }
    }

    placed
}

// =============================================================================
// TESTS
// =============================================================================
