//! Move Engine
//!
//! One directional move: every tile slides as far as it can toward the
//! requested edge, equal pairs merge into a doubled tile, and the result is
//! reported back to the caller. The whole computation is synchronous and
//! total - any (grid, direction) pair produces a result immediately.

use crate::core::direction::Direction;
use crate::core::location::Location;
use crate::game::grid::Grid;
use crate::game::tile::Tile;
use crate::game::traversal;
use crate::WIN_VALUE;

/// Outcome of one directional move.
#[derive(Clone, Debug, Default)]
pub struct MoveResult {
    /// Number of tiles that slid or merged.
    pub tiles_moved: u32,

    /// Score gained: the sum of the doubled values produced by merges.
    pub score_delta: u32,

    /// Tiles absorbed into a partner this move, removed from the grid and
    /// returned to the caller for cleanup.
    pub absorbed: Vec<Tile>,

    /// Whether a merge reached [`WIN_VALUE`] during this move. The session
    /// controller turns this into the sticky per-session win flag.
    pub won: bool,
}

impl MoveResult {
    /// Whether the move changed the board at all.
    #[inline]
    pub fn moved(&self) -> bool {
        self.tiles_moved > 0
    }
}

/// Slide and merge every tile toward `direction`, mutating the grid in place.
///
/// Cells are visited in traversal order (destination edge inward), so each
/// tile lands on already-settled territory. A tile that absorbs a merge is
/// flagged and cannot absorb a second one within the same move; chains of
/// three or more equal tiles therefore merge pairwise from the edge inward.
pub fn apply_move(grid: &mut Grid, direction: Direction) -> MoveResult {
    let mut result = MoveResult::default();

    for current in traversal::order(grid.size(), direction) {
        let Some(tile) = grid.tile_at(current).copied() else {
            continue;
        };

        let farthest = farthest_location(grid, current, direction);
        let merge_candidate = farthest.offset(direction);

        let can_merge = grid
            .tile_at(merge_candidate)
            .is_some_and(|target| target.is_mergeable(&tile) && !target.merged);

        if can_merge {
            if let Some(absorbed) = grid.take(current) {
                result.absorbed.push(absorbed);
            }
            if let Some(target) = grid.tile_at_mut(merge_candidate) {
                target.merge();
                result.score_delta += target.value;
                if target.value == WIN_VALUE {
                    result.won = true;
                }
            }
            result.tiles_moved += 1;
        } else if farthest != current {
            if let Some(mut moved) = grid.take(current) {
                moved.location = farthest;
                grid.place(moved);
            }
            result.tiles_moved += 1;
        }
    }

    // Merged markers are only valid within this move
    grid.clear_merged_flags();

    result
}

/// The last unoccupied cell reachable from `from` when scanning toward
/// `direction`. Equals `from` when the neighboring cell is occupied or off
/// the board.
pub fn farthest_location(grid: &Grid, from: Location, direction: Direction) -> Location {
    let mut farthest = from;
    let mut next = farthest.offset(direction);
    while grid.is_empty_cell(next) {
        farthest = next;
        next = farthest.offset(direction);
    }
    farthest
}

// =============================================================================
// TESTS
// =============================================================================
