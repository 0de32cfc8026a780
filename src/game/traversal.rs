//! Traversal Planner
//!
//! Computes the cell visit order for a move so a single pass resolves all
//! slides and merges: cells nearest the destination edge are finalized first,
//! so every tile behind them slides into settled territory.

use crate::core::direction::Direction;
use crate::core::location::Location;

/// The visit order for a move toward `direction`, covering every cell of a
/// `size` x `size` board exactly once.
///
/// An axis is ordered descending when its direction component is +1 and
/// ascending otherwise; the full order is the cross product of both axes.
/// Processing a cell before the cells ahead of it would try to slide a tile
/// into a target that is not yet final.
pub fn order(size: usize, direction: Direction) -> Vec<Location> {
    let xs = axis_order(size, direction.dx());
    let ys = axis_order(size, direction.dy());

    let mut locations = Vec::with_capacity(size * size);
    for &x in &xs {
        for &y in &ys {
            locations.push(Location::new(x, y));
        }
    }
    locations
}

fn axis_order(size: usize, component: i32) -> Vec<i32> {
    let forward = 0..size as i32;
    if component == 1 {
        forward.rev().collect()
    } else {
        forward.collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
