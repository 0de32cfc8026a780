//! Terminal Detector
//!
//! Decides whether any legal move remains. While any cell is empty a move is
//! always possible, so the adjacency scan only matters on a full grid.

use crate::core::direction::Direction;
use crate::game::grid::Grid;

/// Number of adjacent equal-valued pairs on the board.
///
/// Scans every occupied cell against its UP and LEFT neighbor only; the
/// equal-value relation is symmetric, so DOWN and RIGHT pairs are the same
/// pairs seen from the other side. Callable on any grid - on a non-full
/// board the count can serve as a merge hint.
pub fn mergeable_pairs(grid: &Grid) -> usize {
    let mut pairs = 0;
    for tile in grid.tiles() {
        for direction in [Direction::Up, Direction::Left] {
            let neighbor = tile.location.offset(direction);
            if grid
                .tile_at(neighbor)
                .is_some_and(|other| other.is_mergeable(tile))
            {
                pairs += 1;
            }
        }
    }
    pairs
}

/// Whether the game is over: no empty cell and no adjacent equal pair.
pub fn is_terminal(grid: &Grid) -> bool {
    grid.is_full() && mergeable_pairs(grid) == 0
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::location::Location;
    use crate::game::tile::Tile;

    fn full_grid(values: [[u32; 4]; 4]) -> Grid {
        let mut grid = Grid::new(4);
        for (y, row) in values.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                grid.place(Tile::new(value, Location::new(x as i32, y as i32)));
            }
        }
        grid
    }

    #[test]
    fn test_full_grid_without_pairs_is_terminal() {
        // Checkerboard of alternating values: no two neighbors match
        let grid = full_grid([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ]);

        assert_eq!(mergeable_pairs(&grid), 0);
        assert!(is_terminal(&grid));
    }

    #[test]
    fn test_full_grid_with_pair_is_not_terminal() {
        let grid = full_grid([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 4],
        ]);

        assert!(mergeable_pairs(&grid) > 0);
        assert!(!is_terminal(&grid));
    }

    #[test]
    fn test_grid_with_empty_cell_is_never_terminal() {
        let mut grid = full_grid([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ]);
        grid.take(Location::new(3, 3));

        assert!(!is_terminal(&grid));
    }

    #[test]
    fn test_vertical_pair_counts() {
        let mut grid = Grid::new(4);
        grid.place(Tile::new(8, Location::new(1, 1)));
        grid.place(Tile::new(8, Location::new(1, 2)));

        assert_eq!(mergeable_pairs(&grid), 1);
    }
}
