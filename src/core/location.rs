//! Grid Coordinates
//!
//! Immutable (x, y) cell addresses, 0-based from the top-left corner.
//! Implements Ord for deterministic BTreeMap ordering.

use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// A cell address on the board.
///
/// Coordinates are signed so that offsetting past an edge stays
/// representable; [`Location::is_valid_for`] decides whether the result is
/// actually on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Column, 0 at the left edge.
    pub x: i32,
    /// Row, 0 at the top edge.
    pub y: i32,
}

impl Location {
    /// Create a location from raw coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighboring location one step toward `direction`.
    ///
    /// The result may lie outside the board.
    #[inline]
    pub fn offset(self, direction: Direction) -> Location {
        Location::new(self.x + direction.dx(), self.y + direction.dy())
    }

    /// Whether this location lies inside a `size` x `size` board.
    #[inline]
    pub fn is_valid_for(self, size: usize) -> bool {
        let size = size as i32;
        self.x >= 0 && self.x < size && self.y >= 0 && self.y < size
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_follows_unit_vectors() {
        let loc = Location::new(1, 1);
        assert_eq!(loc.offset(Direction::Up), Location::new(1, 0));
        assert_eq!(loc.offset(Direction::Down), Location::new(1, 2));
        assert_eq!(loc.offset(Direction::Left), Location::new(0, 1));
        assert_eq!(loc.offset(Direction::Right), Location::new(2, 1));
    }

    #[test]
    fn test_offset_can_leave_board() {
        let corner = Location::new(0, 0);
        let above = corner.offset(Direction::Up);
        assert_eq!(above, Location::new(0, -1));
        assert!(!above.is_valid_for(4));
    }

    #[test]
    fn test_bounds_check() {
        assert!(Location::new(0, 0).is_valid_for(4));
        assert!(Location::new(3, 3).is_valid_for(4));
        assert!(!Location::new(4, 0).is_valid_for(4));
        assert!(!Location::new(0, 4).is_valid_for(4));
        assert!(!Location::new(-1, 2).is_valid_for(4));
    }

    #[test]
    fn test_ordering_is_total() {
        let mut locs = vec![
            Location::new(2, 1),
            Location::new(0, 3),
            Location::new(2, 0),
            Location::new(0, 0),
        ];
        locs.sort();
        assert_eq!(
            locs,
            vec![
                Location::new(0, 0),
                Location::new(0, 3),
                Location::new(2, 0),
                Location::new(2, 1),
            ]
        );
    }
}
