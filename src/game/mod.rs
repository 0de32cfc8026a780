//! Game Logic Module
//!
//! All board and move logic. 100% deterministic given a seed.
//!
//! ## Module Structure
//!
//! - `tile`: Tile model (value, location, per-move merged marker)
//! - `grid`: Owned board aggregate over the full N x N coordinate square
//! - `traversal`: Per-direction cell visit order
//! - `engine`: Slide/merge move engine
//! - `terminal`: Game-over detection
//! - `spawn`: Random tile placement
//! - `session`: Session controller (score, win/over flags, guard, clock)

pub mod engine;
pub mod grid;
pub mod session;
pub mod spawn;
pub mod terminal;
pub mod tile;
pub mod traversal;

// Re-export key types
pub use engine::MoveResult;
pub use grid::Grid;
pub use session::GameSession;
pub use tile::Tile;
