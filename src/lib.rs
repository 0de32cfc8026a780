//! # Twenty48 Game Engine
//!
//! Deterministic grid movement and merge engine for 2048-style sliding-tile
//! puzzles: tiles slide toward an edge, equal pairs merge into doubled values,
//! and the first tile to reach the goal value wins the session.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TWENTY48 ENGINE                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── location.rs - Grid coordinates                          │
//! │  ├── direction.rs- Movement directions with unit vectors     │
//! │  └── rng.rs      - Deterministic Xorshift128+ PRNG           │
//! │                                                              │
//! │  game/           - Game logic (deterministic)                │
//! │  ├── tile.rs     - Tile model                                │
//! │  ├── grid.rs     - Owned board aggregate                     │
//! │  ├── traversal.rs- Per-direction cell visit order            │
//! │  ├── engine.rs   - Slide/merge move engine                   │
//! │  ├── terminal.rs - Game-over detection                       │
//! │  ├── spawn.rs    - Random tile placement                     │
//! │  └── session.rs  - Session controller (score, flags, clock)  │
//! │                                                              │
//! │  store/          - Persistence collaborators (filesystem)    │
//! │  ├── session.rs  - Board + score + time save slots           │
//! │  └── record.rs   - Best-score records                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The `core/` and `game/` modules are **100% deterministic**:
//! - No HashMap (uses BTreeMap for sorted iteration)
//! - No system time dependencies inside the move path
//! - All randomness from seeded Xorshift128+
//!
//! Given identical seeds and the same sequence of directions, a session
//! produces **identical boards, scores, and spawns** on any platform.
//!
//! The `store/` module is an external collaborator: the session controller
//! calls it on explicit save/restore/game-over events, never from inside a
//! move.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod store;

// Re-export commonly used types
pub use crate::core::direction::Direction;
pub use crate::core::location::Location;
pub use crate::core::rng::DeterministicRng;
pub use crate::game::engine::MoveResult;
pub use crate::game::grid::Grid;
pub use crate::game::session::GameSession;
pub use crate::game::tile::Tile;
pub use crate::store::record::RecordStore;
pub use crate::store::session::SessionStore;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tile value that wins the game the first time it is reached.
pub const WIN_VALUE: u32 = 2048;

/// Default board side length.
pub const DEFAULT_GRID_SIZE: usize = 4;
