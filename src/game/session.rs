//! Session Controller
//!
//! Owns one game's aggregate state: the grid, the PRNG, the score, the
//! sticky win flag, game-over state, the advisory settling guard, and the
//! play clock. Drives the move engine, spawn selector, and terminal detector
//! in order, and delegates persistence to the `store` collaborators on
//! explicit request - never from inside a move.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::core::direction::Direction;
use crate::core::location::Location;
use crate::core::rng::DeterministicRng;
use crate::game::engine::{self, MoveResult};
use crate::game::grid::Grid;
use crate::game::spawn;
use crate::game::terminal;
use crate::game::tile::Tile;
use crate::store::session::SessionStore;
use crate::store::StoreError;

/// Pausable wall-clock play time, restorable from a save.
#[derive(Clone, Debug)]
struct SessionClock {
    accumulated: Duration,
    resumed_at: Option<Instant>,
}

impl SessionClock {
    fn new() -> Self {
        Self {
            accumulated: Duration::ZERO,
            resumed_at: None,
        }
    }

    fn restart(&mut self) {
        self.accumulated = Duration::ZERO;
        self.resumed_at = Some(Instant::now());
    }

    fn pause(&mut self) {
        if let Some(resumed_at) = self.resumed_at.take() {
            self.accumulated += resumed_at.elapsed();
        }
    }

    fn resume(&mut self) {
        if self.resumed_at.is_none() {
            self.resumed_at = Some(Instant::now());
        }
    }

    fn elapsed(&self) -> Duration {
        let running = self
            .resumed_at
            .map(|resumed_at| resumed_at.elapsed())
            .unwrap_or_default();
        self.accumulated + running
    }

    fn set(&mut self, elapsed: Duration) {
        self.accumulated = elapsed;
        self.resumed_at = Some(Instant::now());
    }
}

/// One game session: an owned board plus the state around it.
///
/// Processing is single-threaded cooperative: a move is computed and applied
/// synchronously, and the settling guard serializes logically overlapping
/// input until the caller acknowledges the previous move as visually settled.
#[derive(Debug)]
pub struct GameSession {
    grid: Grid,
    rng: DeterministicRng,
    score: u32,
    won: bool,
    game_over: bool,
    settling: bool,
    clock: SessionClock,
}

impl GameSession {
    /// Create a session over an empty `size` x `size` board.
    ///
    /// The board stays empty until [`GameSession::start`] places the opening
    /// tiles (or a restore loads saved ones).
    pub fn new(size: usize, seed: u64) -> Self {
        Self {
            grid: Grid::new(size),
            rng: DeterministicRng::new(seed),
            score: 0,
            won: false,
            game_over: false,
            settling: false,
            clock: SessionClock::new(),
        }
    }

    /// Start a fresh game: wipe the board, zero the score and flags, place
    /// the opening tiles, and restart the clock.
    pub fn start(&mut self) {
        self.grid.clear();
        self.score = 0;
        self.won = false;
        self.game_over = false;
        self.settling = false;

        let placed = spawn::starting_tiles(&mut self.grid, &mut self.rng);
        self.clock.restart();
        info!(
            size = self.grid.size(),
            starting_tiles = placed.len(),
            "new game started"
        );
    }

    /// Try again on the same board size.
    pub fn reset(&mut self) {
        self.start();
    }

    /// Slide and merge toward `direction`, spawn a tile if the board
    /// changed, then check for game over.
    ///
    /// A request arriving while the previous move is still settling - or
    /// after the game has ended - is a silent no-op returning an all-zero
    /// result: no error, no state change, no spawn.
    pub fn move_tiles(&mut self, direction: Direction) -> MoveResult {
        if self.settling || self.game_over {
            return MoveResult::default();
        }

        let mut result = engine::apply_move(&mut self.grid, direction);
        self.score += result.score_delta;

        // The win flag is sticky: only the first goal merge of the session
        // reports a win.
        if result.won {
            if self.won {
                result.won = false;
            } else {
                self.won = true;
                info!(score = self.score, "goal tile reached");
            }
        }

        if result.moved() {
            self.settling = true;
            spawn::spawn_tile(&mut self.grid, &mut self.rng);

            // Only a spawn onto a filling board can end the game, so the
            // check belongs after it.
            if terminal::is_terminal(&self.grid) {
                self.game_over = true;
                self.clock.pause();
                info!(score = self.score, "game over, no moves remain");
            }
        }

        debug!(
            %direction,
            moved = result.tiles_moved,
            points = result.score_delta,
            "move applied"
        );
        result
    }

    /// Acknowledge that the previous move has visually settled, unblocking
    /// the next move request.
    pub fn acknowledge_settled(&mut self) {
        self.settling = false;
    }

    /// Whether a move is awaiting its settling acknowledgment.
    #[inline]
    pub fn is_settling(&self) -> bool {
        self.settling
    }

    /// Current score.
    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Whether the goal value has been reached this session.
    #[inline]
    pub fn is_won(&self) -> bool {
        self.won
    }

    /// Whether no legal move remains.
    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The board.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Board side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    /// Play time so far.
    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    /// Stop the play clock (game paused).
    pub fn pause(&mut self) {
        self.clock.pause();
    }

    /// Resume the play clock.
    pub fn resume(&mut self) {
        if !self.game_over {
            self.clock.resume();
        }
    }

    /// Replace the whole session state with saved contents: cell values
    /// keyed by location (0 or missing = empty), a score, and elapsed time.
    ///
    /// Out-of-bounds cells are dropped. Game-over is recomputed from the
    /// restored board; the settling guard is cleared.
    pub fn load(&mut self, cells: &BTreeMap<Location, u32>, score: u32, elapsed: Duration) {
        self.grid.clear();
        for (&location, &value) in cells {
            if value != 0 && self.grid.is_valid(location) {
                self.grid.place(Tile::new(value, location));
            }
        }
        self.score = score;
        self.settling = false;
        self.game_over = terminal::is_terminal(&self.grid);
        self.clock.set(elapsed);
        info!(
            score,
            tiles = self.grid.tile_count(),
            "session state loaded"
        );
    }

    /// Save this session into its grid size's slot.
    pub fn save_to(&self, store: &SessionStore) -> Result<(), StoreError> {
        store.save(&self.grid, self.score, self.elapsed())
    }

    /// Restore this session from its grid size's slot.
    ///
    /// Returns false - leaving the session untouched - when there is
    /// nothing to restore.
    pub fn restore_from(&mut self, store: &SessionStore) -> bool {
        match store.restore(self.size()) {
            Some(saved) => {
                let elapsed = saved.elapsed();
                let score = saved.score;
                self.load(&saved.tile_values(), score, elapsed);
                true
            }
            None => false,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Load an exact 4x4 board into a session, row-major, 0 = empty.
    fn load_rows(session: &mut GameSession, rows: [[u32; 4]; 4], score: u32) {
        let mut cells = BTreeMap::new();
        for (y, row) in rows.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                cells.insert(Location::new(x as i32, y as i32), value);
            }
        }
        session.load(&cells, score, Duration::ZERO);
    }

    #[test]
    fn test_start_places_opening_tiles() {
        let mut session = GameSession::new(4, 42);
        assert_eq!(session.grid().tile_count(), 0);

        session.start();
        let count = session.grid().tile_count();
        assert!((1..=2).contains(&count));
        assert_eq!(session.score(), 0);
        assert!(!session.is_won());
        assert!(!session.is_game_over());
    }

    #[test]
    fn test_move_accumulates_score_and_spawns() {
        let mut session = GameSession::new(4, 1);
        load_rows(
            &mut session,
            [
                [2, 2, 0, 0],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
            ],
            0,
        );

        let result = session.move_tiles(Direction::Left);
        assert_eq!(result.score_delta, 4);
        assert_eq!(session.score(), 4);
        // Merge left one tile; the post-move spawn added another
        assert_eq!(session.grid().tile_count(), 2);
    }

    #[test]
    fn test_settling_guard_serializes_moves() {
        let mut session = GameSession::new(4, 2);
        load_rows(
            &mut session,
            [
                [2, 0, 0, 0],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
            ],
            0,
        );

        let first = session.move_tiles(Direction::Right);
        assert!(first.moved());
        assert!(session.is_settling());

        // Rejected: previous move not acknowledged yet
        let count_before = session.grid().tile_count();
        let rejected = session.move_tiles(Direction::Left);
        assert_eq!(rejected.tiles_moved, 0);
        assert_eq!(rejected.score_delta, 0);
        assert!(!rejected.won);
        assert_eq!(session.grid().tile_count(), count_before);

        session.acknowledge_settled();
        let after_ack = session.move_tiles(Direction::Left);
        assert!(after_ack.moved());
    }

    #[test]
    fn test_no_op_move_does_not_spawn_or_guard() {
        let mut session = GameSession::new(4, 3);
        load_rows(
            &mut session,
            [
                [2, 4, 8, 16],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
            ],
            0,
        );

        let result = session.move_tiles(Direction::Left);
        assert_eq!(result.tiles_moved, 0);
        assert!(!session.is_settling());
        assert_eq!(session.grid().tile_count(), 4);
    }

    #[test]
    fn test_win_reported_exactly_once() {
        let mut session = GameSession::new(4, 4);
        load_rows(
            &mut session,
            [
                [1024, 1024, 0, 0],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
            ],
            0,
        );

        let first = session.move_tiles(Direction::Left);
        assert!(first.won);
        assert!(session.is_won());
        session.acknowledge_settled();

        // A second goal merge later in the session must not retrigger
        let carried_score = session.score();
        load_rows(
            &mut session,
            [
                [1024, 1024, 0, 0],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
            ],
            carried_score,
        );
        let second = session.move_tiles(Direction::Left);
        assert!(!second.won);
        assert!(session.is_won());
    }

    #[test]
    fn test_loading_terminal_board_sets_game_over() {
        let mut session = GameSession::new(4, 5);
        load_rows(
            &mut session,
            [
                [2, 4, 2, 4],
                [4, 2, 4, 2],
                [2, 4, 2, 4],
                [4, 2, 4, 2],
            ],
            100,
        );

        assert!(session.is_game_over());

        // Moves after game over are silent no-ops
        let result = session.move_tiles(Direction::Up);
        assert_eq!(result.tiles_moved, 0);
        assert_eq!(session.score(), 100);
    }

    #[test]
    fn test_full_board_with_pair_is_still_playable() {
        let mut session = GameSession::new(4, 6);
        load_rows(
            &mut session,
            [
                [2, 4, 2, 4],
                [4, 2, 4, 2],
                [2, 4, 2, 4],
                [4, 2, 4, 4],
            ],
            0,
        );

        assert!(!session.is_game_over());
        let result = session.move_tiles(Direction::Left);
        assert!(result.moved());
    }

    #[test]
    fn test_reset_clears_session() {
        let mut session = GameSession::new(4, 7);
        load_rows(
            &mut session,
            [
                [2, 2, 0, 0],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
            ],
            0,
        );
        session.move_tiles(Direction::Left);
        assert!(session.score() > 0);

        session.reset();
        assert_eq!(session.score(), 0);
        assert!(!session.is_won());
        assert!(!session.is_game_over());
        assert!((1..=2).contains(&session.grid().tile_count()));
    }

    #[test]
    fn test_load_restores_elapsed_time() {
        let mut session = GameSession::new(4, 8);
        session.load(&BTreeMap::new(), 0, Duration::from_secs(90));
        assert!(session.elapsed() >= Duration::from_secs(90));
    }

    #[test]
    fn test_session_save_restore_round_trip() {
        let dir = std::env::temp_dir().join(format!("twenty48-session-rt-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let store = SessionStore::new(dir);

        let mut session = GameSession::new(4, 9);
        load_rows(
            &mut session,
            [
                [2, 0, 0, 4],
                [0, 128, 0, 0],
                [0, 0, 0, 0],
                [16, 0, 0, 2],
            ],
            640,
        );
        session.save_to(&store).unwrap();

        let mut restored = GameSession::new(4, 77);
        assert!(restored.restore_from(&store));
        assert_eq!(restored.score(), 640);

        let saved_tiles: Vec<_> = session.grid().tiles().map(|t| (t.location, t.value)).collect();
        let restored_tiles: Vec<_> = restored
            .grid()
            .tiles()
            .map(|t| (t.location, t.value))
            .collect();
        assert_eq!(saved_tiles, restored_tiles);

        // A different grid size has its own slot, still empty here
        let mut other = GameSession::new(5, 1);
        assert!(!other.restore_from(&store));
    }

    #[test]
    fn test_identical_seeds_replay_identically() {
        let directions = [
            Direction::Left,
            Direction::Up,
            Direction::Right,
            Direction::Down,
            Direction::Left,
            Direction::Down,
        ];

        let mut a = GameSession::new(4, 2024);
        let mut b = GameSession::new(4, 2024);
        a.start();
        b.start();

        for dir in directions {
            a.move_tiles(dir);
            b.move_tiles(dir);
            a.acknowledge_settled();
            b.acknowledge_settled();
        }

        assert_eq!(a.score(), b.score());
        let tiles_a: Vec<_> = a.grid().tiles().copied().collect();
        let tiles_b: Vec<_> = b.grid().tiles().copied().collect();
        assert_eq!(tiles_a, tiles_b);
    }

    proptest! {
        #[test]
        fn prop_structural_invariants_survive_any_game(
            seed in any::<u64>(),
            dirs in proptest::collection::vec(0u8..4, 0..60),
        ) {
            let mut session = GameSession::new(4, seed);
            session.start();

            let mut score_from_deltas = 0u32;
            for d in dirs {
                let result = session.move_tiles(Direction::ALL[d as usize]);
                score_from_deltas += result.score_delta;
                session.acknowledge_settled();

                // The grid is always exactly N x N cells
                prop_assert_eq!(session.grid().cell_count(), 16);
                // Every occupied cell holds a positive power of two
                for tile in session.grid().tiles() {
                    prop_assert!(tile.value >= 2);
                    prop_assert!(tile.value.is_power_of_two());
                    prop_assert!(!tile.merged);
                    prop_assert_eq!(
                        session.grid().tile_at(tile.location).copied(),
                        Some(*tile)
                    );
                }
            }

            // The running score is exactly the sum of the move deltas
            prop_assert_eq!(session.score(), score_from_deltas);
        }
    }
}
