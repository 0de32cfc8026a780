//! Twenty48 Demo
//!
//! Headless demo: plays one seeded game with random directions until it
//! ends, then persists the session and best score the way a front end
//! would on game over.

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use twenty48::{
    DeterministicRng, Direction, GameSession, RecordStore, SessionStore, DEFAULT_GRID_SIZE,
    VERSION,
};

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Twenty48 Engine v{}", VERSION);

    demo_game(12345)
}

/// Play one seeded game to the end with random directions.
fn demo_game(seed: u64) -> Result<()> {
    info!("=== Starting Demo Game ===");
    info!("RNG Seed: {}", seed);

    let mut session = GameSession::new(DEFAULT_GRID_SIZE, seed);
    session.start();

    // Independent stream for the simulated player input
    let mut input = DeterministicRng::new(seed ^ 0xD5A0_17E5);
    let mut moves = 0u32;

    for _ in 0..100_000 {
        if session.is_game_over() {
            break;
        }

        let direction = Direction::ALL[input.next_int(4) as usize];
        let result = session.move_tiles(direction);
        session.acknowledge_settled();

        if result.moved() {
            moves += 1;
        }
        if result.won {
            info!(moves, score = session.score(), "reached the goal tile");
        }
    }

    info!(
        moves,
        score = session.score(),
        elapsed = ?session.elapsed(),
        game_over = session.is_game_over(),
        "demo game finished"
    );
    info!("final board:\n{}", session.grid());

    // Persist the outcome the way a front end would on game over
    let data_dir = std::env::temp_dir().join("twenty48-demo");
    let session_store = SessionStore::new(&data_dir);
    let record_store = RecordStore::new(&data_dir);

    session.save_to(&session_store)?;
    let best = record_store.save_record(session.size(), session.score())?;
    info!(best, dir = %data_dir.display(), "session and record saved");

    Ok(())
}
