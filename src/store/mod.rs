//! Persistence Collaborators
//!
//! Filesystem-backed JSON stores, kept deliberately outside the move path:
//! the session controller invokes them on explicit save/restore/game-over
//! events only. Each grid size owns its own save slot, so a 4x4 session and
//! a 5x5 session never overwrite each other.
//!
//! Missing or unreadable slots are "nothing to restore", never a fatal
//! error; individually malformed values degrade to an empty cell or a zero
//! score so a restored game stays playable.

pub mod record;
pub mod session;

// Re-export key types
pub use record::RecordStore;
pub use session::{SavedSession, SessionStore};

/// Persistence failures surfaced to the caller.
///
/// Only the save path reports errors; restore paths translate every failure
/// into "nothing to restore".
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Slot file could not be read or written.
    #[error("save slot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Slot contents could not be encoded.
    #[error("save slot encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}
