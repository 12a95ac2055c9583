//! Math Adventure - a browser arithmetic practice game
//!
//! Core modules:
//! - `game`: Deterministic game logic (problems, session state machine)
//! - `highscore`: Persisted best score (LocalStorage on web)
//! - `settings`: Player preferences
//! - `audio`: Procedural Web Audio sound effects (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod game;
pub mod highscore;
pub mod settings;

pub use game::{GameEvent, Op, Phase, Problem, Session};
pub use highscore::HighScore;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Consecutive correct answers required to advance a level
    pub const STREAK_FOR_LEVEL_UP: u32 = 10;
    /// Highest difficulty level (levels clamp here)
    pub const MAX_LEVEL: u8 = 4;
    /// Lives cap (the level-up bonus can't exceed this)
    pub const MAX_LIVES: u8 = 5;
    /// Lives at the start of a session
    pub const STARTING_LIVES: u8 = 3;
    /// Minimum difference between subtraction operands
    pub const MIN_GAP: i32 = 5;

    /// Pause before the next problem is shown after feedback (ms)
    pub const FEEDBACK_DELAY_MS: i32 = 1500;
}
