//! Session state and transition events
//!
//! The session owns every counter the UI renders. It is mutated only by the
//! transition functions in [`super::transition`]; the shell reads fields and
//! reacts to the returned events.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::problem::{Problem, generate_problem};
use crate::consts::STARTING_LIVES;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Accepting answers
    Playing,
    /// Terminal until an explicit reset
    GameOver,
}

/// Outcome events from a single transition, in the order they occurred.
/// Feedback text, sounds and celebration key off these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Correct { expected: i32 },
    Incorrect { expected: i32 },
    LevelUp { level: u8 },
    LevelDown { level: u8 },
    LifeGained,
    NewHighScore { score: u32 },
    GameOver,
}

/// One play session (serializable for inspection/debugging)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub score: u32,
    pub high_score: u32,
    pub lives: u8,
    /// Consecutive correct answers since the last miss
    pub streak: u32,
    pub level: u8,
    pub phase: Phase,
    /// The problem currently on screen
    pub problem: Problem,
}

impl Session {
    /// Start a new session. The high score survives from storage; everything
    /// else begins at its initial value with a level-1 problem on screen.
    pub fn new(high_score: u32, rng: &mut impl Rng) -> Self {
        Self {
            score: 0,
            high_score,
            lives: STARTING_LIVES,
            streak: 0,
            level: 1,
            phase: Phase::Playing,
            problem: generate_problem(1, rng),
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}
