//! Deterministic game logic module
//!
//! All gameplay rules live here. This module must be pure and deterministic:
//! - Seeded RNG only, injected by the caller
//! - No rendering, storage or platform dependencies
//! - Every transition runs to completion before the next input

pub mod problem;
pub mod state;
pub mod transition;

pub use problem::{Op, Problem, Tier, generate_problem, tier_for_level};
pub use state::{GameEvent, Phase, Session};
pub use transition::SubmitOutcome;
