//! Deterministic game rules
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, one per generator
//! - Synchronous, call-driven; no timers or I/O
//! - No rendering, audio or platform dependencies

pub mod generator;
pub mod round;
pub mod state;

pub use generator::SequenceGenerator;
pub use round::RoundStateMachine;
pub use state::{
    Difficulty, GameEvent, RoundPhase, RoundProgress, SubmissionOutcome, TargetSequence,
};
