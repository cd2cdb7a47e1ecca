//! Round state and signal types
//!
//! Everything the state machine mutates is collected in `RoundProgress`.

use serde::{Deserialize, Serialize};

use crate::ingredient::Ingredient;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// No active target
    Idle,
    /// Target active, player stacking
    InProgress,
    /// Target fully matched, waiting for the next round
    RoundComplete,
    /// Difficulty ceiling passed, game over until reset
    GameComplete,
}

/// One round's goal. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSequence(Vec<Ingredient>);

impl TargetSequence {
    pub fn new(layers: Vec<Ingredient>) -> Self {
        Self(layers)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Ingredient> {
        self.0.get(index).copied()
    }

    pub fn first(&self) -> Option<Ingredient> {
        self.0.first().copied()
    }

    pub fn as_slice(&self) -> &[Ingredient] {
        &self.0
    }
}

/// Inclusive body length bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    pub min_length: u32,
    pub max_length: u32,
}

impl Difficulty {
    pub fn new(min_length: u32, max_length: u32) -> Self {
        Self {
            min_length,
            max_length,
        }
    }

    /// Next bounds: min scaled by `factor`, max one above it. Neither bound
    /// ever decreases.
    pub fn escalate(self, factor: u32) -> Self {
        let min_length = self.min_length.saturating_mul(factor).max(self.min_length);
        let max_length = min_length.saturating_add(1).max(self.max_length);
        Self {
            min_length,
            max_length,
        }
    }
}

/// Mutable player progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundProgress {
    /// Next position to fill in the target
    pub index: usize,
    /// Cumulative score, never decreases
    pub score: u64,
    pub difficulty: Difficulty,
    /// Wrong layers stacked this round
    pub mismatches: u32,
    pub rounds_completed: u32,
}

impl RoundProgress {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            index: 0,
            score: 0,
            difficulty,
            mismatches: 0,
            rounds_completed: 0,
        }
    }
}

/// Effect of one submitted ingredient
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Advanced { next_expected: Ingredient },
    Mismatched { offending: Ingredient, index: usize },
    RoundCompleted { score_delta: u64 },
    GameCompleted { final_score: u64 },
}

/// Signals for the presentation layer (audio, visuals, HUD)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    RoundStarted { first_ingredient: Ingredient, length: usize },
    Advanced { next_expected: Ingredient },
    Mismatched { offending: Ingredient, index: usize },
    RoundCompleted { score_delta: u64 },
    GameCompleted { final_score: u64 },
}

impl From<SubmissionOutcome> for GameEvent {
    fn from(outcome: SubmissionOutcome) -> Self {
        match outcome {
            SubmissionOutcome::Advanced { next_expected } => GameEvent::Advanced { next_expected },
            SubmissionOutcome::Mismatched { offending, index } => {
                GameEvent::Mismatched { offending, index }
            }
            SubmissionOutcome::RoundCompleted { score_delta } => {
                GameEvent::RoundCompleted { score_delta }
            }
            SubmissionOutcome::GameCompleted { final_score } => {
                GameEvent::GameCompleted { final_score }
            }
        }
    }
}
