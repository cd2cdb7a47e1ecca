//! Error taxonomy for the game core
//!
//! Three kinds of failure reach callers:
//! - configuration problems (bad catalog, bad lengths, unknown ingredients)
//! - rejected player input (ingredient not in the catalog)
//! - operations issued in a phase that forbids them
//!
//! None of them mutate state.

use thiserror::Error;

use crate::ingredient::Ingredient;
use crate::sim::RoundPhase;

/// Crate-wide result alias
pub type Result<T, E = GameError> = std::result::Result<T, E>;

/// Concrete configuration failure
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ingredient catalog is empty")]
    EmptyCatalog,
    #[error("sequence length must be at least 1")]
    ZeroLength,
    #[error("no catalog entry is eligible for random draws")]
    EmptyDrawPool,
    #[error("ingredient {0} is not in the catalog")]
    UnknownIngredient(Ingredient),
    #[error("ingredient {0} appears more than once in the catalog")]
    DuplicateIngredient(Ingredient),
    #[error("invalid length range {min}..={max}")]
    InvalidLengthRange { min: u32, max: u32 },
    #[error("growth factor must be at least 2 (got {0})")]
    InvalidGrowthFactor(u32),
    #[error("min length ceiling {0} can never be exceeded")]
    UnreachableCeiling(u32),
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Error returned by generator and state machine operations
#[derive(Debug, Error)]
pub enum GameError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),
    #[error("ingredient {ingredient} is not in the catalog")]
    InvalidInput { ingredient: Ingredient },
    #[error("cannot {operation} while {phase:?}")]
    InvalidState {
        operation: &'static str,
        phase: RoundPhase,
    },
}

impl GameError {
    /// True for configuration failures
    pub fn is_configuration(&self) -> bool {
        matches!(self, GameError::Configuration(_))
    }
}
