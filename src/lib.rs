//! Burger Stack - a stack-matching arcade game core
//!
//! Core modules:
//! - `sim`: Target generation and the round state machine
//! - `ingredient`: Ingredients and the catalog with presentation metadata
//! - `settings`: Data-driven game rules
//! - `error`: Error taxonomy

pub mod error;
pub mod ingredient;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, GameError, Result};
pub use ingredient::{CatalogEntry, Ingredient, IngredientCatalog, StackedLayer};
pub use settings::{Bracket, DifficultyPreset, MismatchPolicy, Settings};
pub use sim::{GameEvent, RoundPhase, RoundStateMachine, SequenceGenerator, SubmissionOutcome};

/// Game rule defaults
pub mod consts {
    /// Body length bounds of the first round
    pub const INITIAL_MIN_LENGTH: u32 = 5;
    pub const INITIAL_MAX_LENGTH: u32 = 10;

    /// Min length multiplier per completed round
    pub const GROWTH_FACTOR: u32 = 2;
    /// The game is won once the min length passes this
    pub const MIN_LENGTH_CEILING: u32 = 16;

    /// Points for a fully matched burger
    pub const SCORE_PER_ROUND: u64 = 100;

    /// Undrained signals kept before the oldest are dropped
    pub const MAX_PENDING_EVENTS: usize = 256;
}
