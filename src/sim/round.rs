//! Round state machine
//!
//! Owns the active target, the player's progress and the difficulty curve.
//! Every operation runs to completion synchronously; a failed call leaves
//! the machine exactly as it was.

use super::generator::SequenceGenerator;
use super::state::{
    Difficulty, GameEvent, RoundPhase, RoundProgress, SubmissionOutcome, TargetSequence,
};
use crate::consts::MAX_PENDING_EVENTS;
use crate::error::{ConfigError, GameError, Result};
use crate::ingredient::{Ingredient, IngredientCatalog};
use crate::settings::{MismatchPolicy, Settings};

/// Drives rounds of the stacking game
#[derive(Debug, Clone)]
pub struct RoundStateMachine {
    settings: Settings,
    catalog: IngredientCatalog,
    generator: SequenceGenerator,
    phase: RoundPhase,
    target: Option<TargetSequence>,
    progress: RoundProgress,
    /// Signals not yet drained by the presentation layer, capped at
    /// `MAX_PENDING_EVENTS` (oldest dropped first)
    events: Vec<GameEvent>,
}

impl RoundStateMachine {
    /// Create an idle machine, seeding the generator from settings
    pub fn new(settings: Settings, catalog: IngredientCatalog) -> Result<Self> {
        let generator = match settings.seed {
            Some(seed) => SequenceGenerator::from_seed(seed),
            None => SequenceGenerator::from_entropy(),
        };
        Self::with_generator(settings, catalog, generator)
    }

    /// Create an idle machine around an existing generator
    pub fn with_generator(
        settings: Settings,
        catalog: IngredientCatalog,
        generator: SequenceGenerator,
    ) -> Result<Self> {
        settings.validate()?;
        if let Some(bracket) = settings.bracket {
            catalog.entry(bracket.start)?;
            catalog.entry(bracket.end)?;
        }
        let generator =
            generator.allow_bracket_ingredient_in_body(settings.allow_bracket_ingredient_in_body);
        let progress = RoundProgress::new(Self::initial_difficulty(&settings));
        Ok(Self {
            settings,
            catalog,
            generator,
            phase: RoundPhase::Idle,
            target: None,
            progress,
            events: Vec::new(),
        })
    }

    fn initial_difficulty(settings: &Settings) -> Difficulty {
        Difficulty::new(settings.initial_min_length, settings.initial_max_length)
    }

    // === Accessors ===

    /// Current lifecycle phase
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Cumulative score across completed rounds
    pub fn score(&self) -> u64 {
        self.progress.score
    }

    /// Body length bounds for the next generated target
    pub fn difficulty(&self) -> Difficulty {
        self.progress.difficulty
    }

    /// Index, score, difficulty and counters in one view
    pub fn progress(&self) -> &RoundProgress {
        &self.progress
    }

    /// Rules the machine was built with
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Catalog submissions are validated against
    pub fn catalog(&self) -> &IngredientCatalog {
        &self.catalog
    }

    /// Length of the active target (bracket included)
    pub fn target_len(&self) -> Option<usize> {
        self.target.as_ref().map(TargetSequence::len)
    }

    /// Ingredient the player must stack next
    pub fn expected_next(&self) -> Option<Ingredient> {
        if self.phase != RoundPhase::InProgress {
            return None;
        }
        self.target.as_ref()?.get(self.progress.index)
    }

    /// Target layers shown so far: matched layers plus the next expected one
    pub fn revealed(&self) -> &[Ingredient] {
        let Some(target) = &self.target else {
            return &[];
        };
        let layers = target.as_slice();
        match self.phase {
            RoundPhase::InProgress => &layers[..(self.progress.index + 1).min(layers.len())],
            RoundPhase::RoundComplete => layers,
            RoundPhase::Idle | RoundPhase::GameComplete => &[],
        }
    }

    /// Take all pending signals, oldest first.
    ///
    /// Hosts should drain once per tick. Undrained signals are kept up to
    /// `MAX_PENDING_EVENTS`, after which the oldest are dropped.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Signals emitted since the last drain
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    fn emit(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    // === Round lifecycle ===

    fn require_phase(&self, operation: &'static str, allowed: &[RoundPhase]) -> Result<()> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(GameError::InvalidState {
                operation,
                phase: self.phase,
            })
        }
    }

    fn generate_target(&mut self, difficulty: Difficulty) -> Result<TargetSequence> {
        let length = self.generator.sample_length(difficulty)?;
        self.generator
            .generate(length, &self.catalog, self.settings.bracket)
    }

    /// Install a target and reveal its first layer
    fn begin(&mut self, target: TargetSequence) -> Result<Ingredient> {
        let first = target.first().ok_or(ConfigError::ZeroLength)?;
        log::info!(
            "Round {} started: {} layers, first {}",
            self.progress.rounds_completed + 1,
            target.len(),
            first
        );
        self.emit(GameEvent::RoundStarted {
            first_ingredient: first,
            length: target.len(),
        });
        self.target = Some(target);
        self.progress.index = 0;
        self.progress.mismatches = 0;
        self.phase = RoundPhase::InProgress;
        Ok(first)
    }

    /// Generate a target within the current difficulty bounds and start
    /// matching it. Returns the first expected ingredient.
    ///
    /// From `RoundComplete` the bounds have already grown for the round
    /// just finished.
    pub fn start_round(&mut self) -> Result<Ingredient> {
        self.require_phase("start a round", &[RoundPhase::Idle, RoundPhase::RoundComplete])?;
        let target = self.generate_target(self.progress.difficulty)?;
        self.begin(target)
    }

    /// Start a round with a prepared target (tutorials, replays)
    pub fn start_round_with(&mut self, target: TargetSequence) -> Result<Ingredient> {
        self.require_phase("start a round", &[RoundPhase::Idle, RoundPhase::RoundComplete])?;
        if target.is_empty() {
            return Err(ConfigError::ZeroLength.into());
        }
        for &layer in target.as_slice() {
            self.catalog.entry(layer)?;
        }
        self.begin(target)
    }

    /// Judge one stacked ingredient against the target
    pub fn submit(&mut self, ingredient: Ingredient) -> Result<SubmissionOutcome> {
        self.require_phase("submit", &[RoundPhase::InProgress])?;
        if !self.catalog.contains(ingredient) {
            return Err(GameError::InvalidInput { ingredient });
        }
        let index = self.progress.index;
        let Some(expected) = self.target.as_ref().and_then(|t| t.get(index)) else {
            return Err(GameError::InvalidState {
                operation: "submit",
                phase: self.phase,
            });
        };

        if ingredient != expected {
            return self.mismatch(ingredient, index);
        }

        self.progress.index += 1;
        let next = self.target.as_ref().and_then(|t| t.get(self.progress.index));
        if let Some(next_expected) = next {
            let outcome = SubmissionOutcome::Advanced { next_expected };
            self.emit(outcome.into());
            return Ok(outcome);
        }

        let score_delta = self.settings.score_per_round;
        self.progress.score = self.progress.score.saturating_add(score_delta);
        self.progress.rounds_completed += 1;
        self.phase = RoundPhase::RoundComplete;
        log::info!(
            "Round {} complete (+{}, score {})",
            self.progress.rounds_completed,
            score_delta,
            self.progress.score
        );
        let outcome = SubmissionOutcome::RoundCompleted { score_delta };
        self.emit(outcome.into());

        if self.advance_difficulty() == RoundPhase::GameComplete {
            return Ok(SubmissionOutcome::GameCompleted {
                final_score: self.progress.score,
            });
        }
        if self.settings.auto_advance {
            self.complete_round_and_advance_difficulty()?;
        }
        Ok(outcome)
    }

    fn mismatch(&mut self, offending: Ingredient, index: usize) -> Result<SubmissionOutcome> {
        // Generate before mutating so a failure leaves the round untouched
        let replacement = match self.settings.on_mismatch {
            MismatchPolicy::ResetRound => Some(self.generate_target(self.progress.difficulty)?),
            MismatchPolicy::PenalizeAndContinue => None,
        };

        log::debug!(
            "Mismatch at layer {}: got {} ({:?})",
            index,
            offending,
            self.settings.on_mismatch
        );
        self.progress.mismatches += 1;
        let outcome = SubmissionOutcome::Mismatched { offending, index };
        self.emit(outcome.into());

        if let Some(target) = replacement {
            self.begin(target)?;
        }
        Ok(outcome)
    }

    /// Grow the bounds for a just-completed round and end the game once
    /// the ceiling is passed. Returns the resulting phase.
    fn advance_difficulty(&mut self) -> RoundPhase {
        let difficulty = self
            .progress
            .difficulty
            .escalate(self.settings.growth_factor);
        self.progress.difficulty = difficulty;

        if difficulty.min_length > self.settings.min_length_ceiling {
            self.target = None;
            self.phase = RoundPhase::GameComplete;
            log::info!(
                "Game complete after {} rounds, final score {}",
                self.progress.rounds_completed,
                self.progress.score
            );
            self.emit(GameEvent::GameCompleted {
                final_score: self.progress.score,
            });
        } else {
            log::info!(
                "Difficulty now {}..={}",
                difficulty.min_length,
                difficulty.max_length
            );
        }
        self.phase
    }

    /// Move on from a completed round: start the next target at the bounds
    /// grown when the round completed. Runs automatically with
    /// `auto_advance`. Returns the first expected ingredient.
    pub fn complete_round_and_advance_difficulty(&mut self) -> Result<Ingredient> {
        self.require_phase("advance difficulty", &[RoundPhase::RoundComplete])?;
        let target = self.generate_target(self.progress.difficulty)?;
        self.begin(target)
    }

    /// Drop the target and all progress, back to Idle
    pub fn reset(&mut self) {
        log::info!("Game reset (score was {})", self.progress.score);
        self.target = None;
        self.progress = RoundProgress::new(Self::initial_difficulty(&self.settings));
        self.events.clear();
        self.phase = RoundPhase::Idle;
    }
}
