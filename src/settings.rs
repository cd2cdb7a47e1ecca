//! Game settings
//!
//! Every tunable rule lives here: difficulty curve, scoring, mismatch
//! policy, target bracketing. Loaded from JSON by the host; missing fields
//! take their defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::ingredient::Ingredient;

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyPreset {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl DifficultyPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyPreset::Easy => "Easy",
            DifficultyPreset::Normal => "Normal",
            DifficultyPreset::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(DifficultyPreset::Easy),
            "normal" | "norm" => Some(DifficultyPreset::Normal),
            "hard" => Some(DifficultyPreset::Hard),
            _ => None,
        }
    }

    /// Starting body length bounds (inclusive)
    pub fn initial_lengths(&self) -> (u32, u32) {
        match self {
            DifficultyPreset::Easy => (3, 5),
            DifficultyPreset::Normal => (INITIAL_MIN_LENGTH, INITIAL_MAX_LENGTH),
            DifficultyPreset::Hard => (8, 12),
        }
    }

    /// Hard mode throws the whole target away on a wrong layer
    pub fn mismatch_policy(&self) -> MismatchPolicy {
        match self {
            DifficultyPreset::Easy | DifficultyPreset::Normal => {
                MismatchPolicy::PenalizeAndContinue
            }
            DifficultyPreset::Hard => MismatchPolicy::ResetRound,
        }
    }
}

/// What happens when the player stacks the wrong ingredient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MismatchPolicy {
    /// Discard the target and start a fresh round at index 0
    ResetRound,
    /// Keep the target and the index; the player tries again
    #[default]
    PenalizeAndContinue,
}

/// Fixed first and last layers of every target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    pub start: Ingredient,
    pub end: Ingredient,
}

impl Bracket {
    pub fn new(start: Ingredient, end: Ingredient) -> Self {
        Self { start, end }
    }

    /// Bun on top and bottom
    pub fn bun() -> Self {
        Self::new(Ingredient::Bread, Ingredient::Bread)
    }

    pub fn contains(&self, ingredient: Ingredient) -> bool {
        self.start == ingredient || self.end == ingredient
    }
}

/// Game rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Preset the lengths and policy were derived from
    pub preset: DifficultyPreset,

    // === Difficulty curve ===
    /// Minimum body length of the first round
    pub initial_min_length: u32,
    /// Maximum body length of the first round
    pub initial_max_length: u32,
    /// Min bound multiplier per completed round
    pub growth_factor: u32,
    /// Game completes once the min bound exceeds this
    pub min_length_ceiling: u32,

    // === Scoring ===
    pub score_per_round: u64,

    // === Rules ===
    pub on_mismatch: MismatchPolicy,
    pub bracket: Option<Bracket>,
    /// Bracket ingredients may also be drawn for interior layers
    pub allow_bracket_ingredient_in_body: bool,
    /// Start the next round as soon as one completes
    pub auto_advance: bool,

    /// Fixed RNG seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preset: DifficultyPreset::Normal,

            initial_min_length: INITIAL_MIN_LENGTH,
            initial_max_length: INITIAL_MAX_LENGTH,
            growth_factor: GROWTH_FACTOR,
            min_length_ceiling: MIN_LENGTH_CEILING,

            score_per_round: SCORE_PER_ROUND,

            on_mismatch: MismatchPolicy::PenalizeAndContinue,
            bracket: Some(Bracket::bun()),
            allow_bracket_ingredient_in_body: true,
            auto_advance: true,

            seed: None,
        }
    }
}

impl Settings {
    /// Create settings from a difficulty preset
    pub fn from_preset(preset: DifficultyPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a preset (updates preset-dependent fields)
    pub fn apply_preset(&mut self, preset: DifficultyPreset) {
        self.preset = preset;
        let (min, max) = preset.initial_lengths();
        self.initial_min_length = min;
        self.initial_max_length = max;
        self.on_mismatch = preset.mismatch_policy();
    }

    /// Check the rules are playable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_min_length == 0 {
            return Err(ConfigError::ZeroLength);
        }
        if self.initial_max_length < self.initial_min_length {
            return Err(ConfigError::InvalidLengthRange {
                min: self.initial_min_length,
                max: self.initial_max_length,
            });
        }
        // Below 2 the min bound stops growing and the game never ends
        if self.growth_factor < 2 {
            return Err(ConfigError::InvalidGrowthFactor(self.growth_factor));
        }
        // The min bound saturates at u32::MAX and can never pass it
        if self.min_length_ceiling == u32::MAX {
            return Err(ConfigError::UnreachableCeiling(self.min_length_ceiling));
        }
        Ok(())
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!(
            "Loaded settings ({}, lengths {}..={}, {:?})",
            settings.preset.as_str(),
            settings.initial_min_length,
            settings.initial_max_length,
            settings.on_mismatch
        );
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.initial_min_length, 5);
        assert_eq!(settings.initial_max_length, 10);
        assert_eq!(settings.bracket, Some(Bracket::bun()));
        assert_eq!(settings.on_mismatch, MismatchPolicy::PenalizeAndContinue);
    }

    #[test]
    fn test_hard_preset_resets_rounds() {
        let settings = Settings::from_preset(DifficultyPreset::Hard);
        assert_eq!(settings.on_mismatch, MismatchPolicy::ResetRound);
        assert_eq!(settings.initial_min_length, 8);
        assert_eq!(DifficultyPreset::from_str("HARD"), Some(DifficultyPreset::Hard));
        assert_eq!(DifficultyPreset::from_str("nightmare"), None);
    }

    #[test]
    fn test_validate_rejects_bad_ranges() {
        let mut settings = Settings::default();
        settings.initial_min_length = 0;
        assert!(matches!(settings.validate(), Err(ConfigError::ZeroLength)));

        settings.initial_min_length = 6;
        settings.initial_max_length = 4;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidLengthRange { min: 6, max: 4 })
        ));

        settings.initial_max_length = 6;
        settings.growth_factor = 0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidGrowthFactor(0))
        ));
    }

    #[test]
    fn test_validate_rejects_endless_curves() {
        let settings = Settings {
            growth_factor: 1,
            ..Settings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidGrowthFactor(1)));
        assert_eq!(err.to_string(), "growth factor must be at least 2 (got 1)");

        let settings = Settings {
            min_length_ceiling: u32::MAX,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::UnreachableCeiling(u32::MAX))
        ));

        assert!(matches!(
            Settings::from_json(r#"{"growth_factor": 1}"#),
            Err(ConfigError::InvalidGrowthFactor(1))
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings =
            Settings::from_json(r#"{"on_mismatch": "ResetRound", "seed": 7, "bracket": null}"#)
                .unwrap();
        assert_eq!(settings.on_mismatch, MismatchPolicy::ResetRound);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.bracket, None);
        assert_eq!(settings.score_per_round, SCORE_PER_ROUND);
    }

    #[test]
    fn test_json_round_trip_keeps_rules() {
        let settings = Settings::from_preset(DifficultyPreset::Easy);
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(matches!(
            Settings::from_json(r#"{"initial_min_length": 9, "initial_max_length": 2}"#),
            Err(ConfigError::InvalidLengthRange { .. })
        ));
        assert!(matches!(
            Settings::from_json("{"),
            Err(ConfigError::Parse(_))
        ));
    }
}
