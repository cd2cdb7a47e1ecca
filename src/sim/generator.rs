//! Target sequence generation
//!
//! The generator owns exactly one RNG, seeded once at construction and
//! threaded through every draw. Nothing else survives between calls.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Difficulty, TargetSequence};
use crate::error::{ConfigError, Result};
use crate::ingredient::{Ingredient, IngredientCatalog};
use crate::settings::Bracket;

/// Draws random target burgers
#[derive(Debug, Clone)]
pub struct SequenceGenerator {
    rng: Pcg32,
    /// Bracket ingredients may also appear in the body
    allow_bracket_ingredient_in_body: bool,
}

impl SequenceGenerator {
    /// Deterministic generator for a fixed seed
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(Pcg32::seed_from_u64(seed))
    }

    /// Generator seeded once from OS entropy
    pub fn from_entropy() -> Self {
        Self::with_rng(Pcg32::from_rng(&mut rand::rng()))
    }

    pub fn with_rng(rng: Pcg32) -> Self {
        Self {
            rng,
            allow_bracket_ingredient_in_body: true,
        }
    }

    pub fn allow_bracket_ingredient_in_body(mut self, allow: bool) -> Self {
        self.allow_bracket_ingredient_in_body = allow;
        self
    }

    /// Pick a body length uniformly from the difficulty bounds
    pub fn sample_length(&mut self, difficulty: Difficulty) -> Result<u32> {
        let Difficulty {
            min_length,
            max_length,
        } = difficulty;
        if min_length == 0 {
            return Err(ConfigError::ZeroLength.into());
        }
        if max_length < min_length {
            return Err(ConfigError::InvalidLengthRange {
                min: min_length,
                max: max_length,
            }
            .into());
        }
        Ok(self.rng.random_range(min_length..=max_length))
    }

    /// Draw `length` body layers, optionally wrapped in the bracket.
    ///
    /// The result holds `length` layers, or `length + 2` when bracketed.
    pub fn generate(
        &mut self,
        length: u32,
        catalog: &IngredientCatalog,
        bracket: Option<Bracket>,
    ) -> Result<TargetSequence> {
        if length == 0 {
            return Err(ConfigError::ZeroLength.into());
        }
        if catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog.into());
        }
        if let Some(bracket) = bracket {
            catalog.entry(bracket.start)?;
            catalog.entry(bracket.end)?;
        }

        let pool: Vec<Ingredient> = catalog
            .drawable()
            .filter(|&i| {
                self.allow_bracket_ingredient_in_body || !bracket.is_some_and(|b| b.contains(i))
            })
            .collect();
        if pool.is_empty() {
            return Err(ConfigError::EmptyDrawPool.into());
        }

        let extra = if bracket.is_some() { 2 } else { 0 };
        let mut layers = Vec::with_capacity(length as usize + extra);
        if let Some(bracket) = bracket {
            layers.push(bracket.start);
        }
        for _ in 0..length {
            layers.push(pool[self.rng.random_range(0..pool.len())]);
        }
        if let Some(bracket) = bracket {
            layers.push(bracket.end);
        }

        Ok(TargetSequence::new(layers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;
    use proptest::prelude::*;

    fn small_catalog() -> IngredientCatalog {
        IngredientCatalog::from_ingredients(&[
            Ingredient::Pineapple,
            Ingredient::Meat,
            Ingredient::Lettuce,
            Ingredient::Bread,
        ])
        .unwrap()
    }

    #[test]
    fn test_bracketed_burger() {
        let mut generator = SequenceGenerator::from_seed(12345);
        let burger = generator
            .generate(3, &small_catalog(), Some(Bracket::bun()))
            .unwrap();
        assert_eq!(burger.len(), 5);
        assert_eq!(burger.first(), Some(Ingredient::Bread));
        assert_eq!(burger.get(4), Some(Ingredient::Bread));
    }

    #[test]
    fn test_seeded_burgers_are_pinned() {
        let catalog = small_catalog();
        let burger = SequenceGenerator::from_seed(61)
            .generate(3, &catalog, Some(Bracket::bun()))
            .unwrap();
        assert_eq!(
            burger.as_slice(),
            &[
                Ingredient::Bread,
                Ingredient::Meat,
                Ingredient::Pineapple,
                Ingredient::Lettuce,
                Ingredient::Bread,
            ]
        );

        let burger = SequenceGenerator::from_seed(12345)
            .generate(3, &catalog, Some(Bracket::bun()))
            .unwrap();
        assert_eq!(
            burger.as_slice(),
            &[
                Ingredient::Bread,
                Ingredient::Lettuce,
                Ingredient::Meat,
                Ingredient::Pineapple,
                Ingredient::Bread,
            ]
        );
    }

    #[test]
    fn test_zero_length_rejected() {
        let mut generator = SequenceGenerator::from_seed(1);
        let err = generator.generate(0, &small_catalog(), None).unwrap_err();
        assert!(matches!(
            err,
            GameError::Configuration(ConfigError::ZeroLength)
        ));
    }

    #[test]
    fn test_bracket_must_be_in_catalog() {
        let mut generator = SequenceGenerator::from_seed(1);
        let bracket = Bracket::new(Ingredient::Bread, Ingredient::Cheese);
        let err = generator
            .generate(2, &small_catalog(), Some(bracket))
            .unwrap_err();
        assert!(matches!(
            err,
            GameError::Configuration(ConfigError::UnknownIngredient(Ingredient::Cheese))
        ));
    }

    #[test]
    fn test_excluding_bracket_can_empty_pool() {
        let catalog = IngredientCatalog::from_ingredients(&[Ingredient::Bread]).unwrap();
        let mut generator = SequenceGenerator::from_seed(1).allow_bracket_ingredient_in_body(false);
        let err = generator
            .generate(2, &catalog, Some(Bracket::bun()))
            .unwrap_err();
        assert!(matches!(
            err,
            GameError::Configuration(ConfigError::EmptyDrawPool)
        ));

        // Allowed: the only choice is bread
        let mut generator = SequenceGenerator::from_seed(1);
        let burger = generator.generate(2, &catalog, Some(Bracket::bun())).unwrap();
        assert_eq!(burger.as_slice(), &[Ingredient::Bread; 4]);
    }

    #[test]
    fn test_extensions_never_drawn() {
        let catalog = IngredientCatalog::standard();
        let mut generator = SequenceGenerator::from_seed(42);
        let burger = generator.generate(500, &catalog, None).unwrap();
        assert!(burger.as_slice().iter().all(|i| !i.is_extension()));
    }

    #[test]
    fn test_sample_length_within_bounds() {
        let mut generator = SequenceGenerator::from_seed(9);
        for _ in 0..200 {
            let len = generator.sample_length(Difficulty::new(5, 10)).unwrap();
            assert!((5..=10).contains(&len));
        }
        assert!(generator.sample_length(Difficulty::new(0, 3)).is_err());
        assert!(generator.sample_length(Difficulty::new(4, 3)).is_err());
    }

    #[test]
    fn test_one_seed_many_calls_differ() {
        // Single RNG threaded through calls, not reseeded each time
        let mut generator = SequenceGenerator::from_seed(7);
        let catalog = IngredientCatalog::standard();
        let a = generator.generate(16, &catalog, None).unwrap();
        let b = generator.generate(16, &catalog, None).unwrap();
        assert_ne!(a, b);
    }

    proptest! {
        #[test]
        fn prop_length_and_membership(
            seed in any::<u64>(),
            length in 1u32..64,
            bracketed in any::<bool>(),
        ) {
            let catalog = small_catalog();
            let bracket = bracketed.then(Bracket::bun);
            let mut generator = SequenceGenerator::from_seed(seed);
            let burger = generator.generate(length, &catalog, bracket).unwrap();
            let expected = length as usize + if bracketed { 2 } else { 0 };
            prop_assert_eq!(burger.len(), expected);
            prop_assert!(burger.as_slice().iter().all(|&i| catalog.contains(i)));
        }

        #[test]
        fn prop_same_seed_same_burger(seed in any::<u64>(), length in 1u32..32) {
            let catalog = IngredientCatalog::standard();
            let a = SequenceGenerator::from_seed(seed)
                .generate(length, &catalog, Some(Bracket::bun()))
                .unwrap();
            let b = SequenceGenerator::from_seed(seed)
                .generate(length, &catalog, Some(Bracket::bun()))
                .unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_excluded_bracket_stays_out_of_body(seed in any::<u64>(), length in 1u32..32) {
            let mut generator =
                SequenceGenerator::from_seed(seed).allow_bracket_ingredient_in_body(false);
            let burger = generator
                .generate(length, &small_catalog(), Some(Bracket::bun()))
                .unwrap();
            let body = &burger.as_slice()[1..burger.len() - 1];
            prop_assert!(body.iter().all(|&i| i != Ingredient::Bread));
        }
    }
}
