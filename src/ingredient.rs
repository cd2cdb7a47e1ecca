//! Ingredients and the ingredient catalog
//!
//! The catalog is the only place presentation metadata lives. The core
//! never interprets `asset` or `height`; it hands them back to the
//! presentation layer when laying out a stack.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Known stackable ingredients, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ingredient {
    Pineapple,
    Meat,
    Lettuce,
    Pickles,
    Bacon,
    Onions,
    Cheese,
    Tomatoes,
    Bread,
    // Novelty extensions, never drawn in the standard catalog
    Sword,
    Hotdog,
    Dice,
    Logo,
}

impl Ingredient {
    /// Every ingredient in catalog order
    pub const ALL: [Ingredient; 13] = [
        Ingredient::Pineapple,
        Ingredient::Meat,
        Ingredient::Lettuce,
        Ingredient::Pickles,
        Ingredient::Bacon,
        Ingredient::Onions,
        Ingredient::Cheese,
        Ingredient::Tomatoes,
        Ingredient::Bread,
        Ingredient::Sword,
        Ingredient::Hotdog,
        Ingredient::Dice,
        Ingredient::Logo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Ingredient::Pineapple => "Pineapple",
            Ingredient::Meat => "Meat",
            Ingredient::Lettuce => "Lettuce",
            Ingredient::Pickles => "Pickles",
            Ingredient::Bacon => "Bacon",
            Ingredient::Onions => "Onions",
            Ingredient::Cheese => "Cheese",
            Ingredient::Tomatoes => "Tomatoes",
            Ingredient::Bread => "Bread",
            Ingredient::Sword => "Sword",
            Ingredient::Hotdog => "Hotdog",
            Ingredient::Dice => "Dice",
            Ingredient::Logo => "Logo",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|i| i.as_str().to_lowercase() == lower)
    }

    /// Whether this is one of the novelty extensions
    pub fn is_extension(&self) -> bool {
        matches!(
            self,
            Ingredient::Sword | Ingredient::Hotdog | Ingredient::Dice | Ingredient::Logo
        )
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_drawable() -> bool {
    true
}

/// One catalog entry with opaque presentation metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub ingredient: Ingredient,
    /// Eligible for random draws in a target body
    #[serde(default = "default_drawable")]
    pub drawable: bool,
    /// Visual asset handle, owned by the presentation layer
    #[serde(default)]
    pub asset: Option<String>,
    /// Stack height of one layer
    #[serde(default)]
    pub height: f32,
}

impl CatalogEntry {
    pub fn new(ingredient: Ingredient) -> Self {
        Self {
            ingredient,
            drawable: true,
            asset: None,
            height: 0.0,
        }
    }

    pub fn with_asset(mut self, asset: impl Into<String>, height: f32) -> Self {
        self.asset = Some(asset.into());
        self.height = height;
        self
    }

    pub fn not_drawable(mut self) -> Self {
        self.drawable = false;
        self
    }
}

/// A single placed layer of a stack
#[derive(Debug, Clone, PartialEq)]
pub struct StackedLayer<'a> {
    pub ingredient: Ingredient,
    pub asset: Option<&'a str>,
    /// Height at which the bottom of this layer sits
    pub base_height: f32,
}

/// Ordered, non-empty set of ingredients the game may use
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IngredientCatalog {
    entries: Vec<CatalogEntry>,
}

impl IngredientCatalog {
    /// Build a catalog, rejecting empty or duplicated entries
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.ingredient == entry.ingredient) {
                return Err(ConfigError::DuplicateIngredient(entry.ingredient));
            }
        }
        Ok(Self { entries })
    }

    /// Catalog of bare ingredients, all drawable, no metadata
    pub fn from_ingredients(ingredients: &[Ingredient]) -> Result<Self, ConfigError> {
        Self::new(ingredients.iter().copied().map(CatalogEntry::new).collect())
    }

    /// The full ingredient set. Only the nine food ingredients are drawable.
    pub fn standard() -> Self {
        let entries = Ingredient::ALL
            .into_iter()
            .map(|ingredient| {
                let height = match ingredient {
                    Ingredient::Bread => 0.35,
                    Ingredient::Meat | Ingredient::Hotdog => 0.3,
                    Ingredient::Pineapple | Ingredient::Tomatoes | Ingredient::Onions => 0.12,
                    Ingredient::Bacon | Ingredient::Pickles => 0.08,
                    Ingredient::Lettuce | Ingredient::Cheese => 0.05,
                    Ingredient::Sword | Ingredient::Dice | Ingredient::Logo => 0.2,
                };
                let asset = format!("ingredients/{}", ingredient.as_str().to_lowercase());
                let entry = CatalogEntry::new(ingredient).with_asset(asset, height);
                if ingredient.is_extension() {
                    entry.not_drawable()
                } else {
                    entry
                }
            })
            .collect();
        Self { entries }
    }

    /// Parse a JSON array of entries
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        let catalog = Self::new(entries)?;
        log::info!("Loaded ingredient catalog ({} entries)", catalog.len());
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed catalog
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn contains(&self, ingredient: Ingredient) -> bool {
        self.entries.iter().any(|e| e.ingredient == ingredient)
    }

    /// Look up an entry. Missing ingredients are a configuration error.
    pub fn entry(&self, ingredient: Ingredient) -> Result<&CatalogEntry> {
        self.entries
            .iter()
            .find(|e| e.ingredient == ingredient)
            .ok_or_else(|| ConfigError::UnknownIngredient(ingredient).into())
    }

    /// Drawable ingredients in catalog order
    pub fn drawable(&self) -> impl Iterator<Item = Ingredient> + '_ {
        self.entries
            .iter()
            .filter(|e| e.drawable)
            .map(|e| e.ingredient)
    }

    /// Place layers bottom-up, each sitting on the summed height below it
    pub fn stack_layout(&self, layers: &[Ingredient]) -> Result<Vec<StackedLayer<'_>>> {
        let mut offset = 0.0;
        let mut placed = Vec::with_capacity(layers.len());
        for &ingredient in layers {
            let entry = self.entry(ingredient)?;
            placed.push(StackedLayer {
                ingredient,
                asset: entry.asset.as_deref(),
                base_height: offset,
            });
            offset += entry.height;
        }
        Ok(placed)
    }
}

impl Default for IngredientCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'de> Deserialize<'de> for IngredientCatalog {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let entries = Vec::<CatalogEntry>::deserialize(deserializer)?;
        Self::new(entries).map_err(serde::de::Error::custom)
    }
}
