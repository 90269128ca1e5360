// ABOUTME: Domain model for recipes and the generation request wire format
// ABOUTME: All wire types serialize with snake_case field names per the API contract
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Recipe Genie

//! Recipe domain model and API request types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw generation request as received from the web client
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GenerateRecipeRequest {
    /// Comma-separated free-text ingredient list
    #[serde(default)]
    pub ingredients: String,
    /// Requested cuisine, or "any"
    #[serde(default)]
    pub cuisine: Option<String>,
    /// Requested meal type, or "any"
    #[serde(default)]
    pub meal_type: Option<String>,
    /// Dietary restriction, or "none"
    #[serde(default)]
    pub dietary: Option<String>,
    /// Number of servings; clamped to 1-20, defaults to 4
    #[serde(default)]
    pub servings: Option<u32>,
}

/// Recipe difficulty rating
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Suitable for novice cooks
    Easy,
    /// Some technique required
    #[default]
    Medium,
    /// Advanced technique or timing
    Hard,
}

impl Difficulty {
    /// Parse a difficulty rating from loose model output ("Easy", "MEDIUM", ...)
    #[must_use]
    pub fn from_loose(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Medium => write!(f, "medium"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

/// A single ingredient line in a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    /// Ingredient name
    pub name: String,
    /// Amount, free text ("2", "1/2", "to taste")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    /// Measurement unit ("cups", "g")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Preparation notes ("finely chopped")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl RecipeIngredient {
    /// Ingredient with a name only
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: None,
            unit: None,
            notes: None,
        }
    }
}

/// Per-serving nutrition estimate; every field is optional
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nutrition {
    /// Calories per serving
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
    /// Protein in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<u32>,
    /// Carbohydrates in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs: Option<u32>,
    /// Fat in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat: Option<u32>,
}

/// A fully validated recipe
///
/// Invariant: `name` is non-empty and both `ingredients` and `instructions`
/// contain at least one entry. The parser rejects model output that cannot
/// satisfy this, and the fallback generator always satisfies it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe name
    pub name: String,
    /// Short appetizing description
    pub description: String,
    /// Preparation time in minutes
    pub prep_time: u32,
    /// Cooking time in minutes
    pub cook_time: u32,
    /// Total time in minutes
    pub total_time: u32,
    /// Difficulty rating
    pub difficulty: Difficulty,
    /// Number of servings
    pub servings: u32,
    /// Ingredient lines
    pub ingredients: Vec<RecipeIngredient>,
    /// Ordered preparation steps, numbering stripped
    pub instructions: Vec<String>,
    /// Chef tips, may be empty
    pub tips: Vec<String>,
    /// Equipment needed, may be empty
    pub equipment_needed: Vec<String>,
    /// Nutrition estimate
    pub nutrition: Nutrition,
    /// Identifier of the model (or fallback) that produced this recipe
    pub model_used: String,
    /// Generation timestamp
    pub generated_at: DateTime<Utc>,
}
