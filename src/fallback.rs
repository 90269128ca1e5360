// ABOUTME: Fallback recipe generation when the upstream call or parsing fails
// ABOUTME: Always produces a structurally valid Recipe; this path never fails
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Recipe Genie

//! Fallback recipe generation.
//!
//! When the model call fails or its output cannot be parsed, the service
//! degrades to a locally generated recipe built from the normalized request.
//! The result always satisfies the recipe invariant: non-empty name, at
//! least one ingredient drawn from the request, at least one instruction.

use crate::models::{Difficulty, Nutrition, Recipe, RecipeIngredient};
use crate::normalizer::NormalizedRequest;

/// Identifier stamped into recipes produced by this module
pub const FALLBACK_MODEL_ID: &str = "fallback";

/// Maximum ingredients named in the generated recipe title
const NAME_INGREDIENT_LIMIT: usize = 3;

/// Build an always-valid fallback recipe from the original request
#[must_use]
pub fn fallback_recipe(request: &NormalizedRequest) -> Recipe {
    let ingredients: Vec<RecipeIngredient> = request
        .ingredients
        .iter()
        .map(|name| RecipeIngredient {
            name: name.clone(),
            quantity: Some("to taste".to_owned()),
            unit: None,
            notes: None,
        })
        .collect();

    let main_ingredients = request.ingredients.join(", ");

    Recipe {
        name: fallback_name(&request.ingredients),
        description: "A simple home-style dish using your ingredients. \
                      Generated locally because the AI chef was unavailable."
            .to_owned(),
        prep_time: 15,
        cook_time: 25,
        total_time: 40,
        difficulty: Difficulty::Medium,
        servings: request.servings,
        instructions: vec![
            format!("Prepare {main_ingredients} by washing and chopping as needed."),
            "Heat oil in a pan and add aromatics such as onion or garlic if available."
                .to_owned(),
            format!("Add {main_ingredients} and cook until done."),
            "Season with salt and pepper to taste.".to_owned(),
            "Serve hot and enjoy!".to_owned(),
        ],
        tips: vec![
            "Feel free to adjust seasoning according to your taste.".to_owned(),
            "Fresh herbs can elevate the flavor significantly.".to_owned(),
        ],
        equipment_needed: Vec::new(),
        nutrition: Nutrition::default(),
        ingredients,
        model_used: FALLBACK_MODEL_ID.to_owned(),
        generated_at: chrono::Utc::now(),
    }
}

/// Derive a recipe name from the first few ingredients
fn fallback_name(ingredients: &[String]) -> String {
    let mut listed: Vec<String> = ingredients
        .iter()
        .take(NAME_INGREDIENT_LIMIT)
        .map(|i| title_case(i))
        .collect();
    if ingredients.len() > NAME_INGREDIENT_LIMIT {
        listed.push("More".to_owned());
    }
    format!("Simple {} Skillet", listed.join(" & "))
}

/// Uppercase the first letter of each word
fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
