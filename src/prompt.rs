// ABOUTME: Deterministic prompt rendering for recipe generation
// ABOUTME: Identical normalized input always yields byte-identical prompt text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Recipe Genie

//! Prompt construction.
//!
//! Pure function from a [`NormalizedRequest`] to the instruction payload sent
//! upstream. Determinism matters: the cache key and the prompt are both
//! derived from the same normalized request, so equal keys imply equal
//! prompts.

use crate::normalizer::NormalizedRequest;

/// Render the generation prompt for a normalized request
///
/// Embeds the ingredient list (original order), cuisine, dietary constraint,
/// meal type and servings, followed by the exact JSON output contract the
/// parser expects.
#[must_use]
pub fn build_recipe_prompt(request: &NormalizedRequest) -> String {
    let ingredients = request.ingredients.join(", ");
    let cuisine = if request.cuisine == "any" {
        "Any cuisine"
    } else {
        &request.cuisine
    };
    let dietary = if request.dietary == "none" {
        "None"
    } else {
        &request.dietary
    };
    let meal_type = if request.meal_type == "any" {
        "Any"
    } else {
        &request.meal_type
    };
    let servings = request.servings;

    format!(
        r#"You are an expert professional chef. Create a delicious recipe using these ingredients: {ingredients}

RECIPE REQUIREMENTS:
- Cuisine: {cuisine}
- Dietary: {dietary}
- Meal Type: {meal_type}
- Servings: {servings} people

GUIDELINES:
1. Use the provided ingredients as main components
2. Only add essential pantry items (oil, salt, pepper, water) if needed
3. Make instructions clear and easy to follow
4. Include professional chef tips
5. Provide nutritional estimates

Return the recipe in this EXACT JSON format:
{{
    "name": "Creative recipe name",
    "description": "Brief appetizing description",
    "prep_time": 15,
    "cook_time": 25,
    "total_time": 40,
    "difficulty": "easy|medium|hard",
    "servings": {servings},
    "ingredients": [
        {{"name": "ingredient 1", "quantity": "amount", "unit": "unit"}},
        {{"name": "ingredient 2", "quantity": "amount", "unit": "unit"}}
    ],
    "instructions": [
        "First step",
        "Second step"
    ],
    "tips": ["Tip 1", "Tip 2"],
    "equipment_needed": ["Equipment 1"],
    "nutrition": {{
        "calories": 350,
        "protein": 20,
        "carbs": 30,
        "fat": 15
    }}
}}

Return ONLY the JSON, no other text."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> NormalizedRequest {
        NormalizedRequest {
            ingredients: vec!["egg".to_owned(), "rice".to_owned()],
            cuisine: "any".to_owned(),
            meal_type: "dinner".to_owned(),
            dietary: "none".to_owned(),
            servings: 2,
        }
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(build_recipe_prompt(&request()), build_recipe_prompt(&request()));
    }

    #[test]
    fn test_prompt_embeds_request_fields() {
        let prompt = build_recipe_prompt(&request());
        assert!(prompt.contains("egg, rice"));
        assert!(prompt.contains("Any cuisine"));
        assert!(prompt.contains("Meal Type: dinner"));
        assert!(prompt.contains("Dietary: None"));
        assert!(prompt.contains("Servings: 2 people"));
    }

    #[test]
    fn test_prompt_preserves_ingredient_order() {
        let mut req = request();
        req.ingredients = vec!["rice".to_owned(), "egg".to_owned()];
        let prompt = build_recipe_prompt(&req);
        assert!(prompt.contains("rice, egg"));
    }

    #[test]
    fn test_prompt_mentions_json_contract() {
        let prompt = build_recipe_prompt(&request());
        assert!(prompt.contains("EXACT JSON format"));
        assert!(prompt.contains("equipment_needed"));
        assert!(prompt.contains("Return ONLY the JSON"));
    }
}
