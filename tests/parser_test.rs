// ABOUTME: Tests for tolerant parsing of model output into validated recipes
// ABOUTME: Covers fenced/prose-wrapped JSON, type coercion, and mandatory fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Recipe Genie

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

mod common;

use recipe_genie_server::errors::ErrorCode;
use recipe_genie_server::models::Difficulty;
use recipe_genie_server::parser::{parse_recipe, DEFAULT_COOK_TIME, DEFAULT_PREP_TIME};

#[test]
fn test_bare_fenced_and_prose_wrapped_json_parse_identically() {
    common::init_test_logging();
    let bare = common::valid_model_json();
    let fenced = format!("```json\n{bare}\n```");
    let prose = format!("Here is your recipe!\n\n{bare}\n\nEnjoy your meal.");

    let from_bare = parse_recipe(&bare, "stub-model", 4).unwrap();
    let from_fenced = parse_recipe(&fenced, "stub-model", 4).unwrap();
    let from_prose = parse_recipe(&prose, "stub-model", 4).unwrap();

    for recipe in [&from_fenced, &from_prose] {
        assert_eq!(recipe.name, from_bare.name);
        assert_eq!(recipe.servings, from_bare.servings);
        assert_eq!(recipe.ingredients, from_bare.ingredients);
        assert_eq!(recipe.instructions, from_bare.instructions);
    }
}

#[test]
fn test_minimal_object_gets_defaults() {
    common::init_test_logging();
    let raw = r#"{
        "name": "Plain Toast",
        "ingredients": ["bread"],
        "instructions": ["Toast the bread."]
    }"#;

    let recipe = parse_recipe(raw, "stub-model", 3).unwrap();
    assert_eq!(recipe.name, "Plain Toast");
    assert_eq!(recipe.description, "Not specified");
    assert_eq!(recipe.prep_time, DEFAULT_PREP_TIME);
    assert_eq!(recipe.cook_time, DEFAULT_COOK_TIME);
    assert_eq!(recipe.total_time, DEFAULT_PREP_TIME + DEFAULT_COOK_TIME);
    assert_eq!(recipe.difficulty, Difficulty::Medium);
    assert_eq!(recipe.servings, 3);
    assert_eq!(recipe.ingredients.len(), 1);
    assert_eq!(recipe.ingredients[0].name, "bread");
    assert!(recipe.tips.is_empty());
    assert!(recipe.equipment_needed.is_empty());
    assert_eq!(recipe.model_used, "stub-model");
}

#[test]
fn test_string_typed_numbers_are_coerced() {
    common::init_test_logging();
    let raw = r#"{
        "name": "Stew",
        "prep_time": "about 10 minutes",
        "cook_time": "45 min",
        "servings": "6",
        "ingredients": [{"name": "beef", "quantity": "500", "unit": "g"}],
        "instructions": ["Simmer."],
        "nutrition": {"calories": "320 kcal", "protein": "25g"}
    }"#;

    let recipe = parse_recipe(raw, "stub-model", 4).unwrap();
    assert_eq!(recipe.prep_time, 10);
    assert_eq!(recipe.cook_time, 45);
    assert_eq!(recipe.total_time, 55);
    assert_eq!(recipe.servings, 6);
    assert_eq!(recipe.nutrition.calories, Some(320));
    assert_eq!(recipe.nutrition.protein, Some(25));
}

#[test]
fn test_step_prefixes_are_stripped_from_instructions() {
    common::init_test_logging();
    let raw = r#"{
        "name": "Salad",
        "ingredients": ["lettuce"],
        "instructions": ["Step 1: Wash the lettuce.", "2. Chop it.", "3) Toss and serve.", "   "]
    }"#;

    let recipe = parse_recipe(raw, "stub-model", 2).unwrap();
    assert_eq!(
        recipe.instructions,
        vec!["Wash the lettuce.", "Chop it.", "Toss and serve."]
    );
}

#[test]
fn test_bare_string_ingredients_are_promoted() {
    common::init_test_logging();
    let raw = r#"{
        "name": "Mix",
        "ingredients": ["flour", {"name": "sugar", "quantity": "2", "unit": "tbsp"}],
        "instructions": ["Combine."]
    }"#;

    let recipe = parse_recipe(raw, "stub-model", 2).unwrap();
    assert_eq!(recipe.ingredients.len(), 2);
    assert_eq!(recipe.ingredients[0].name, "flour");
    assert_eq!(recipe.ingredients[0].quantity, None);
    assert_eq!(recipe.ingredients[1].name, "sugar");
    assert_eq!(recipe.ingredients[1].unit.as_deref(), Some("tbsp"));
}

#[test]
fn test_missing_mandatory_fields_are_rejected() {
    common::init_test_logging();
    let cases = [
        r#"{"ingredients": ["egg"], "instructions": ["Cook."]}"#,
        r#"{"name": "Empty", "ingredients": [], "instructions": ["Cook."]}"#,
        r#"{"name": "Empty", "ingredients": ["egg"], "instructions": []}"#,
    ];
    for raw in cases {
        let err = parse_recipe(raw, "stub-model", 4).unwrap_err();
        assert_eq!(err.code, ErrorCode::ParseError, "input: {raw}");
    }
}

#[test]
fn test_non_json_output_is_rejected() {
    common::init_test_logging();
    let err = parse_recipe("Sorry, I cannot help with that.", "stub-model", 4).unwrap_err();
    assert_eq!(err.code, ErrorCode::ParseError);
}

#[test]
fn test_loose_difficulty_values_map_into_enum() {
    common::init_test_logging();
    let raw = r#"{
        "name": "Omelette",
        "difficulty": "EASY",
        "ingredients": ["egg"],
        "instructions": ["Whisk and fry."]
    }"#;
    let recipe = parse_recipe(raw, "stub-model", 1).unwrap();
    assert_eq!(recipe.difficulty, Difficulty::Easy);
}
