// ABOUTME: Parser turning untrusted model text into a validated Recipe
// ABOUTME: Prefers partial recovery with documented defaults over outright failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Recipe Genie

//! Model response parsing.
//!
//! The upstream model is asked for a single JSON object but frequently wraps
//! it in prose or code fences, renders numbers as strings ("15 minutes",
//! "~350 kcal"), or omits optional fields. This module locates the first
//! valid JSON object, coerces every expected field with a documented default,
//! and fails with `ParseError` only when the mandatory fields (a non-empty
//! name, one ingredient, one instruction) cannot be recovered.

use crate::errors::{AppError, AppResult};
use crate::models::{Difficulty, Nutrition, Recipe, RecipeIngredient};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::debug;

/// Default preparation time in minutes when the model omits it
pub const DEFAULT_PREP_TIME: u32 = 15;
/// Default cooking time in minutes when the model omits it
pub const DEFAULT_COOK_TIME: u32 = 25;

/// Leading "Step N:" / "Step N." / "3." / "3)" markers on instruction lines
static STEP_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a compile-time constant
    Regex::new(r"(?i)^\s*(?:step\s*\d+\s*[:.\-]\s*|\d+\s*[.)]\s+)").unwrap()
});

/// Parse raw model output into a validated [`Recipe`]
///
/// `model_used` is stamped into the result; `default_servings` fills in when
/// the model omits or mangles the servings field.
///
/// # Errors
///
/// Returns [`AppError::parse`] when no JSON object can be located or when the
/// mandatory fields cannot be recovered. Missing optional fields never cause
/// failure.
pub fn parse_recipe(raw: &str, model_used: &str, default_servings: u32) -> AppResult<Recipe> {
    let value = extract_json(raw)?;
    let object = value
        .as_object()
        .ok_or_else(|| AppError::parse("model output is JSON but not an object"))?;

    let name = object
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::parse("recipe name missing from model output"))?
        .to_owned();

    let ingredients = coerce_ingredients(object.get("ingredients"));
    if ingredients.is_empty() {
        return Err(AppError::parse("no usable ingredient in model output"));
    }

    let instructions = coerce_instructions(object.get("instructions"));
    if instructions.is_empty() {
        return Err(AppError::parse("no usable instruction in model output"));
    }

    let prep_time = coerce_minutes(object.get("prep_time")).unwrap_or(DEFAULT_PREP_TIME);
    let cook_time = coerce_minutes(object.get("cook_time")).unwrap_or(DEFAULT_COOK_TIME);
    // Saturate: the model is free to claim absurd times and must not be
    // able to overflow the sum
    let total_time = coerce_minutes(object.get("total_time"))
        .unwrap_or_else(|| prep_time.saturating_add(cook_time));

    let difficulty = object
        .get("difficulty")
        .and_then(Value::as_str)
        .and_then(Difficulty::from_loose)
        .unwrap_or_default();

    let servings = object
        .get("servings")
        .and_then(coerce_u32)
        .unwrap_or(default_servings);

    let description = object
        .get("description")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or("Not specified")
        .to_owned();

    debug!(name = %name, ingredients = ingredients.len(), "parsed recipe from model output");

    Ok(Recipe {
        name,
        description,
        prep_time,
        cook_time,
        total_time,
        difficulty,
        servings,
        ingredients,
        instructions,
        tips: coerce_string_list(object.get("tips")),
        equipment_needed: coerce_string_list(object.get("equipment_needed")),
        nutrition: coerce_nutrition(object.get("nutrition")),
        model_used: model_used.to_owned(),
        generated_at: chrono::Utc::now(),
    })
}

/// Locate the first syntactically valid JSON object in model output
///
/// Tries, in order: the whole response, the widest `{..}` span, and the body
/// of a code fence (with or without a `json` tag).
fn extract_json(response: &str) -> AppResult<Value> {
    let trimmed = response.trim();

    // First try: the whole response is JSON
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Ok(value);
    }

    // Second try: widest brace span in the response
    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            if let Ok(value) = serde_json::from_str::<Value>(&trimmed[start..=end]) {
                return Ok(value);
            }
        }
    }

    // Third try: fenced block; the brace-span pass above already handles the
    // common ```json case, this covers fences with noise between them
    if let Some(fence_start) = trimmed.find("```") {
        let body_start = trimmed[fence_start + 3..]
            .find('\n')
            .map_or(fence_start + 3, |i| fence_start + 4 + i);
        if let Some(fence_end) = trimmed[body_start..].find("```") {
            let body = trimmed[body_start..body_start + fence_end].trim();
            if let Ok(value) = serde_json::from_str::<Value>(body) {
                return Ok(value);
            }
        }
    }

    Err(AppError::parse(
        "could not locate a valid JSON object in model output",
    ))
}

/// Strip a leading "Step N:"-style marker from an instruction line
fn strip_step_prefix(line: &str) -> &str {
    STEP_PREFIX
        .find(line)
        .map_or(line, |m| &line[m.end()..])
        .trim()
}

/// Coerce a JSON value into whole minutes: accepts numbers and strings with
/// a leading integer ("15 minutes")
fn coerce_minutes(value: Option<&Value>) -> Option<u32> {
    value.and_then(coerce_u32)
}

/// Coerce a JSON number or numeric-prefixed string ("~350 kcal") into a u32
fn coerce_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => {
            let digits: String = s
                .chars()
                .skip_while(|c| !c.is_ascii_digit())
                .take_while(char::is_ascii_digit)
                .collect();
            digits.parse().ok()
        }
        _ => None,
    }
}

/// Coerce an optional string-valued field, accepting numbers
fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_owned())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Coerce the ingredients array; objects need a non-empty name, bare strings
/// are promoted to name-only ingredients
fn coerce_ingredients(value: Option<&Value>) -> Vec<RecipeIngredient> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| RecipeIngredient::named(s))
            }
            Value::Object(fields) => {
                let name = fields.get("name").and_then(coerce_string)?;
                Some(RecipeIngredient {
                    name,
                    quantity: fields.get("quantity").and_then(coerce_string),
                    unit: fields.get("unit").and_then(coerce_string),
                    notes: fields.get("notes").and_then(coerce_string),
                })
            }
            _ => None,
        })
        .collect()
}

/// Coerce the instructions array, stripping step markers and empty lines
fn coerce_instructions(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(Value::as_str)
        .map(strip_step_prefix)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Coerce an optional list of strings, defaulting to empty
fn coerce_string_list(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items.iter().filter_map(coerce_string).collect()
}

/// Coerce the nutrition object; every field is optional
fn coerce_nutrition(value: Option<&Value>) -> Nutrition {
    let Some(Value::Object(fields)) = value else {
        return Nutrition::default();
    };

    Nutrition {
        calories: fields.get("calories").and_then(coerce_u32),
        protein: fields.get("protein").and_then(coerce_u32),
        carbs: fields.get("carbs").and_then(coerce_u32),
        fat: fields.get("fat").and_then(coerce_u32),
    }
}
