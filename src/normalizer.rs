// ABOUTME: Request normalization producing a stable canonical cache key
// ABOUTME: Pure functions; validation failures surface as InvalidInput errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Recipe Genie

//! Request normalization.
//!
//! Turns the raw wire request into a [`NormalizedRequest`] whose ingredient
//! order is preserved for prompt text, plus a [`CanonicalKey`] derived from
//! the lowercased, sorted ingredient *set*. Two requests naming the same
//! ingredients in any order, casing, or whitespace map to the same key.

use crate::errors::{AppError, AppResult};
use crate::models::GenerateRecipeRequest;
use sha2::{Digest, Sha256};
use std::fmt;

/// Maximum number of ingredients accepted in one request
pub const MAX_INGREDIENTS: usize = 20;

/// Servings bounds; out-of-range values are clamped, missing defaults to 4
pub const MIN_SERVINGS: u32 = 1;
/// Upper servings clamp
pub const MAX_SERVINGS: u32 = 20;
/// Default servings when the client omits the field
pub const DEFAULT_SERVINGS: u32 = 4;

/// Deterministic cache key for a normalized request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    /// The hex digest backing this key
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Digest prefix is enough to correlate log lines
        write!(f, "{}", &self.0[..16.min(self.0.len())])
    }
}

/// Validated, immutable request with normalized fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRequest {
    /// Trimmed ingredients, case-insensitively deduplicated, input order kept
    pub ingredients: Vec<String>,
    /// Lowercased cuisine, `any` when unspecified
    pub cuisine: String,
    /// Lowercased meal type, `any` when unspecified
    pub meal_type: String,
    /// Lowercased dietary restriction, `none` when unspecified
    pub dietary: String,
    /// Servings clamped to 1-20
    pub servings: u32,
}

impl NormalizedRequest {
    /// Derive the canonical cache key for this request
    ///
    /// The key hashes the sorted lowercase ingredient set together with the
    /// remaining normalized fields, so input ordering and casing do not
    /// fragment the cache.
    #[must_use]
    pub fn canonical_key(&self) -> CanonicalKey {
        let mut set: Vec<String> = self.ingredients.iter().map(|i| i.to_lowercase()).collect();
        set.sort_unstable();

        let mut hasher = Sha256::new();
        hasher.update(set.join("\n"));
        hasher.update([0]);
        hasher.update(&self.cuisine);
        hasher.update([0]);
        hasher.update(&self.meal_type);
        hasher.update([0]);
        hasher.update(&self.dietary);
        hasher.update([0]);
        hasher.update(self.servings.to_le_bytes());

        let digest = hasher.finalize();
        let mut hex = String::with_capacity(digest.len() * 2);
        for byte in digest {
            use fmt::Write;
            // Writing to a String cannot fail
            let _ = write!(hex, "{byte:02x}");
        }
        CanonicalKey(hex)
    }
}

/// Normalize a raw request, validating the ingredient list
///
/// Splits `ingredients` on commas, trims tokens, drops empties, and
/// deduplicates case-insensitively while keeping first-seen order. Servings
/// are clamped to 1-20 with a default of 4. Option fields default to
/// `any`/`any`/`none`.
///
/// # Errors
///
/// Returns [`AppError::invalid_input`] when no usable ingredient remains or
/// more than [`MAX_INGREDIENTS`] are given.
pub fn normalize(raw: &GenerateRecipeRequest) -> AppResult<NormalizedRequest> {
    let mut ingredients: Vec<String> = Vec::new();
    let mut seen: Vec<String> = Vec::new();

    for token in raw.ingredients.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let folded = token.to_lowercase();
        if seen.contains(&folded) {
            continue;
        }
        seen.push(folded);
        ingredients.push(token.to_owned());
    }

    if ingredients.is_empty() {
        return Err(AppError::invalid_input("Please enter ingredients"));
    }
    if ingredients.len() > MAX_INGREDIENTS {
        return Err(AppError::invalid_input(format!(
            "Too many ingredients: {} exceeds the maximum of {MAX_INGREDIENTS}",
            ingredients.len()
        )));
    }

    let servings = raw
        .servings
        .unwrap_or(DEFAULT_SERVINGS)
        .clamp(MIN_SERVINGS, MAX_SERVINGS);

    Ok(NormalizedRequest {
        ingredients,
        cuisine: normalize_choice(raw.cuisine.as_deref(), "any"),
        meal_type: normalize_choice(raw.meal_type.as_deref(), "any"),
        dietary: normalize_choice(raw.dietary.as_deref(), "none"),
        servings,
    })
}

/// Lowercase and trim an optional choice field, substituting `default`
/// for missing or blank values
fn normalize_choice(value: Option<&str>, default: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_lowercase(),
        _ => default.to_owned(),
    }
}
