// ABOUTME: Recipe generation route handlers
// ABOUTME: POST /api/recipes/generate delegating to RecipeService::generate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Recipe Genie

//! Recipe generation routes.
//!
//! Validation and rate-limit failures surface as `{"error": ...}` responses
//! with client-error statuses; upstream and parse failures never reach the
//! client because the service absorbs them into a fallback recipe.

use crate::errors::AppResult;
use crate::models::{GenerateRecipeRequest, Recipe};
use crate::service::ServerResources;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use std::sync::Arc;

/// Recipe routes handler
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/recipes/generate", post(Self::generate))
            .with_state(resources)
    }

    /// Generate a recipe from a free-text ingredient list
    async fn generate(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<GenerateRecipeRequest>,
    ) -> AppResult<Json<Recipe>> {
        let recipe = resources.service.generate(&request).await?;
        Ok(Json(recipe))
    }
}
