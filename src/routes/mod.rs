// ABOUTME: Route module organization for the recipe server HTTP endpoints
// ABOUTME: Thin handlers per domain that delegate to the service layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Recipe Genie

//! HTTP routes for the recipe server.
//!
//! Each domain module exposes a `routes(resources)` constructor returning an
//! `axum::Router`; the binary composes them into one application router.

/// Health check and service info routes
pub mod health;
/// Recipe generation routes
pub mod recipes;

pub use health::HealthRoutes;
pub use recipes::RecipeRoutes;

use crate::service::ServerResources;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Compose the full application router
#[must_use]
pub fn app_router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(RecipeRoutes::routes(Arc::clone(&resources)))
        .merge(HealthRoutes::routes(resources))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
