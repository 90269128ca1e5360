// ABOUTME: Health check and service info route handlers
// ABOUTME: Reports service status, configured model, and capability summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Recipe Genie

//! Health and service info routes.

use crate::service::ServerResources;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create health and info routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::health))
            .route("/api-info", get(Self::api_info))
            .with_state(resources)
    }

    /// Liveness and dependency status
    ///
    /// Reports `degraded` when the model backend does not answer its health
    /// check within the request timeout.
    async fn health(State(resources): State<Arc<ServerResources>>) -> Json<serde_json::Value> {
        let model_reachable = resources.service.model_healthy().await;
        Json(serde_json::json!({
            "status": if model_reachable { "healthy" } else { "degraded" },
            "genai_model": resources.service.model(),
            "model_reachable": model_reachable,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }))
    }

    /// Service description with live rate-limit status
    async fn api_info(State(resources): State<Arc<ServerResources>>) -> Json<serde_json::Value> {
        let status = resources.service.rate_limit_status();
        Json(serde_json::json!({
            "service": "Recipe Genie",
            "model": resources.service.model(),
            "capabilities": [
                "Recipe generation from ingredients",
                "Multiple cuisine support",
                "Dietary restriction handling",
                "Nutritional estimation",
                "Chef tips generation",
            ],
            "rate_limit": {
                "limit": status.limit,
                "remaining": status.remaining,
                "window_secs": resources.config.rate_limit.window_secs,
                "reset_at": status.reset_at.to_rfc3339(),
            },
        }))
    }
}
