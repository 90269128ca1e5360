// ABOUTME: Recipe generation orchestrator wiring normalizer, limiter, cache, model and parser
// ABOUTME: Upstream and parse failures degrade to a fallback recipe and never surface to callers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Recipe Genie

//! # Recipe Service
//!
//! [`RecipeService::generate`] is the sole public entry point of the core:
//! normalize the request, take a rate-limit slot, then resolve through the
//! cache's single-flight `get_or_compute`. The compute step renders the
//! prompt, calls the model under a timeout, and parses the response, falling
//! back to a locally generated recipe on any failure in that chain.
//!
//! All shared mutable state (rate window, cache map) lives in explicitly
//! constructed fields with their own synchronization; nothing here is
//! ambient or global, so tests build as many independent instances as they
//! like.

use crate::cache::ResponseCache;
use crate::config::ServerConfig;
use crate::errors::AppResult;
use crate::fallback::fallback_recipe;
use crate::llm::ModelClient;
use crate::models::{GenerateRecipeRequest, Recipe};
use crate::normalizer::{normalize, NormalizedRequest};
use crate::parser::parse_recipe;
use crate::prompt::build_recipe_prompt;
use crate::rate_limit::{RateLimitStatus, RateLimiter};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Recipe generation service
///
/// Construct once per process (or per test) with explicitly injected
/// configuration and model client.
pub struct RecipeService {
    limiter: RateLimiter,
    cache: ResponseCache<Recipe>,
    client: Arc<dyn ModelClient>,
    cache_ttl: Duration,
    request_timeout: Duration,
}

impl RecipeService {
    /// Create a service from configuration and a model client
    ///
    /// Must be called from within a tokio runtime when the cache's
    /// background sweep is enabled.
    #[must_use]
    pub fn new(config: &ServerConfig, client: Arc<dyn ModelClient>) -> Self {
        Self {
            limiter: RateLimiter::new(config.rate_limit.clone()),
            cache: ResponseCache::new(&config.cache),
            cache_ttl: config.cache.ttl(),
            request_timeout: config.llm.request_timeout(),
            client,
        }
    }

    /// Identifier of the configured model, for health reporting
    #[must_use]
    pub fn model(&self) -> &str {
        self.client.model()
    }

    /// Whether the upstream model service currently answers health checks
    ///
    /// Bounded by the configured request timeout; an unreachable or slow
    /// backend reports unhealthy rather than hanging the health endpoint.
    pub async fn model_healthy(&self) -> bool {
        matches!(
            tokio::time::timeout(self.request_timeout, self.client.health_check()).await,
            Ok(Ok(true))
        )
    }

    /// Live rate limiter snapshot, for the service info endpoint
    #[must_use]
    pub fn rate_limit_status(&self) -> RateLimitStatus {
        self.limiter.status()
    }

    /// Generate a recipe for a raw client request
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for unusable requests and `RateLimitExceeded`
    /// when the window budget is spent. Recoverable upstream and parse
    /// failures are absorbed into a fallback recipe instead of surfacing.
    #[instrument(skip(self, raw))]
    pub async fn generate(&self, raw: &GenerateRecipeRequest) -> AppResult<Recipe> {
        let request = normalize(raw)?;
        self.limiter.try_acquire()?;

        let key = request.canonical_key();
        info!(key = %key, ingredients = request.ingredients.len(), "resolving recipe");

        let client = Arc::clone(&self.client);
        let timeout = self.request_timeout;
        self.cache
            .get_or_compute(&key, self.cache_ttl, async move {
                generate_uncached(client.as_ref(), timeout, &request).await
            })
            .await
    }
}

/// One model round-trip with parsing, degrading to the fallback recipe
///
/// This is the compute step shared by all single-flight waiters of a key;
/// it runs on its own task, so a disconnecting caller never cancels it.
/// Recoverable failures (upstream, timeout, parse) become fallback recipes;
/// anything else propagates to every waiter.
async fn generate_uncached(
    client: &dyn ModelClient,
    timeout: Duration,
    request: &NormalizedRequest,
) -> AppResult<Recipe> {
    let prompt = build_recipe_prompt(request);

    let raw = match tokio::time::timeout(timeout, client.complete(&prompt)).await {
        Ok(Ok(text)) => text,
        Ok(Err(e)) if e.is_recoverable() => {
            warn!(error = %e, "model call failed, serving fallback recipe");
            return Ok(fallback_recipe(request));
        }
        Ok(Err(e)) => return Err(e),
        Err(_) => {
            warn!(timeout_secs = timeout.as_secs(), "model call timed out, serving fallback recipe");
            return Ok(fallback_recipe(request));
        }
    };

    match parse_recipe(&raw, client.model(), request.servings) {
        Ok(recipe) => Ok(recipe),
        Err(e) if e.is_recoverable() => {
            warn!(error = %e, "model output unusable, serving fallback recipe");
            Ok(fallback_recipe(request))
        }
        Err(e) => Err(e),
    }
}

/// Shared state handed to every HTTP handler
pub struct ServerResources {
    /// The recipe generation service
    pub service: RecipeService,
    /// Configuration snapshot, for health and info endpoints
    pub config: ServerConfig,
}

impl ServerResources {
    /// Bundle a service with its configuration
    #[must_use]
    pub fn new(service: RecipeService, config: ServerConfig) -> Self {
        Self { service, config }
    }
}
