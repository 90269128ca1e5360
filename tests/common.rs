// ABOUTME: Shared test utilities: quiet logging setup and scripted stub model clients
// ABOUTME: Stubs record call counts so tests can assert single-flight and cache behavior
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Recipe Genie
#![allow(dead_code, clippy::unwrap_used, clippy::must_use_candidate)]

//! Shared test utilities for `recipe_genie_server`.

use async_trait::async_trait;
use recipe_genie_server::config::{CacheConfig, LlmConfig, RateLimitConfig, ServerConfig};
use recipe_genie_server::errors::AppError;
use recipe_genie_server::llm::ModelClient;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Once;
use std::time::Duration;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_test_writer()
            .init();
    });
}

/// Server configuration suitable for tests: no background sweep task,
/// short upstream timeout
pub fn test_config() -> ServerConfig {
    ServerConfig {
        http_port: 0,
        rate_limit: RateLimitConfig {
            capacity: 30,
            window_secs: 60,
        },
        cache: CacheConfig {
            ttl_secs: 3600,
            max_entries: 100,
            cleanup_interval_secs: 300,
            enable_background_cleanup: false,
        },
        llm: LlmConfig {
            api_key: None,
            model: "stub-model".to_owned(),
            request_timeout_secs: 1,
        },
    }
}

/// What the stub does when `complete` is called
pub enum StubBehavior {
    /// Return this text
    Reply(String),
    /// Fail with an upstream error
    Fail(String),
    /// Never return, forcing the caller's timeout to fire
    Hang,
}

/// Scripted model client recording how often it was invoked
pub struct StubModelClient {
    behavior: StubBehavior,
    calls: AtomicU32,
}

impl StubModelClient {
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            behavior: StubBehavior::Reply(text.into()),
            calls: AtomicU32::new(0),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            behavior: StubBehavior::Fail(message.into()),
            calls: AtomicU32::new(0),
        }
    }

    pub fn hanging() -> Self {
        Self {
            behavior: StubBehavior::Hang,
            calls: AtomicU32::new(0),
        }
    }

    /// Number of `complete` invocations so far
    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelClient for StubModelClient {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn model(&self) -> &str {
        "stub-model"
    }

    async fn complete(&self, _prompt: &str) -> Result<String, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            StubBehavior::Reply(text) => Ok(text.clone()),
            StubBehavior::Fail(message) => Err(AppError::upstream(message.clone())),
            StubBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(AppError::upstream("unreachable"))
            }
        }
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(!matches!(self.behavior, StubBehavior::Fail(_)))
    }
}

/// A complete, well-formed model reply for the "egg, rice" request
pub fn valid_model_json() -> String {
    serde_json::json!({
        "name": "Golden Egg Fried Rice",
        "description": "Fluffy rice tossed with silky scrambled egg.",
        "prep_time": 10,
        "cook_time": 15,
        "total_time": 25,
        "difficulty": "easy",
        "servings": 2,
        "ingredients": [
            {"name": "egg", "quantity": "2", "unit": "pieces"},
            {"name": "rice", "quantity": "2", "unit": "cups", "notes": "day-old"}
        ],
        "instructions": [
            "Step 1: Scramble the eggs over medium heat.",
            "Step 2: Add the rice and stir-fry until golden."
        ],
        "tips": ["Day-old rice fries better than fresh."],
        "equipment_needed": ["Wok"],
        "nutrition": {"calories": 420, "protein": 18, "carbs": 52, "fat": 14}
    })
    .to_string()
}
