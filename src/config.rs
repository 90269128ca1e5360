// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Every tunable is parsed here once and injected; core modules never read env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Recipe Genie

//! Environment-based configuration for the recipe server.
//!
//! Rate limit, cache, and model settings are grouped into typed sub-structs
//! so that each component receives exactly the values it needs at
//! construction time.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;
use tracing::warn;

/// Environment variable holding the Gemini API key
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Rate limiting configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum accepted generation attempts per window
    pub capacity: u32,
    /// Window length in seconds
    pub window_secs: u64,
}

impl RateLimitConfig {
    /// Window length as a [`Duration`]
    #[must_use]
    pub const fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            capacity: 30,
            window_secs: 60,
        }
    }
}

/// Response cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Entry TTL in seconds
    pub ttl_secs: u64,
    /// Soft bound on stored entries; expired entries are dropped first
    pub max_entries: usize,
    /// Interval between background sweeps of expired entries
    pub cleanup_interval_secs: u64,
    /// Enable the background sweep task (disable in tests)
    pub enable_background_cleanup: bool,
}

impl CacheConfig {
    /// Entry TTL as a [`Duration`]
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Sweep interval as a [`Duration`]
    #[must_use]
    pub const fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 3600,
            max_entries: 1000,
            cleanup_interval_secs: 300,
            enable_background_cleanup: true,
        }
    }
}

/// Upstream model configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// API key for the model service
    pub api_key: Option<String>,
    /// Model identifier sent upstream and echoed in responses
    pub model: String,
    /// Upper bound on a single model call
    pub request_timeout_secs: u64,
}

impl LlmConfig {
    /// Request timeout as a [`Duration`]
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.5-flash".to_owned(),
            request_timeout_secs: 30,
        }
    }
}

/// Top-level server configuration
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Rate limiting settings
    pub rate_limit: RateLimitConfig,
    /// Response cache settings
    pub cache: CacheConfig,
    /// Upstream model settings
    pub llm: LlmConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with sane defaults
    ///
    /// # Errors
    ///
    /// Returns an error if a set variable cannot be parsed as its target type.
    pub fn from_env() -> Result<Self> {
        let defaults = Self {
            http_port: 8080,
            ..Self::default()
        };

        Ok(Self {
            http_port: parse_env("HTTP_PORT", defaults.http_port)?,
            rate_limit: RateLimitConfig {
                capacity: parse_env("RATE_LIMIT_CAPACITY", defaults.rate_limit.capacity)?,
                window_secs: parse_env("RATE_LIMIT_WINDOW_SECS", defaults.rate_limit.window_secs)?,
            },
            cache: CacheConfig {
                ttl_secs: parse_env("CACHE_TTL_SECS", defaults.cache.ttl_secs)?,
                max_entries: parse_env("CACHE_MAX_ENTRIES", defaults.cache.max_entries)?,
                cleanup_interval_secs: parse_env(
                    "CACHE_CLEANUP_INTERVAL_SECS",
                    defaults.cache.cleanup_interval_secs,
                )?,
                enable_background_cleanup: true,
            },
            llm: LlmConfig {
                api_key: env::var(GEMINI_API_KEY_ENV).ok().filter(|k| !k.is_empty()),
                model: env::var("GEMINI_MODEL").unwrap_or(defaults.llm.model),
                request_timeout_secs: parse_env(
                    "LLM_REQUEST_TIMEOUT_SECS",
                    defaults.llm.request_timeout_secs,
                )?,
            },
        })
    }

    /// One-line configuration summary for startup logging, secrets omitted
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "port={} rate_limit={}/{}s cache_ttl={}s model={} llm_timeout={}s api_key={}",
            self.http_port,
            self.rate_limit.capacity,
            self.rate_limit.window_secs,
            self.cache.ttl_secs,
            self.llm.model,
            self.llm.request_timeout_secs,
            if self.llm.api_key.is_some() {
                "set"
            } else {
                "missing"
            }
        )
    }
}

/// Parse an environment variable, falling back to `default` when unset
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(e) => {
            warn!(key, error = %e, "environment variable unreadable, using default");
            Ok(default)
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_values() {
        let config = RateLimitConfig::default();
        assert_eq!(config.capacity, 30);
        assert_eq!(config.window(), Duration::from_secs(60));

        let cache = CacheConfig::default();
        assert_eq!(cache.ttl(), Duration::from_secs(3600));

        let llm = LlmConfig::default();
        assert_eq!(llm.model, "gemini-2.5-flash");
        assert_eq!(llm.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_summary_redacts_api_key() {
        let config = ServerConfig {
            llm: LlmConfig {
                api_key: Some("secret-key".to_owned()),
                ..LlmConfig::default()
            },
            ..ServerConfig::default()
        };
        let summary = config.summary();
        assert!(!summary.contains("secret-key"));
        assert!(summary.contains("api_key=set"));
    }
}
