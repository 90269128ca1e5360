// ABOUTME: Unified error handling with error codes and HTTP response mapping
// ABOUTME: Defines the failure taxonomy for validation, rate limiting, upstream and parse errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Recipe Genie

//! # Unified Error Handling System
//!
//! Central error type for the recipe service. Only [`ErrorCode::InvalidInput`]
//! and [`ErrorCode::RateLimitExceeded`] are expected to reach API clients as
//! hard errors; upstream and parse failures are absorbed into a fallback
//! recipe by the service layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Malformed, empty or oversized client input
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput,
    /// Shared generation budget exhausted for the current window
    #[serde(rename = "RATE_LIMIT_EXCEEDED")]
    RateLimitExceeded,
    /// Transport failure or timeout talking to the model service
    #[serde(rename = "UPSTREAM_ERROR")]
    UpstreamError,
    /// Model output could not be reduced to a valid recipe
    #[serde(rename = "PARSE_ERROR")]
    ParseError,
    /// Configuration error at startup
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError,
    /// Anything else; fatal for the single request only
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(self) -> StatusCode {
        match self {
            Self::InvalidInput => StatusCode::BAD_REQUEST,
            Self::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            Self::UpstreamError | Self::ParseError => StatusCode::BAD_GATEWAY,
            Self::ConfigError | Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-facing description of this error class
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::RateLimitExceeded => "Rate limit exceeded. Please wait for the window to reset",
            Self::UpstreamError => "The AI service is unavailable",
            Self::ParseError => "The AI response could not be parsed",
            Self::ConfigError => "Configuration error encountered",
            Self::InternalError => "An internal server error occurred",
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new error with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    /// Invalid client input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Rate limit exceeded for the current window
    #[must_use]
    pub fn rate_limit_exceeded(limit: u32, reset_at: chrono::DateTime<chrono::Utc>) -> Self {
        Self::new(
            ErrorCode::RateLimitExceeded,
            format!(
                "Rate limit of {limit} requests per window exceeded, resets at {}",
                reset_at.to_rfc3339()
            ),
        )
    }

    /// Transport failure or timeout against the model service
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UpstreamError, message)
    }

    /// Unusable model output
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ParseError, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Whether the service layer should degrade to a fallback recipe
    /// instead of surfacing this error to the caller
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self.code, ErrorCode::UpstreamError | ErrorCode::ParseError)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// HTTP error response body: `{"error": "..."}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        Self {
            error: error.message.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        // Internal failure details stay in the logs, not in the response body
        let body = if self.code == ErrorCode::InternalError {
            tracing::error!(error = %self, "request failed with internal error");
            ErrorResponse {
                error: self.code.description().to_owned(),
            }
        } else {
            ErrorResponse::from(&self)
        };
        (status, Json(body)).into_response()
    }
}
