// ABOUTME: Google Gemini model client speaking the Generative Language API
// ABOUTME: Single-shot text completion; transport and API failures map to UpstreamError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Recipe Genie

//! # Gemini Client
//!
//! Implementation of [`ModelClient`](super::ModelClient) against Google's
//! Generative Language API.
//!
//! ## Configuration
//!
//! The API key comes from [`crate::config::LlmConfig`]; obtain one from
//! Google AI Studio: <https://makersuite.google.com/app/apikey>

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::ModelClient;
use crate::errors::AppError;

/// Base URL for the Gemini API
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Sampling temperature for recipe generation
const TEMPERATURE: f32 = 0.8;
/// Nucleus sampling bound
const TOP_P: f32 = 0.95;
/// Top-k sampling bound
const TOP_K: u32 = 40;
/// Maximum response length
const MAX_OUTPUT_TOKENS: u32 = 2048;

// ============================================================================
// API Request/Response Types
// ============================================================================

/// Gemini API request structure
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

/// Content structure for the Gemini API
#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    parts: Vec<ContentPart>,
}

/// Text part of a content block
#[derive(Debug, Serialize, Deserialize)]
struct ContentPart {
    text: String,
}

/// Generation configuration
#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "topP")]
    top_p: f32,
    #[serde(rename = "topK")]
    top_k: u32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: TEMPERATURE,
            top_p: TOP_P,
            top_k: TOP_K,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }
}

/// Gemini API response structure
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<GeminiError>,
}

/// Response candidate
#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<GeminiContent>,
}

/// API error body from Gemini
#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Client Implementation
// ============================================================================

/// Google Gemini model client
pub struct GeminiClient {
    api_key: String,
    client: Client,
    model: String,
}

impl GeminiClient {
    /// Create a new Gemini client for the given model
    #[must_use]
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
            model: model.into(),
        }
    }

    /// Build the API URL for a method on the configured model
    fn build_url(&self, method: &str) -> String {
        format!(
            "{API_BASE_URL}/models/{}:{method}?key={}",
            self.model, self.api_key
        )
    }

    /// Extract the first text part from a Gemini response
    fn extract_text(response: GeminiResponse) -> Result<String, AppError> {
        if let Some(error) = response.error {
            return Err(AppError::upstream(format!(
                "Gemini API error: {}",
                error.message
            )));
        }

        response
            .candidates
            .and_then(|mut c| c.drain(..).next())
            .and_then(|c| c.content)
            .and_then(|mut c| c.parts.drain(..).next())
            .map(|p| p.text)
            .ok_or_else(|| AppError::upstream("No content in Gemini response"))
    }

    /// Map a non-success HTTP status to an upstream error, preferring the
    /// message from the JSON error body when one is present
    fn map_api_error(status: u16, response_text: &str) -> AppError {
        let message = serde_json::from_str::<GeminiResponse>(response_text)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| response_text.to_owned(), |e| e.message);
        AppError::upstream(format!("Gemini API error ({status}): {message}"))
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn complete(&self, prompt: &str) -> Result<String, AppError> {
        let url = self.build_url("generateContent");

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![ContentPart {
                    text: prompt.to_owned(),
                }],
            }],
            generation_config: GenerationConfig::default(),
        };

        debug!("sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("HTTP request failed: {e}")).with_source(e))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| AppError::upstream(format!("Failed to read response: {e}")).with_source(e))?;

        if !status.is_success() {
            error!(status = %status, "Gemini API returned an error");
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                error!(error = %e, "failed to decode Gemini response envelope");
                AppError::upstream(format!("Failed to decode Gemini response: {e}")).with_source(e)
            })?;

        let text = Self::extract_text(gemini_response)?;
        debug!(chars = text.len(), "received Gemini response");
        Ok(text)
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, AppError> {
        // Listing models verifies both connectivity and the API key
        let url = format!("{API_BASE_URL}/models?key={}", self.api_key);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("Health check failed: {e}")))?;

        Ok(response.status().is_success())
    }
}

impl Debug for GeminiClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
