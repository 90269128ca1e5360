// ABOUTME: Model client abstraction for pluggable generative-language-model backends
// ABOUTME: Defines the contract the recipe service calls; Gemini is the production implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Recipe Genie

//! # Model Client Service Provider Interface
//!
//! The recipe service treats the upstream model as an opaque collaborator:
//! given a prompt it returns raw text or fails with an upstream error. The
//! [`ModelClient`] trait is the seam where tests inject scripted stubs and
//! production injects [`GeminiClient`].

mod gemini;

pub use gemini::GeminiClient;

use crate::errors::AppError;
use async_trait::async_trait;

/// Contract for an upstream generative model service
///
/// Implementations must be cheap to share behind an `Arc` and safe to call
/// concurrently. The caller bounds every `complete` invocation with its own
/// timeout; implementations need not time out on their own.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Unique client identifier (e.g., "gemini")
    fn name(&self) -> &'static str;

    /// Model identifier echoed into generated recipes
    fn model(&self) -> &str;

    /// Send a prompt and return the raw response text
    ///
    /// # Errors
    ///
    /// Returns an [`AppError`] with [`crate::errors::ErrorCode::UpstreamError`]
    /// for transport failures and upstream API errors.
    async fn complete(&self, prompt: &str) -> Result<String, AppError>;

    /// Check that the backend is reachable and credentials are valid
    ///
    /// # Errors
    ///
    /// Returns an error when the check itself could not be performed.
    async fn health_check(&self) -> Result<bool, AppError>;
}
