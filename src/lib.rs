// ABOUTME: Recipe Genie library root exposing the generation core and HTTP surface
// ABOUTME: The mediation layer between web clients and a generative model service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Recipe Genie

//! # Recipe Genie Server
//!
//! Mediation layer between a web client and a generative-language-model
//! service producing structured recipe data from free-text ingredient lists.
//!
//! The core pipeline:
//!
//! 1. [`normalizer`] turns variable user input into a stable canonical key
//! 2. [`rate_limit`] enforces a shared generation budget per time window
//! 3. [`cache`] deduplicates identical in-flight requests (single-flight)
//!    and serves previously generated recipes until their TTL expires
//! 4. [`prompt`] renders a deterministic instruction payload
//! 5. [`llm`] calls the upstream model, bounded by a timeout
//! 6. [`parser`] reduces untrusted model text to a validated [`models::Recipe`]
//! 7. [`fallback`] produces an always-valid recipe when the chain fails
//!
//! [`service::RecipeService::generate`] orchestrates the pipeline; the
//! user-facing contract is "always get a recipe, occasionally a degraded
//! one". Only validation and rate-limit errors surface to callers.

/// Response cache with TTL expiry and single-flight deduplication
pub mod cache;
/// Environment-based configuration
pub mod config;
/// Unified error handling
pub mod errors;
/// Fallback recipe generation
pub mod fallback;
/// Model client abstraction and the Gemini implementation
pub mod llm;
/// Logging setup
pub mod logging;
/// Recipe domain model and wire types
pub mod models;
/// Request normalization and canonical keys
pub mod normalizer;
/// Model response parsing
pub mod parser;
/// Deterministic prompt construction
pub mod prompt;
/// Fixed-window rate limiting
pub mod rate_limit;
/// HTTP routes
pub mod routes;
/// Generation orchestration and shared server state
pub mod service;
