// ABOUTME: Logging configuration and structured logging setup
// ABOUTME: EnvFilter-driven tracing subscriber with pretty or compact output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Recipe Genie

//! Tracing subscriber initialization for the server binary.

use anyhow::Result;
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging from the `RUST_LOG` environment variable
///
/// Defaults to `info` for this crate and `warn` elsewhere. Set
/// `LOG_FORMAT=compact` for single-line output.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_from_env() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,recipe_genie_server=info"));

    let registry = tracing_subscriber::registry().with(filter);

    if env::var("LOG_FORMAT").as_deref() == Ok("compact") {
        registry
            .with(tracing_subscriber::fmt::layer().compact())
            .try_init()?;
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()?;
    }

    Ok(())
}
