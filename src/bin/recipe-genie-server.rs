// ABOUTME: Recipe Genie server binary wiring config, logging, service and HTTP listener
// ABOUTME: Refuses to start without a model API key; serves until ctrl-c
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Recipe Genie

//! # Recipe Genie Server Binary
//!
//! Starts the recipe generation API: loads configuration from the
//! environment, builds the Gemini-backed [`RecipeService`], and serves the
//! axum router.

use anyhow::{Context, Result};
use clap::Parser;
use recipe_genie_server::{
    config::{ServerConfig, GEMINI_API_KEY_ENV},
    llm::GeminiClient,
    logging,
    routes::app_router,
    service::{RecipeService, ServerResources},
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "recipe-genie-server")]
#[command(about = "Recipe Genie - AI recipe generation API")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logging first so config parse warnings are not lost
    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    info!("Starting Recipe Genie server");
    info!("{}", config.summary());

    let api_key = config
        .llm
        .api_key
        .clone()
        .with_context(|| format!("{GEMINI_API_KEY_ENV} environment variable not set"))?;

    let client = Arc::new(GeminiClient::new(api_key, config.llm.model.clone()));
    let service = RecipeService::new(&config, client);
    let resources = Arc::new(ServerResources::new(service, config.clone()));

    let app = app_router(resources);
    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(addr = %addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Recipe Genie server stopped");
    Ok(())
}

/// Resolve when ctrl-c is received
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install ctrl-c handler");
    }
}
