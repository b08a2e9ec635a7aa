// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CTFd client status check.
//!
//! Wires the full stack together: loads configuration, restores any
//! persisted session, optionally logs in with env-supplied credentials,
//! then fetches the challenge list and scoreboard once and reports what
//! it finds.

use anyhow::Context;
use ctfd_client::{
    config::Config, models::LoginRequest, ApiClient, Session, SessionState, TokenStore,
};
use std::env;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(base_url = %config.base_url, demo_fallback = config.demo_fallback, "Starting CTFd client");

    let tokens = Arc::new(TokenStore::at_path(&config.token_path));
    let api = ApiClient::new(&config.base_url, tokens.clone(), config.demo_fallback)
        .context("Failed to build API client")?;
    let session = Session::new(api.clone(), tokens);

    match session.initialize().await {
        SessionState::Authenticated(user) => {
            tracing::info!(user = %user.name, "Restored existing session")
        }
        _ => tracing::info!("No existing session"),
    }

    // Optional login with env-supplied credentials
    if let (Ok(name), Ok(password)) = (env::var("CTFD_NAME"), env::var("CTFD_PASSWORD")) {
        match session.login(&LoginRequest { name, password }).await {
            Ok(user) => tracing::info!(user = %user.name, "Logged in"),
            Err(err) => tracing::warn!(errors = ?err.error_strings(), "Login failed"),
        }
    }

    let challenges = api.challenges().await.context("Challenge fetch failed")?;
    let solved = challenges.iter().filter(|c| c.solved_by_me).count();
    tracing::info!(count = challenges.len(), solved, "Challenges loaded");

    let scoreboard = api.scoreboard().await.context("Scoreboard fetch failed")?;
    for entry in scoreboard.iter().take(10) {
        tracing::info!(pos = entry.pos, name = %entry.name, score = entry.score, "Scoreboard entry");
    }

    Ok(())
}

/// Initialize logging with a crate-level debug default.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ctfd_client=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
