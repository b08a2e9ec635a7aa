// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fixed-interval scoreboard polling.
//!
//! One fetch immediately on spawn, then one per interval - no jitter, no
//! backoff. Each successful fetch replaces the published snapshot
//! wholesale; failures are logged and the previous snapshot stands.
//! Dropping the handle aborts the task, so no result is ever applied
//! after the owner is gone.

use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::ScoreboardEntry;

/// Default refresh cadence, matching the portal's 30-second timer.
pub const SCOREBOARD_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Handle to a running scoreboard poll loop.
///
/// The loop lives exactly as long as the handle.
pub struct ScoreboardPoller {
    task: JoinHandle<()>,
    snapshot: watch::Receiver<Vec<ScoreboardEntry>>,
}

impl ScoreboardPoller {
    /// Poll the backend scoreboard at the default 30-second cadence.
    pub fn spawn(api: ApiClient) -> Self {
        Self::spawn_every(api, SCOREBOARD_REFRESH_INTERVAL)
    }

    /// Poll the backend scoreboard at a custom cadence.
    pub fn spawn_every(api: ApiClient, period: Duration) -> Self {
        Self::spawn_with(period, move || {
            let api = api.clone();
            async move { api.scoreboard().await }
        })
    }

    /// Poll an arbitrary fetch function. Used directly by tests; the
    /// public constructors wire it to [`ApiClient::scoreboard`].
    pub fn spawn_with<F, Fut>(period: Duration, fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<Vec<ScoreboardEntry>>> + Send,
    {
        let (tx, rx) = watch::channel(Vec::new());

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                // First tick completes immediately: fetch-on-mount
                ticker.tick().await;
                match fetch().await {
                    Ok(entries) => {
                        // Receivers may all be gone; the next loop
                        // iteration still keeps the cadence
                        let _ = tx.send(entries);
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "Scoreboard poll failed, keeping last snapshot");
                    }
                }
            }
        });

        Self { task, snapshot: rx }
    }

    /// Subscribe to snapshot updates.
    pub fn subscribe(&self) -> watch::Receiver<Vec<ScoreboardEntry>> {
        self.snapshot.clone()
    }

    /// The most recent snapshot (empty before the first successful fetch).
    pub fn latest(&self) -> Vec<ScoreboardEntry> {
        self.snapshot.borrow().clone()
    }
}

impl Drop for ScoreboardPoller {
    fn drop(&mut self) {
        self.task.abort();
    }
}
