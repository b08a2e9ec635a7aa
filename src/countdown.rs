// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Event countdown derived from the clock on every tick.
//!
//! The breakdown is always recomputed from `target - now`, never by
//! decrementing a counter, so it cannot drift.

use chrono::{DateTime, Utc};
use std::time::Duration as StdDuration;

/// Remaining time until a target instant, broken into display fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    /// Set once the target is in the past; all fields are zero then
    pub expired: bool,
}

impl Countdown {
    const EXPIRED: Countdown = Countdown {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
        expired: true,
    };

    /// Breakdown of `target - now`. Pure; sub-second remainders truncate.
    pub fn between(now: DateTime<Utc>, target: DateTime<Utc>) -> Self {
        let remaining = target - now;
        if remaining <= chrono::Duration::zero() {
            return Self::EXPIRED;
        }

        let secs = remaining.num_seconds();
        Countdown {
            days: secs / 86_400,
            hours: secs % 86_400 / 3_600,
            minutes: secs % 3_600 / 60,
            seconds: secs % 60,
            expired: false,
        }
    }

    /// Breakdown relative to the current clock.
    pub fn until(target: DateTime<Utc>) -> Self {
        Self::between(Utc::now(), target)
    }
}

/// Once-per-second countdown recomputation.
///
/// The first tick completes immediately so displays render without a
/// one-second blank.
pub struct CountdownTicker {
    target: DateTime<Utc>,
    interval: tokio::time::Interval,
}

impl CountdownTicker {
    pub fn new(target: DateTime<Utc>) -> Self {
        Self {
            target,
            interval: tokio::time::interval(StdDuration::from_secs(1)),
        }
    }

    /// Wait for the next second boundary and recompute.
    pub async fn tick(&mut self) -> Countdown {
        self.interval.tick().await;
        Countdown::until(self.target)
    }
}
