// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-side core for a CTFd-compatible capture-the-flag portal.
//!
//! This crate provides the non-visual logic a competition front end
//! needs: session token persistence, the API gateway to the backend,
//! the authentication lifecycle, and the countdown/scoreboard-polling
//! utilities. Rendering is someone else's job.

pub mod api;
pub mod config;
pub mod countdown;
pub mod error;
pub mod fixtures;
pub mod models;
pub mod poll;
pub mod session;
pub mod token;

pub use api::ApiClient;
pub use config::Config;
pub use countdown::{Countdown, CountdownTicker};
pub use error::{ApiError, Result};
pub use poll::ScoreboardPoller;
pub use session::{Session, SessionState};
pub use token::TokenStore;
