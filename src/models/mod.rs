// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Wire-level projections of the CTFd API.

pub mod auth;
pub mod challenge;
pub mod scoreboard;
pub mod user;

pub use auth::{AttemptRequest, AttemptResponse, AttemptStatus, AuthToken, LoginRequest, RegisterRequest};
pub use challenge::{Challenge, ChallengeState, Difficulty, Hint, Tag, CHALLENGE_CATEGORIES};
pub use scoreboard::{ScoreboardEntry, TeamMember};
pub use user::User;
