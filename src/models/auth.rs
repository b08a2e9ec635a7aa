// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authentication and flag submission request/response types.
//!
//! The two credential-bearing requests carry `validator` rules so format
//! violations are caught before any network call and surfaced per field.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Credentials for obtaining a session token.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Payload for creating a new account.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Session token issued on successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthToken {
    pub token: String,
}

/// A flag submission for one challenge.
#[derive(Debug, Clone, Serialize)]
pub struct AttemptRequest {
    pub challenge_id: i64,
    pub submission: String,
}

/// Backend verdict on a flag submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptResponse {
    pub status: AttemptStatus,
    pub message: String,
}

/// Closed set of flag submission outcomes.
///
/// These are results, not errors: a wrong flag still completes the
/// request successfully. The backend is authoritative for rate limiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptStatus {
    Correct,
    Incorrect,
    AlreadySolved,
    Ratelimited,
}

impl AttemptStatus {
    /// Only a `Correct` verdict counts as a solve.
    pub fn is_solve(self) -> bool {
        matches!(self, AttemptStatus::Correct)
    }
}
