// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client error types with a uniform failure surface.
//!
//! Every API method returns `Result<T, ApiError>`; nothing in the library
//! panics past its own boundary. Transport failures and backend rejections
//! are distinct variants so callers can tell an unreachable server apart
//! from a request the server understood and refused.

use validator::ValidationErrors;

/// Message shown for network-level failures, matching what end users see.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";

/// Fallback message when a backend rejection carries no error detail.
pub const GENERIC_BACKEND_ERROR: &str = "An error occurred";

/// Client error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never completed: offline, DNS failure, refused
    /// connection, or a malformed response stream.
    #[error("{NETWORK_ERROR_MESSAGE}")]
    Transport(#[source] reqwest::Error),

    /// The backend answered with a non-2xx status. Carries the backend's
    /// own error strings when it supplied any.
    #[error("backend rejected request (HTTP {status})")]
    Backend { status: u16, errors: Vec<String> },

    /// Client-side validation rejected the input before any network call.
    #[error("invalid input")]
    Validation(Vec<String>),

    /// The token store could not be written or cleared.
    #[error("token store error: {0}")]
    Token(#[from] std::io::Error),
}

impl ApiError {
    /// Human-readable error strings for form-level or toast-level display.
    pub fn error_strings(&self) -> Vec<String> {
        match self {
            ApiError::Transport(_) => vec![NETWORK_ERROR_MESSAGE.to_string()],
            ApiError::Backend { errors, .. } => errors.clone(),
            ApiError::Validation(messages) => messages.clone(),
            ApiError::Token(err) => vec![err.to_string()],
        }
    }

    /// True when the backend explicitly refused the credentials or token.
    pub fn is_auth_rejection(&self) -> bool {
        matches!(
            self,
            ApiError::Backend {
                status: 401 | 403,
                ..
            }
        )
    }
}

/// Flatten `validator` output into per-field display messages.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            match &error.message {
                Some(message) => messages.push(message.to_string()),
                None => messages.push(format!("{field} is invalid")),
            }
        }
    }
    // field_errors() iterates a map; sort so callers see a stable order
    messages.sort();
    messages
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ApiError>;
