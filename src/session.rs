// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authentication session lifecycle.
//!
//! `Session` owns the relationship between the stored token and the
//! in-memory user profile. Invariant: a profile is held if and only if a
//! token is stored and the last profile fetch succeeded - any fetch
//! failure clears both, so a stale token can never read as authenticated.
//!
//! All mutating operations (`initialize`, `login`, `register`, `logout`,
//! `refresh_user`) are serialized through a single-flight guard:
//! overlapping callers queue instead of interleaving, which removes the
//! last-response-wins race of unguarded concurrent logins. Construct one
//! `Session` at application start and share it; nothing else may write
//! the token or the user.

use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::{LoginRequest, RegisterRequest, User};
use crate::token::TokenStore;

/// Authentication state as seen by the rest of the application.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Constructed but not yet initialized
    Unknown,
    Anonymous,
    Authenticated(User),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }
}

/// Process-wide session, explicitly constructed and shared by handle.
pub struct Session {
    api: ApiClient,
    tokens: Arc<TokenStore>,
    state: RwLock<SessionState>,
    /// Single-flight guard: at most one session mutation in flight.
    auth_gate: Mutex<()>,
}

impl Session {
    /// Create a session over an API client and the shared token store.
    ///
    /// The store must be the same one the client reads, otherwise the
    /// token the session persists is not the one requests carry.
    pub fn new(api: ApiClient, tokens: Arc<TokenStore>) -> Self {
        Self {
            api,
            tokens,
            state: RwLock::new(SessionState::Unknown),
            auth_gate: Mutex::new(()),
        }
    }

    /// Mount-time initialization.
    ///
    /// No stored token means anonymous immediately; otherwise the token
    /// is validated by fetching the profile, and purged if rejected.
    pub async fn initialize(&self) -> SessionState {
        let _gate = self.auth_gate.lock().await;
        self.refresh_user_locked().await
    }

    /// Re-fetch the profile and update authentication state. Idempotent.
    pub async fn refresh_user(&self) -> SessionState {
        let _gate = self.auth_gate.lock().await;
        self.refresh_user_locked().await
    }

    /// Authenticate with credentials.
    ///
    /// On success the token is persisted and the profile fetched; the
    /// authenticated user is returned. Any failure leaves the session
    /// anonymous with no token stored.
    pub async fn login(&self, request: &LoginRequest) -> Result<User> {
        let _gate = self.auth_gate.lock().await;
        self.login_locked(request).await
    }

    /// Create an account, then log in with the same credentials.
    ///
    /// Compound contract: a registration failure or a failed auto-login
    /// both surface as the error of the failing step. When registration
    /// succeeded but the auto-login did not, the account exists
    /// server-side while the session stays anonymous.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User> {
        let _gate = self.auth_gate.lock().await;
        let created = self.api.register(request).await?;
        tracing::info!(user = %created.name, "Account registered, attempting login");

        self.login_locked(&LoginRequest {
            name: request.name.clone(),
            password: request.password.clone(),
        })
        .await
    }

    /// Drop the token and the user. Never fails on an absent token.
    pub async fn logout(&self) -> Result<()> {
        let _gate = self.auth_gate.lock().await;
        self.tokens.clear()?;
        *self.state.write().await = SessionState::Anonymous;
        tracing::info!("Logged out");
        Ok(())
    }

    /// Current state snapshot.
    pub async fn state(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// The authenticated user, if any.
    pub async fn current_user(&self) -> Option<User> {
        match &*self.state.read().await {
            SessionState::Authenticated(user) => Some(user.clone()),
            _ => None,
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_authenticated()
    }

    /// Profile refresh with the gate already held.
    async fn refresh_user_locked(&self) -> SessionState {
        if self.tokens.get().is_none() {
            let state = SessionState::Anonymous;
            *self.state.write().await = state.clone();
            return state;
        }

        let state = match self.api.current_user().await {
            Ok(user) => SessionState::Authenticated(user),
            Err(err) => {
                tracing::debug!(error = %err, "Profile fetch rejected, dropping stored token");
                if let Err(clear_err) = self.tokens.clear() {
                    tracing::warn!(error = %clear_err, "Failed to clear stale token");
                }
                SessionState::Anonymous
            }
        };
        *self.state.write().await = state.clone();
        state
    }

    /// Login with the gate already held; `register` reuses this for its
    /// auto-login step without re-entering the mutex.
    async fn login_locked(&self, request: &LoginRequest) -> Result<User> {
        let auth = self.api.login(request).await?;
        self.tokens.set(&auth.token)?;

        match self.api.current_user().await {
            Ok(user) => {
                *self.state.write().await = SessionState::Authenticated(user.clone());
                tracing::info!(user = %user.name, "Logged in");
                Ok(user)
            }
            Err(err) => {
                // A token we cannot resolve to a profile is useless;
                // clear both halves so the invariant holds.
                if let Err(clear_err) = self.tokens.clear() {
                    tracing::warn!(error = %clear_err, "Failed to clear token after profile failure");
                }
                *self.state.write().await = SessionState::Anonymous;
                Err(err)
            }
        }
    }
}
