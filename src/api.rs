// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CTFd API client.
//!
//! Single point of contact with the competition backend. Every method
//! returns `Result` instead of panicking, attaches the stored session
//! token when one exists, and normalizes the wire envelope into typed
//! payloads. Challenge and scoreboard reads can optionally degrade to
//! fixture data (demo mode) instead of surfacing a failure.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{validation_messages, ApiError, Result, GENERIC_BACKEND_ERROR};
use crate::fixtures;
use crate::models::{
    AttemptRequest, AttemptResponse, AuthToken, Challenge, LoginRequest, RegisterRequest,
    ScoreboardEntry, User,
};
use crate::token::TokenStore;

/// CTFd API client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<TokenStore>,
    demo_fallback: bool,
}

impl ApiClient {
    /// Create a client for `base_url`, reading auth state from `tokens`.
    ///
    /// The cookie store is enabled so backend session cookies survive
    /// across requests alongside the token header.
    pub fn new(
        base_url: impl Into<String>,
        tokens: Arc<TokenStore>,
        demo_fallback: bool,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(ApiError::Transport)?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
            demo_fallback,
        })
    }

    /// Obtain a session token from credentials.
    ///
    /// POST `/api/v1/tokens`. Does not store the token; that is the
    /// session layer's decision.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthToken> {
        request
            .validate()
            .map_err(|e| ApiError::Validation(validation_messages(&e)))?;
        self.post_json("/api/v1/tokens", request).await
    }

    /// Create a new account.
    ///
    /// POST `/api/v1/users`.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User> {
        request
            .validate()
            .map_err(|e| ApiError::Validation(validation_messages(&e)))?;
        self.post_json("/api/v1/users", request).await
    }

    /// Fetch the profile of the currently authenticated user.
    ///
    /// GET `/api/v1/users/me`. A rejection here is the signal that the
    /// stored token is stale.
    pub async fn current_user(&self) -> Result<User> {
        self.get_json("/api/v1/users/me").await
    }

    /// List all visible challenges.
    ///
    /// GET `/api/v1/challenges`. In demo mode a failed fetch is replaced
    /// by the fixture list and reported as success.
    pub async fn challenges(&self) -> Result<Vec<Challenge>> {
        match self.get_json("/api/v1/challenges").await {
            Ok(challenges) => Ok(challenges),
            Err(err) if self.demo_fallback => {
                tracing::warn!(error = %err, "challenge fetch failed, serving demo fixtures");
                Ok(fixtures::demo_challenges())
            }
            Err(err) => Err(err),
        }
    }

    /// Fetch a single challenge by ID. No demo fallback.
    pub async fn challenge(&self, id: i64) -> Result<Challenge> {
        self.get_json(&format!("/api/v1/challenges/{id}")).await
    }

    /// Submit a flag for a challenge.
    ///
    /// POST `/api/v1/challenges/attempt`. Empty submissions are rejected
    /// before the request; the backend is authoritative for everything
    /// else, including rate limiting.
    pub async fn submit_flag(&self, request: &AttemptRequest) -> Result<AttemptResponse> {
        if request.submission.trim().is_empty() {
            return Err(ApiError::Validation(vec!["Flag is required".to_string()]));
        }
        self.post_json("/api/v1/challenges/attempt", request).await
    }

    /// Fetch the ranked scoreboard.
    ///
    /// GET `/api/v1/scoreboard`. Same demo fallback policy as
    /// [`challenges`](Self::challenges).
    pub async fn scoreboard(&self) -> Result<Vec<ScoreboardEntry>> {
        match self.get_json("/api/v1/scoreboard").await {
            Ok(entries) => Ok(entries),
            Err(err) if self.demo_fallback => {
                tracing::warn!(error = %err, "scoreboard fetch failed, serving demo fixtures");
                Ok(fixtures::demo_scoreboard())
            }
            Err(err) => Err(err),
        }
    }

    /// Generic GET request with envelope handling.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.http.get(format!("{}{}", self.base_url, path));
        let response = self
            .attach_token(request)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        self.read_envelope(response).await
    }

    /// Generic POST request with a JSON body and envelope handling.
    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let request = self.http.post(format!("{}{}", self.base_url, path)).json(body);
        let response = self
            .attach_token(request)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        self.read_envelope(response).await
    }

    /// Attach `Authorization: Token <value>` when a session token is stored.
    fn attach_token(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.tokens.get() {
            Some(token) => request.header(reqwest::header::AUTHORIZATION, format!("Token {token}")),
            None => request,
        }
    }

    /// Normalize a response into the typed payload.
    ///
    /// Non-2xx statuses become [`ApiError::Backend`] carrying the
    /// backend's `errors` list, else its `message`, else a generic
    /// string. Success bodies are unwrapped from the `{ data: ... }`
    /// envelope, falling back to the bare body for deployments that skip
    /// the wrapper.
    async fn read_envelope<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await.map_err(ApiError::Transport)?;

        if !status.is_success() {
            return Err(backend_failure(status.as_u16(), &body));
        }

        if let Ok(envelope) = serde_json::from_str::<Wire<T>>(&body) {
            if let Some(data) = envelope.data {
                return Ok(data);
            }
        }
        serde_json::from_str::<T>(&body).map_err(|_| backend_failure(status.as_u16(), &body))
    }
}

/// CTFd success envelope; only the payload matters here.
#[derive(Deserialize)]
struct Wire<T> {
    data: Option<T>,
}

/// Failure body fields the backend may supply.
#[derive(Default, Deserialize)]
struct WireFailure {
    #[serde(default)]
    errors: Option<Vec<String>>,
    #[serde(default)]
    message: Option<String>,
}

fn backend_failure(status: u16, body: &str) -> ApiError {
    let parsed: WireFailure = serde_json::from_str(body).unwrap_or_default();
    let errors = parsed
        .errors
        .filter(|errors| !errors.is_empty())
        .or_else(|| parsed.message.map(|message| vec![message]))
        .unwrap_or_else(|| vec![GENERIC_BACKEND_ERROR.to_string()]);
    ApiError::Backend { status, errors }
}
