// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared test helpers: an in-process stub of the CTFd backend.
//!
//! The stub speaks just enough of the wire protocol for the client's
//! endpoints, with switches to force individual routes to fail.

// Each test binary compiles this module separately and uses a subset
#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use ctfd_client::{ApiClient, TokenStore};

/// Credentials of the pre-seeded account.
pub const SEED_NAME: &str = "operator";
pub const SEED_EMAIL: &str = "operator@example.com";
pub const SEED_PASSWORD: &str = "hunter2secure";

/// Flag submissions the stub recognizes.
pub const FLAG_CORRECT: &str = "flag{correct}";
pub const FLAG_ALREADY_SOLVED: &str = "flag{dupe}";
pub const FLAG_RATELIMITED: &str = "flag{toofast}";

#[derive(Clone)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Default)]
pub struct StubState {
    pub accounts: Mutex<HashMap<String, Account>>,
    /// token value -> account name
    pub issued_tokens: Mutex<HashMap<String, String>>,
    /// Force POST /api/v1/tokens to fail (register-then-login tests)
    pub reject_logins: AtomicBool,
    pub fail_challenges: AtomicBool,
    pub fail_scoreboard: AtomicBool,
    next_id: AtomicI64,
    token_counter: AtomicI64,
}

impl StubState {
    pub fn seeded() -> Self {
        let state = Self::default();
        state.next_id.store(2, Ordering::SeqCst);
        state.accounts.lock().unwrap().insert(
            SEED_NAME.to_string(),
            Account {
                id: 1,
                name: SEED_NAME.to_string(),
                email: SEED_EMAIL.to_string(),
                password: SEED_PASSWORD.to_string(),
            },
        );
        state
    }

    pub fn has_account(&self, name: &str) -> bool {
        self.accounts.lock().unwrap().contains_key(name)
    }

    fn issue_token(&self, name: &str) -> String {
        let n = self.token_counter.fetch_add(1, Ordering::SeqCst);
        let token = format!("tok-{name}-{n}");
        self.issued_tokens
            .lock()
            .unwrap()
            .insert(token.clone(), name.to_string());
        token
    }

    fn account_for_header(&self, headers: &HeaderMap) -> Option<Account> {
        let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
        let token = value.strip_prefix("Token ")?;
        let name = self.issued_tokens.lock().unwrap().get(token)?.clone();
        self.accounts.lock().unwrap().get(&name).cloned()
    }
}

/// A running stub backend bound to an ephemeral port.
pub struct StubServer {
    pub base_url: String,
    pub state: Arc<StubState>,
    task: tokio::task::JoinHandle<()>,
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[allow(dead_code)]
pub async fn spawn_stub() -> StubServer {
    let state = Arc::new(StubState::seeded());
    let app = router(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub local addr");

    let task = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });

    StubServer {
        base_url: format!("http://{addr}"),
        state,
        task,
    }
}

/// Client + in-memory token store pointed at the stub.
#[allow(dead_code)]
pub fn client(server: &StubServer, demo_fallback: bool) -> (ApiClient, Arc<TokenStore>) {
    let tokens = Arc::new(TokenStore::in_memory());
    let api = ApiClient::new(&server.base_url, tokens.clone(), demo_fallback)
        .expect("build API client");
    (api, tokens)
}

fn router(state: Arc<StubState>) -> Router {
    Router::new()
        .route("/api/v1/tokens", post(login))
        .route("/api/v1/users", post(register))
        .route("/api/v1/users/me", get(me))
        .route("/api/v1/challenges", get(challenges))
        .route("/api/v1/challenges/{id}", get(challenge))
        .route("/api/v1/challenges/attempt", post(attempt))
        .route("/api/v1/scoreboard", get(scoreboard))
        .with_state(state)
}

fn user_json(account: &Account) -> Value {
    json!({
        "id": account.id,
        "name": account.name,
        "email": account.email,
        "team_id": null,
        "affiliation": "Stub CTF",
    })
}

async fn login(
    State(state): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if state.reject_logins.load(Ordering::SeqCst) {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"success": false, "message": "Service temporarily unavailable"})),
        );
    }

    let name = body["name"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    let matched = state
        .accounts
        .lock()
        .unwrap()
        .get(name)
        .filter(|account| account.password == password)
        .cloned();

    match matched {
        Some(account) => {
            let token = state.issue_token(&account.name);
            (
                StatusCode::OK,
                Json(json!({"success": true, "data": {"token": token}})),
            )
        }
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "success": false,
                "errors": ["Your username or password is incorrect"],
            })),
        ),
    }
}

async fn register(
    State(state): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let name = body["name"].as_str().unwrap_or_default().to_string();
    let email = body["email"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default().to_string();

    let mut accounts = state.accounts.lock().unwrap();
    if accounts.contains_key(&name) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "errors": ["That user name is already taken"],
            })),
        );
    }

    let account = Account {
        id: state.next_id.fetch_add(1, Ordering::SeqCst),
        name: name.clone(),
        email,
        password,
    };
    let response = user_json(&account);
    accounts.insert(name, account);

    (
        StatusCode::OK,
        Json(json!({"success": true, "data": response})),
    )
}

async fn me(State(state): State<Arc<StubState>>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    match state.account_for_header(&headers) {
        Some(account) => (
            StatusCode::OK,
            Json(json!({"success": true, "data": user_json(&account)})),
        ),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "message": "Invalid token"})),
        ),
    }
}

fn challenge_list() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "name": "Login Bypass",
            "description": "The admin panel trusts its cookies too much.",
            "category": "Web",
            "value": 100,
            "type": "standard",
            "state": "visible",
            "solves": 12,
            "solved_by_me": false,
            "tags": [{"value": "beginner"}],
        }),
        json!({
            "id": 2,
            "name": "Ghost in the Shellcode",
            "description": "A tiny binary with a big stack problem.",
            "category": "Pwn",
            "value": 450,
            "type": "standard",
            "state": "visible",
            "solves": 2,
            "solved_by_me": true,
            "connection_info": "nc pwn.stub.test 31337",
            "files": ["/files/ghost.tar.gz"],
        }),
    ]
}

async fn challenges(State(state): State<Arc<StubState>>) -> (StatusCode, Json<Value>) {
    if state.fail_challenges.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"success": false, "message": "internal server error"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({"success": true, "data": challenge_list()})),
    )
}

async fn challenge(
    State(state): State<Arc<StubState>>,
    Path(id): Path<i64>,
) -> (StatusCode, Json<Value>) {
    if state.fail_challenges.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"success": false, "message": "internal server error"})),
        );
    }
    match challenge_list().into_iter().find(|c| c["id"] == json!(id)) {
        Some(found) => (
            StatusCode::OK,
            Json(json!({"success": true, "data": found})),
        ),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"success": false, "message": "Challenge not found"})),
        ),
    }
}

async fn attempt(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if state.account_for_header(&headers).is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "message": "Invalid token"})),
        );
    }

    let submission = body["submission"].as_str().unwrap_or_default();
    let (status, message) = match submission {
        FLAG_CORRECT => ("correct", "Correct"),
        FLAG_ALREADY_SOLVED => ("already_solved", "You already solved this"),
        FLAG_RATELIMITED => ("ratelimited", "You're submitting flags too fast. Slow down."),
        _ => ("incorrect", "Incorrect"),
    };

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": {"status": status, "message": message},
        })),
    )
}

async fn scoreboard(State(state): State<Arc<StubState>>) -> (StatusCode, Json<Value>) {
    if state.fail_scoreboard.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"success": false, "message": "internal server error"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": [
                {"pos": 1, "account_id": 101, "account_url": "#", "name": "Red Pwners", "score": 1250},
                {"pos": 2, "account_id": 102, "account_url": "#", "name": "Blue Team Alpha", "score": 1100},
                {"pos": 3, "account_id": 103, "account_url": "#", "name": "Null Pointers", "score": 950},
            ],
        })),
    )
}
