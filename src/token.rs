// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persisted session token with a fixed 7-day lifetime.
//!
//! The native-client counterpart of the portal's session cookie: one
//! opaque bearer credential, written on login, read on every outgoing
//! request, destroyed on logout or invalid-token detection. An absent or
//! expired token is a normal logged-out state, never an error, so `get`
//! is infallible. Writes go through a temp file + rename so a crash
//! mid-write cannot leave a truncated token behind.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::Result;

/// Token lifetime, matching the portal's 7-day session cookie.
pub const TOKEN_TTL_DAYS: i64 = 7;

/// On-disk token record.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredToken {
    token: String,
    /// Past this instant the token reads as absent
    expires_at: DateTime<Utc>,
}

/// Session token store.
///
/// File-backed in the application; `in_memory()` provides an offline
/// variant for tests.
pub struct TokenStore {
    backend: Backend,
}

enum Backend {
    File(PathBuf),
    Memory(Mutex<Option<StoredToken>>),
}

impl TokenStore {
    /// Store backed by a JSON file at `path`.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            backend: Backend::File(path.into()),
        }
    }

    /// Ephemeral store for offline tests.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(Mutex::new(None)),
        }
    }

    /// Current token, or `None` when absent or expired.
    ///
    /// An expired record is purged on read so later calls short-circuit.
    pub fn get(&self) -> Option<String> {
        match &self.backend {
            Backend::File(path) => {
                let stored = read_token_file(path)?;
                if stored.expires_at <= Utc::now() {
                    tracing::debug!("stored session token expired, purging");
                    let _ = fs::remove_file(path);
                    return None;
                }
                Some(stored.token)
            }
            Backend::Memory(slot) => {
                let mut slot = slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                match &*slot {
                    Some(stored) if stored.expires_at > Utc::now() => Some(stored.token.clone()),
                    Some(_) => {
                        *slot = None;
                        None
                    }
                    None => None,
                }
            }
        }
    }

    /// Persist `token` with a fresh 7-day expiry.
    pub fn set(&self, token: &str) -> Result<()> {
        let stored = StoredToken {
            token: token.to_string(),
            expires_at: Utc::now() + Duration::days(TOKEN_TTL_DAYS),
        };
        match &self.backend {
            Backend::File(path) => write_token_file(path, &stored)?,
            Backend::Memory(slot) => {
                *slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(stored);
            }
        }
        Ok(())
    }

    /// Remove the token. Succeeds when no token is stored.
    pub fn clear(&self) -> Result<()> {
        match &self.backend {
            Backend::File(path) => match fs::remove_file(path) {
                Ok(()) => Ok(()),
                Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
                Err(err) => Err(err.into()),
            },
            Backend::Memory(slot) => {
                *slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
                Ok(())
            }
        }
    }
}

fn read_token_file(path: &Path) -> Option<StoredToken> {
    let raw = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(stored) => Some(stored),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "unreadable token file, ignoring");
            None
        }
    }
}

fn write_token_file(path: &Path, stored: &StoredToken) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let raw = serde_json::to_string(stored).map_err(io::Error::other)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, raw)?;
    fs::rename(&tmp, path)
}
