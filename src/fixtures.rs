// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fixed demo payloads served when the fixture fallback is enabled.
//!
//! Content is deliberately static: the fallback is a demo mode, not a
//! cache of live data.

use crate::models::{Challenge, ChallengeState, ScoreboardEntry};

/// The fixed challenge list served in demo mode.
pub fn demo_challenges() -> Vec<Challenge> {
    vec![
        challenge(1, "SQL Injection 101", "Basic SQL injection vulnerability in search parameter.", "Web", 100, 42, true),
        challenge(2, "Buffer Overflow Basic", "Classic stack-based buffer overflow exploit.", "Pwn", 200, 15, false),
        challenge(3, "RSA Oracle", "Padding oracle attack against RSA implementation.", "Crypto", 300, 8, false),
        challenge(4, "Missing Headers", "Security headers missing from response.", "Web", 150, 89, false),
        challenge(5, "Reverse Me", "Find the hidden flag in the binary string.", "Reverse Engineering", 250, 12, false),
        challenge(6, "Forensics 101", "Extract metadata from the provided image file.", "Forensics", 100, 156, true),
    ]
}

/// The fixed scoreboard served in demo mode.
pub fn demo_scoreboard() -> Vec<ScoreboardEntry> {
    vec![
        entry(1, 101, "Red Pwners", 1250),
        entry(2, 102, "Blue Team Alpha", 1100),
        entry(3, 103, "Null Pointers", 950),
        entry(4, 104, "Cyber Ninjas", 800),
        entry(5, 105, "Script Kiddies", 600),
    ]
}

fn challenge(
    id: i64,
    name: &str,
    description: &str,
    category: &str,
    value: i64,
    solves: i64,
    solved_by_me: bool,
) -> Challenge {
    Challenge {
        id,
        name: name.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        value,
        kind: "standard".to_string(),
        state: ChallengeState::Visible,
        max_attempts: None,
        attempts: None,
        solves,
        solved_by_me,
        tags: None,
        files: None,
        hints: None,
        connection_info: None,
    }
}

fn entry(pos: i64, account_id: i64, name: &str, score: i64) -> ScoreboardEntry {
    ScoreboardEntry {
        pos,
        account_id,
        account_url: "#".to_string(),
        oauth_id: None,
        name: name.to_string(),
        score,
        bracket: None,
        bracket_id: None,
        members: None,
        id: Some(pos),
        account_type: Some("team".to_string()),
        affiliation: None,
    }
}
