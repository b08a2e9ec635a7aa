//! Challenge projection and display helpers.

use serde::{Deserialize, Serialize};

/// Canonical challenge categories.
pub const CHALLENGE_CATEGORIES: [&str; 6] = ["Web", "Crypto", "Forensics", "Pwn", "Reverse", "Misc"];

/// A competition task as displayed to players.
///
/// Read-only on this side: solved status only changes via backend
/// confirmation after a flag submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub category: String,
    /// Point value
    pub value: i64,
    /// Challenge type as reported by the backend ("standard", "dynamic", ...)
    #[serde(rename = "type")]
    pub kind: String,
    pub state: ChallengeState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempts: Option<i64>,
    /// Total solve count
    pub solves: i64,
    pub solved_by_me: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    /// Downloadable attachment paths
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<Hint>>,
    /// Host/port line for netcat-style challenges
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_info: Option<String>,
}

impl Challenge {
    /// Difficulty bucket derived from the point value.
    pub fn difficulty(&self) -> Difficulty {
        Difficulty::from_points(self.value)
    }
}

/// Visibility state of a challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeState {
    Visible,
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hint {
    pub id: i64,
    pub cost: i64,
    /// Present only once the hint has been unlocked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Difficulty bucket by point value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// <= 100 points is easy, <= 300 medium, everything above hard.
    pub fn from_points(points: i64) -> Self {
        if points <= 100 {
            Difficulty::Easy
        } else if points <= 300 {
            Difficulty::Medium
        } else {
            Difficulty::Hard
        }
    }
}
