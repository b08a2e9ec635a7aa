//! Scoreboard projection.

use serde::{Deserialize, Serialize};

/// A ranked participant on the live scoreboard.
///
/// The whole list is replaced on every refresh; entries are never
/// patched individually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreboardEntry {
    /// Rank position (1-based)
    pub pos: i64,
    pub account_id: i64,
    pub account_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oauth_id: Option<String>,
    pub name: String,
    pub score: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bracket: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bracket_id: Option<i64>,
    /// Individual members when the account is a team
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<TeamMember>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: i64,
    pub name: String,
    pub score: i64,
}
