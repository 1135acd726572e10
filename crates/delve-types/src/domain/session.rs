use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Open key/value metadata attached to a session.
///
/// Kept as a first-class map in memory; only the store serializes it
/// (as JSON text). Empty by default.
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// Lifecycle status of a research session
///
/// Only `active` is written today. Any other stored value is preserved
/// verbatim so rows written by a newer build still load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SessionStatus {
    #[default]
    Active,
    Other(String),
}

impl SessionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            SessionStatus::Active => "active",
            SessionStatus::Other(s) => s.as_str(),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, SessionStatus::Active)
    }
}

impl From<String> for SessionStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "active" => SessionStatus::Active,
            _ => SessionStatus::Other(s),
        }
    }
}

impl From<&str> for SessionStatus {
    fn from(s: &str) -> Self {
        SessionStatus::from(s.to_string())
    }
}

impl From<SessionStatus> for String {
    fn from(status: SessionStatus) -> Self {
        match status {
            SessionStatus::Active => "active".to_string(),
            SessionStatus::Other(s) => s,
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order for session listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionOrder {
    /// Most recently updated first (updated_at DESC, id DESC)
    #[default]
    NewestFirst,
    /// Least recently updated first (updated_at ASC, id ASC)
    OldestFirst,
}
