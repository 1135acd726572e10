use chrono::{DateTime, Utc};
use delve_types::{Metadata, ResearchResponse, SessionStatus};
use serde::{Deserialize, Serialize};

/// Complete session row from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Store-assigned identifier, strictly increasing.
    pub id: i64,
    /// What the session researches. Never empty.
    pub topic: String,
    /// Name of the LLM variant the session was started with.
    pub model_used: String,
    pub created_at: DateTime<Utc>,
    /// Refreshed each time an entry is appended; never earlier than `created_at`.
    pub updated_at: DateTime<Utc>,
    pub status: SessionStatus,
    #[serde(default)]
    pub metadata: Metadata,
}

/// One research turn within a session. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub id: i64,
    pub session_id: i64,
    pub query: String,
    pub result: String,
    pub sources: Vec<String>,
    pub tools_used: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl EntryRecord {
    /// Rebuild the agent answer this entry was recorded from.
    pub fn to_response(&self, topic: &str) -> ResearchResponse {
        ResearchResponse {
            topic: topic.to_string(),
            result: self.result.clone(),
            sources: self.sources.clone(),
            tools_used: self.tools_used.clone(),
        }
    }
}

/// Lightweight session row for list operations.
///
/// Carries the entry count so a listing needs no per-session follow-up read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: i64,
    pub topic: String,
    pub model_used: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub status: SessionStatus,
    pub entry_count: usize,
}
