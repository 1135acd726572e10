use crate::{Error, Result};
use delve_index::{Database, EntryRecord, SessionRecord, SessionSummary};
use delve_types::{Metadata, ResearchResponse};
use std::path::Path;

/// Which session, if any, this process is appending to.
///
/// The snapshot is a cached copy of the session row; the store stays the
/// source of truth.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    NoActiveSession,
    ActiveSession { id: i64, snapshot: SessionRecord },
}

/// Process-local façade over the session store.
///
/// Tracks at most one active session. Owned by the caller and passed
/// explicitly to whatever needs it.
pub struct SessionManager {
    db: Database,
    state: SessionState,
}

impl SessionManager {
    pub fn open(db_path: &Path) -> Result<Self> {
        Ok(Self::from_database(Database::open(db_path)?))
    }

    pub fn in_memory() -> Result<Self> {
        Ok(Self::from_database(Database::open_in_memory()?))
    }

    pub fn from_database(db: Database) -> Self {
        Self {
            db,
            state: SessionState::NoActiveSession,
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_session_active(&self) -> bool {
        matches!(self.state, SessionState::ActiveSession { .. })
    }

    pub fn current_session(&self) -> Option<&SessionRecord> {
        match &self.state {
            SessionState::ActiveSession { snapshot, .. } => Some(snapshot),
            SessionState::NoActiveSession => None,
        }
    }

    pub fn current_session_id(&self) -> Option<i64> {
        match &self.state {
            SessionState::ActiveSession { id, .. } => Some(*id),
            SessionState::NoActiveSession => None,
        }
    }

    /// Start a new session and make it the active one.
    ///
    /// Any previously active session is simply no longer referenced; its row
    /// is left as it was.
    pub fn create_new_session(
        &mut self,
        topic: &str,
        model: &str,
        metadata: Option<&Metadata>,
    ) -> Result<i64> {
        let id = self.db.create_session(topic, model, metadata)?;
        let snapshot = self
            .db
            .get_session(id)?
            .ok_or_else(|| delve_index::Error::NotFound(format!("session {}", id)))?;

        if let Some(previous) = self.current_session_id() {
            tracing::debug!(previous, next = id, "replacing active session");
        }
        self.state = SessionState::ActiveSession { id, snapshot };
        Ok(id)
    }

    /// Make an existing session the active one.
    ///
    /// Returns `false` and keeps the current state when the id is unknown.
    pub fn load_session(&mut self, session_id: i64) -> Result<bool> {
        match self.db.get_session(session_id)? {
            Some(snapshot) => {
                self.state = SessionState::ActiveSession {
                    id: session_id,
                    snapshot,
                };
                tracing::debug!(session_id, "loaded session");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Entries of the active session, or nothing when none is active.
    pub fn current_session_entries(&self) -> Result<Vec<EntryRecord>> {
        match self.current_session_id() {
            Some(id) => Ok(self.db.get_session_entries(id)?),
            None => Ok(Vec::new()),
        }
    }

    /// Append one research turn to the active session.
    pub fn add_research_entry(&mut self, query: &str, response: &ResearchResponse) -> Result<i64> {
        let id = self.current_session_id().ok_or(Error::NoActiveSession)?;
        let entry_id = self.db.add_entry(id, query, response)?;
        self.refresh_snapshot()?;
        Ok(entry_id)
    }

    /// Delete a session and its entries.
    ///
    /// Deleting the active session leaves the manager with no active session.
    pub fn delete_session(&mut self, session_id: i64) -> Result<bool> {
        let deleted = self.db.delete_session(session_id)?;
        if deleted && self.current_session_id() == Some(session_id) {
            self.state = SessionState::NoActiveSession;
        }
        Ok(deleted)
    }

    pub fn list_recent_sessions(&self, limit: usize) -> Result<Vec<SessionSummary>> {
        Ok(self.db.list_sessions(limit)?)
    }

    pub fn get_session(&self, session_id: i64) -> Result<Option<SessionRecord>> {
        Ok(self.db.get_session(session_id)?)
    }

    pub fn get_session_entries(&self, session_id: i64) -> Result<Vec<EntryRecord>> {
        Ok(self.db.get_session_entries(session_id)?)
    }

    pub fn count_entries(&self, session_id: i64) -> Result<usize> {
        Ok(self.db.count_entries(session_id)?)
    }

    /// Append to any stored session without changing which one is active.
    pub fn add_entry_to(
        &mut self,
        session_id: i64,
        query: &str,
        response: &ResearchResponse,
    ) -> Result<i64> {
        let entry_id = self.db.add_entry(session_id, query, response)?;
        if self.current_session_id() == Some(session_id) {
            self.refresh_snapshot()?;
        }
        Ok(entry_id)
    }

    fn refresh_snapshot(&mut self) -> Result<()> {
        let Some(id) = self.current_session_id() else {
            return Ok(());
        };

        match self.db.get_session(id)? {
            Some(snapshot) => self.state = SessionState::ActiveSession { id, snapshot },
            None => self.state = SessionState::NoActiveSession,
        }
        Ok(())
    }
}
