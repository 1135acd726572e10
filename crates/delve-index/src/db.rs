use delve_types::{Metadata, ResearchResponse, SessionOrder};
use rusqlite::Connection;
use std::path::Path;

use crate::{
    Error, Result,
    queries::{self, entry, session},
    records::{EntryRecord, SessionRecord, SessionSummary},
    schema,
};

/// Number of sessions a listing returns when the caller does not say
pub const DEFAULT_LIST_LIMIT: usize = 10;

/// Durable store for research sessions and their entries.
///
/// Every mutating operation runs in its own transaction: it either fully
/// applies or leaves the file untouched. Lookups of missing rows return
/// `None`/empty/`false` rather than an error.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        schema::init_schema(&conn)?;

        tracing::debug!(path = %db_path.display(), "opened session database");
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::init_schema(&conn)?;
        Ok(Self { conn })
    }

    // Session operations

    pub fn create_session(
        &self,
        topic: &str,
        model_used: &str,
        metadata: Option<&Metadata>,
    ) -> Result<i64> {
        // Stored as given; only an all-whitespace topic is refused
        if topic.trim().is_empty() {
            return Err(Error::Validation(
                "session topic must not be empty".to_string(),
            ));
        }

        let empty = Metadata::new();
        let metadata = metadata.unwrap_or(&empty);
        let id = session::insert(
            &self.conn,
            topic,
            model_used,
            metadata,
            &queries::now_ts(),
        )?;

        tracing::info!(session_id = id, topic, model = model_used, "created session");
        Ok(id)
    }

    pub fn get_session(&self, session_id: i64) -> Result<Option<SessionRecord>> {
        session::get_by_id(&self.conn, session_id)
    }

    pub fn list_sessions(&self, limit: usize) -> Result<Vec<SessionSummary>> {
        session::list(&self.conn, SessionOrder::NewestFirst, limit)
    }

    pub fn list_sessions_ordered(
        &self,
        order: SessionOrder,
        limit: usize,
    ) -> Result<Vec<SessionSummary>> {
        session::list(&self.conn, order, limit)
    }

    /// Delete a session and all of its entries.
    ///
    /// Entries go first so no entry ever references a missing session.
    /// Returns whether the session existed.
    pub fn delete_session(&mut self, session_id: i64) -> Result<bool> {
        let tx = self.conn.transaction()?;

        if !session::exists(&tx, session_id)? {
            return Ok(false);
        }

        let removed_entries = entry::delete_for_session(&tx, session_id)?;
        let removed = session::delete(&tx, session_id)?;
        tx.commit()?;

        tracing::info!(session_id, removed_entries, "deleted session");
        Ok(removed > 0)
    }

    // Entry operations

    /// Append one research turn to a session and bump its `updated_at`.
    ///
    /// Both writes share one transaction. Fails with `Error::NotFound` when
    /// the session does not exist; nothing is written in that case.
    pub fn add_entry(
        &mut self,
        session_id: i64,
        query: &str,
        response: &ResearchResponse,
    ) -> Result<i64> {
        let tx = self.conn.transaction()?;

        if !session::exists(&tx, session_id)? {
            return Err(Error::NotFound(format!("session {}", session_id)));
        }

        let now = queries::now_ts();
        let entry_id = entry::insert(&tx, session_id, query, response, &now)?;
        session::touch(&tx, session_id, &now)?;
        tx.commit()?;

        tracing::debug!(session_id, entry_id, "appended research entry");
        Ok(entry_id)
    }

    pub fn get_session_entries(&self, session_id: i64) -> Result<Vec<EntryRecord>> {
        entry::list_for_session(&self.conn, session_id)
    }

    pub fn count_entries(&self, session_id: i64) -> Result<usize> {
        entry::count_for_session(&self.conn, session_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response_with_sources() -> ResearchResponse {
        ResearchResponse::new("Quantum Computing", "A qubit is a two-state quantum system.")
            .with_sources([
                "https://en.wikipedia.org/wiki/Qubit",
                "https://example.org/qubits",
            ])
            .with_tools(["search", "wikipedia"])
    }

    #[test]
    fn test_create_session_returns_active_row() -> Result<()> {
        let db = Database::open_in_memory()?;

        let id = db.create_session("Quantum Computing", "model-x", None)?;
        assert_eq!(id, 1);

        let session = db.get_session(1)?.unwrap();
        assert_eq!(session.topic, "Quantum Computing");
        assert_eq!(session.model_used, "model-x");
        assert!(session.status.is_active());
        assert_eq!(session.created_at, session.updated_at);
        assert!(session.metadata.is_empty());
        Ok(())
    }

    #[test]
    fn test_create_session_rejects_blank_topic() -> Result<()> {
        let db = Database::open_in_memory()?;

        let err = db.create_session("   ", "model-x", None).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(db.list_sessions(DEFAULT_LIST_LIMIT)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_create_session_keeps_topic_as_given() -> Result<()> {
        let db = Database::open_in_memory()?;

        let id = db.create_session("  Padded topic ", "model-x", None)?;
        let session = db.get_session(id)?.unwrap();
        assert_eq!(session.topic, "  Padded topic ");
        Ok(())
    }

    #[test]
    fn test_metadata_roundtrip() -> Result<()> {
        let db = Database::open_in_memory()?;
        let mut metadata = Metadata::new();
        metadata.insert("audience".to_string(), json!("undergrad"));
        metadata.insert("depth".to_string(), json!(3));

        let id = db.create_session("Topic", "model-x", Some(&metadata))?;

        let session = db.get_session(id)?.unwrap();
        assert_eq!(session.metadata, metadata);
        Ok(())
    }

    #[test]
    fn test_add_entry_keeps_sources() -> Result<()> {
        let mut db = Database::open_in_memory()?;
        let id = db.create_session("Quantum Computing", "model-x", None)?;

        db.add_entry(id, "What is qubit?", &response_with_sources())?;

        let entries = db.get_session_entries(id)?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].query, "What is qubit?");
        assert_eq!(entries[0].sources.len(), 2);
        assert_eq!(entries[0].tools_used, vec!["search", "wikipedia"]);
        Ok(())
    }

    #[test]
    fn test_add_entry_to_missing_session_writes_nothing() -> Result<()> {
        let mut db = Database::open_in_memory()?;

        let err = db
            .add_entry(7, "q", &ResearchResponse::new("t", "r"))
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(db.get_session_entries(7)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_add_entry_bumps_updated_at() -> Result<()> {
        let mut db = Database::open_in_memory()?;
        let id = db.create_session("Topic", "model-x", None)?;
        let before = db.get_session(id)?.unwrap();

        db.add_entry(id, "q", &ResearchResponse::new("Topic", "r"))?;

        let after = db.get_session(id)?.unwrap();
        assert!(after.updated_at >= before.updated_at);
        assert!(after.updated_at >= after.created_at);
        assert_eq!(after.created_at, before.created_at);
        Ok(())
    }

    #[test]
    fn test_delete_unknown_session_is_false() -> Result<()> {
        let mut db = Database::open_in_memory()?;
        db.create_session("Keep me", "model-x", None)?;

        assert!(!db.delete_session(999)?);
        assert_eq!(db.list_sessions(DEFAULT_LIST_LIMIT)?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_list_carries_entry_counts() -> Result<()> {
        let mut db = Database::open_in_memory()?;
        let a = db.create_session("A", "model-x", None)?;
        let b = db.create_session("B", "model-x", None)?;
        db.add_entry(a, "q1", &ResearchResponse::new("A", "r1"))?;
        db.add_entry(a, "q2", &ResearchResponse::new("A", "r2"))?;

        let sessions = db.list_sessions(DEFAULT_LIST_LIMIT)?;
        let count_of = |id: i64| {
            sessions
                .iter()
                .find(|s| s.id == id)
                .map(|s| s.entry_count)
                .unwrap()
        };
        assert_eq!(count_of(a), 2);
        assert_eq!(count_of(b), 0);
        assert_eq!(db.count_entries(a)?, 2);
        Ok(())
    }

    #[test]
    fn test_list_respects_limit() -> Result<()> {
        let db = Database::open_in_memory()?;
        for i in 1..=5 {
            db.create_session(&format!("Topic {}", i), "model-x", None)?;
        }

        assert_eq!(db.list_sessions(3)?.len(), 3);
        assert_eq!(db.list_sessions(DEFAULT_LIST_LIMIT)?.len(), 5);
        Ok(())
    }
}
