use rusqlite::Connection;

use crate::Result;

// Schema version (increment when adding tables, columns or indexes)
pub const SCHEMA_VERSION: i32 = 1;

// NOTE: Schema Rationale
//
// Why additive-only (no drop on version mismatch)?
// - The database is the only copy of a user's research history
// - Every statement is IF NOT EXISTS, so opening an older file upgrades it in place
//
// Why AUTOINCREMENT on session ids?
// - Ids must be strictly increasing and never reused after a delete
//
// Why JSON text for metadata/sources/tools?
// - They are opaque to queries; only the store boundary serializes them

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            topic TEXT NOT NULL,
            model_used TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'active',
            metadata TEXT NOT NULL DEFAULT '{}'
        );

        CREATE TABLE IF NOT EXISTS research_entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            session_id INTEGER NOT NULL,
            query TEXT NOT NULL,
            result TEXT NOT NULL,
            sources TEXT NOT NULL DEFAULT '[]',
            tools_used TEXT NOT NULL DEFAULT '[]',
            timestamp TEXT NOT NULL,
            FOREIGN KEY (session_id) REFERENCES sessions(id)
        );

        CREATE INDEX IF NOT EXISTS idx_sessions_updated ON sessions(updated_at DESC);
        CREATE INDEX IF NOT EXISTS idx_sessions_created ON sessions(created_at DESC);
        CREATE INDEX IF NOT EXISTS idx_sessions_status ON sessions(status);
        CREATE INDEX IF NOT EXISTS idx_sessions_model ON sessions(model_used);
        CREATE INDEX IF NOT EXISTS idx_entries_session ON research_entries(session_id);
        CREATE INDEX IF NOT EXISTS idx_entries_timestamp ON research_entries(timestamp ASC);
        CREATE INDEX IF NOT EXISTS idx_entries_session_ts ON research_entries(session_id, timestamp ASC);
        "#,
    )?;

    let current_version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    if current_version < SCHEMA_VERSION {
        conn.execute_batch(&format!("PRAGMA user_version = {}", SCHEMA_VERSION))?;
    }

    Ok(())
}
