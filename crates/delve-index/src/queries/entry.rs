use delve_types::ResearchResponse;
use rusqlite::{Connection, params};

use super::{json_column, ts_column};
use crate::{Result, records::EntryRecord};

pub fn insert(
    conn: &Connection,
    session_id: i64,
    query: &str,
    response: &ResearchResponse,
    ts: &str,
) -> Result<i64> {
    let sources = serde_json::to_string(&response.sources)?;
    let tools_used = serde_json::to_string(&response.tools_used)?;

    conn.execute(
        r#"
        INSERT INTO research_entries (session_id, query, result, sources, tools_used, timestamp)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
        params![session_id, query, &response.result, sources, tools_used, ts],
    )?;

    Ok(conn.last_insert_rowid())
}

/// Entries of one session in creation order (timestamp, then id).
pub fn list_for_session(conn: &Connection, session_id: i64) -> Result<Vec<EntryRecord>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, session_id, query, result, sources, tools_used, timestamp
        FROM research_entries
        WHERE session_id = ?1
        ORDER BY timestamp ASC, id ASC
        "#,
    )?;

    let entries = stmt
        .query_map([session_id], |row| {
            Ok(EntryRecord {
                id: row.get(0)?,
                session_id: row.get(1)?,
                query: row.get(2)?,
                result: row.get(3)?,
                sources: json_column(row, 4)?,
                tools_used: json_column(row, 5)?,
                timestamp: ts_column(row, 6)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

    Ok(entries)
}

pub fn count_for_session(conn: &Connection, session_id: i64) -> Result<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM research_entries WHERE session_id = ?1",
        [session_id],
        |row| row.get(0),
    )?;

    Ok(count as usize)
}

pub fn delete_for_session(conn: &Connection, session_id: i64) -> Result<usize> {
    let deleted = conn.execute(
        "DELETE FROM research_entries WHERE session_id = ?1",
        [session_id],
    )?;
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::session;
    use crate::schema::init_schema;
    use delve_types::Metadata;

    #[test]
    fn test_same_timestamp_falls_back_to_id_order() -> Result<()> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        let ts = "2026-03-01T12:00:00.000000Z";
        let sid = session::insert(&conn, "Topic", "m", &Metadata::new(), ts)?;

        let first = insert(&conn, sid, "q1", &ResearchResponse::new("Topic", "r1"), ts)?;
        let second = insert(&conn, sid, "q2", &ResearchResponse::new("Topic", "r2"), ts)?;
        let earlier = insert(
            &conn,
            sid,
            "q0",
            &ResearchResponse::new("Topic", "r0"),
            "2026-03-01T11:59:59.000000Z",
        )?;

        let ids: Vec<i64> = list_for_session(&conn, sid)?
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![earlier, first, second]);
        Ok(())
    }

    #[test]
    fn test_foreign_key_rejects_orphan_insert() -> Result<()> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;

        let result = insert(
            &conn,
            42,
            "q",
            &ResearchResponse::new("t", "r"),
            "2026-03-01T12:00:00.000000Z",
        );
        assert!(result.is_err());
        Ok(())
    }
}
