use delve_types::{Metadata, SessionOrder, SessionStatus};
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::{json_column, ts_column};
use crate::{
    Result,
    records::{SessionRecord, SessionSummary},
};

const SESSION_COLUMNS: &str = "id, topic, model_used, created_at, updated_at, status, metadata";

fn map_record(row: &Row<'_>) -> rusqlite::Result<SessionRecord> {
    Ok(SessionRecord {
        id: row.get(0)?,
        topic: row.get(1)?,
        model_used: row.get(2)?,
        created_at: ts_column(row, 3)?,
        updated_at: ts_column(row, 4)?,
        status: SessionStatus::from(row.get::<_, String>(5)?),
        metadata: json_column::<Metadata>(row, 6)?,
    })
}

pub fn insert(
    conn: &Connection,
    topic: &str,
    model_used: &str,
    metadata: &Metadata,
    now: &str,
) -> Result<i64> {
    let metadata_json = serde_json::to_string(metadata)?;

    conn.execute(
        r#"
        INSERT INTO sessions (topic, model_used, created_at, updated_at, status, metadata)
        VALUES (?1, ?2, ?3, ?3, ?4, ?5)
        "#,
        params![
            topic,
            model_used,
            now,
            SessionStatus::Active.as_str(),
            metadata_json
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

pub fn get_by_id(conn: &Connection, session_id: i64) -> Result<Option<SessionRecord>> {
    let record = conn
        .query_row(
            &format!("SELECT {} FROM sessions WHERE id = ?1", SESSION_COLUMNS),
            [session_id],
            map_record,
        )
        .optional()?;

    Ok(record)
}

pub fn exists(conn: &Connection, session_id: i64) -> Result<bool> {
    let found = conn
        .query_row("SELECT 1 FROM sessions WHERE id = ?1", [session_id], |_| {
            Ok(())
        })
        .optional()?;

    Ok(found.is_some())
}

/// Move `updated_at` forward to `ts`. Never moves it backwards, so a clock
/// step between writes cannot reorder the recency listing.
pub fn touch(conn: &Connection, session_id: i64, ts: &str) -> Result<usize> {
    let changed = conn.execute(
        "UPDATE sessions SET updated_at = MAX(updated_at, ?2) WHERE id = ?1",
        params![session_id, ts],
    )?;

    Ok(changed)
}

pub fn list(conn: &Connection, order: SessionOrder, limit: usize) -> Result<Vec<SessionSummary>> {
    let order_clause = match order {
        SessionOrder::NewestFirst => "ORDER BY s.updated_at DESC, s.id DESC",
        SessionOrder::OldestFirst => "ORDER BY s.updated_at ASC, s.id ASC",
    };

    let query = format!(
        r#"
        SELECT s.id, s.topic, s.model_used, s.created_at, s.updated_at, s.status,
               COUNT(e.id) AS entry_count
        FROM sessions s
        LEFT JOIN research_entries e ON e.session_id = s.id
        GROUP BY s.id
        {}
        LIMIT ?1
        "#,
        order_clause
    );

    let mut stmt = conn.prepare(&query)?;
    let sessions = stmt
        .query_map([limit as i64], |row| {
            Ok(SessionSummary {
                id: row.get(0)?,
                topic: row.get(1)?,
                model_used: row.get(2)?,
                created_at: ts_column(row, 3)?,
                updated_at: ts_column(row, 4)?,
                status: SessionStatus::from(row.get::<_, String>(5)?),
                entry_count: row.get::<_, i64>(6)? as usize,
            })
        })?
        .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

    Ok(sessions)
}

pub fn delete(conn: &Connection, session_id: i64) -> Result<usize> {
    let deleted = conn.execute("DELETE FROM sessions WHERE id = ?1", [session_id])?;
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::format_ts;
    use crate::schema::init_schema;

    fn setup() -> Result<Connection> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(conn)
    }

    #[test]
    fn test_touch_never_moves_backwards() -> Result<()> {
        let conn = setup()?;
        let id = insert(
            &conn,
            "Topic",
            "model",
            &Metadata::new(),
            "2026-01-01T00:00:10.000000Z",
        )?;

        touch(&conn, id, "2026-01-01T00:00:05.000000Z")?;
        let record = get_by_id(&conn, id)?.unwrap();
        assert_eq!(format_ts(record.updated_at), "2026-01-01T00:00:10.000000Z");

        touch(&conn, id, "2026-01-01T00:00:20.000000Z")?;
        let record = get_by_id(&conn, id)?.unwrap();
        assert_eq!(format_ts(record.updated_at), "2026-01-01T00:00:20.000000Z");
        Ok(())
    }

    #[test]
    fn test_list_orders_by_updated_then_id() -> Result<()> {
        let conn = setup()?;
        let ts = "2026-01-01T00:00:00.000000Z";
        let a = insert(&conn, "A", "m", &Metadata::new(), ts)?;
        let b = insert(&conn, "B", "m", &Metadata::new(), ts)?;

        let newest = list(&conn, SessionOrder::NewestFirst, 10)?;
        assert_eq!(newest.iter().map(|s| s.id).collect::<Vec<_>>(), vec![b, a]);

        let oldest = list(&conn, SessionOrder::OldestFirst, 10)?;
        assert_eq!(oldest.iter().map(|s| s.id).collect::<Vec<_>>(), vec![a, b]);
        Ok(())
    }

    #[test]
    fn test_exists() -> Result<()> {
        let conn = setup()?;
        let id = insert(
            &conn,
            "A",
            "m",
            &Metadata::new(),
            "2026-01-01T00:00:00.000000Z",
        )?;
        assert!(exists(&conn, id)?);
        assert!(!exists(&conn, id + 1)?);
        Ok(())
    }
}
