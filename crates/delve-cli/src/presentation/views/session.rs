use crate::presentation::ConsoleRenderer;
use crate::presentation::formatters::text::single_line;
use crate::presentation::formatters::{format_local, format_relative_time, truncate};
use delve_index::{EntryRecord, SessionRecord, SessionSummary};
use std::fmt::Write;

const TOPIC_WIDTH: usize = 40;
const MODEL_WIDTH: usize = 15;
const PREVIEW_CHARS: usize = 100;

pub fn sessions_table(sessions: &[SessionSummary], r: &ConsoleRenderer) -> String {
    if sessions.is_empty() {
        return "No research sessions found.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "\n{}", r.heading("Research Sessions"));
    let _ = writeln!(
        out,
        "{:<5} {:<43} {:<15} {:>7}  {}",
        "ID", "Topic", "Model", "Entries", "Updated"
    );
    let _ = writeln!(out, "{}", "-".repeat(95));

    for session in sessions {
        let _ = writeln!(
            out,
            "{:<5} {:<43} {:<15} {:>7}  {}",
            session.id,
            truncate(&session.topic, TOPIC_WIDTH),
            truncate(&session.model_used, MODEL_WIDTH),
            session.entry_count,
            format_local(session.updated_at)
        );
    }

    out
}

pub fn session_details(session: &SessionRecord, entries: &[EntryRecord], r: &ConsoleRenderer) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", r.heading(&format!("Session {}: {}", session.id, session.topic)));
    let _ = writeln!(out, "  Model:   {}", session.model_used);
    let _ = writeln!(out, "  Status:  {}", session.status);
    let _ = writeln!(out, "  Created: {}", format_local(session.created_at));
    let _ = writeln!(
        out,
        "  Updated: {} {}",
        format_local(session.updated_at),
        r.dim(&format!("({})", format_relative_time(session.updated_at)))
    );
    if !session.metadata.is_empty() {
        let _ = writeln!(out, "  Metadata:");
        for (key, value) in &session.metadata {
            let _ = writeln!(out, "    {} = {}", key, value);
        }
    }
    let _ = writeln!(out, "  Entries: {}", entries.len());

    for (i, entry) in entries.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(out, "[{}] {}  {}", i + 1, format_local(entry.timestamp), entry.query);
        let _ = writeln!(out, "    {}", truncate(&single_line(&entry.result), PREVIEW_CHARS));
        if !entry.sources.is_empty() {
            let _ = writeln!(out, "    Sources: {}", entry.sources.join(", "));
        }
        if !entry.tools_used.is_empty() {
            let _ = writeln!(out, "    Tools:   {}", entry.tools_used.join(", "));
        }
    }

    out
}

pub fn load_summary(session: &SessionRecord, entries: &[EntryRecord], r: &ConsoleRenderer) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        r.success(&format!("Loaded session {}: {}", session.id, session.topic))
    );
    let _ = writeln!(out, "  Entries: {}", entries.len());
    let _ = writeln!(out, "  Model: {}", session.model_used);
    if let Some(last) = entries.last() {
        let _ = writeln!(out, "  Last query: {}", last.query);
    }
    out
}

pub fn delete_preview(session: &SessionRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nSession to delete:");
    let _ = writeln!(out, "  ID: {}", session.id);
    let _ = writeln!(out, "  Topic: {}", session.topic);
    let _ = writeln!(out, "  Created: {}", format_local(session.created_at));
    let _ = writeln!(out, "  Model: {}", session.model_used);
    out
}
