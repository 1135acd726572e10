use crate::context::ExecutionContext;
use crate::presentation::ConsoleRenderer;
use anyhow::{Result, bail};
use delve_index::{EntryRecord, SessionRecord};
use delve_runtime::{ExportFormat, Exporter};
use std::collections::BTreeMap;
use std::path::Path;

/// Expand `all` and drop repeats, keeping first-seen order.
pub fn expand_formats(requested: &[String]) -> Vec<String> {
    let mut formats: Vec<String> = Vec::new();
    for name in requested {
        let names: Vec<String> = if name == "all" {
            ExportFormat::ALL.iter().map(|f| f.name().to_string()).collect()
        } else {
            vec![name.to_lowercase()]
        };
        for name in names {
            if !formats.contains(&name) {
                formats.push(name);
            }
        }
    }
    formats
}

/// 1-based `entry` or the latest one.
pub fn pick_entry(entries: &[EntryRecord], entry: Option<usize>) -> Result<&EntryRecord> {
    match entry {
        None => match entries.last() {
            Some(last) => Ok(last),
            None => bail!("Session has no entries to export"),
        },
        Some(n) if n >= 1 && n <= entries.len() => Ok(&entries[n - 1]),
        Some(n) => bail!(
            "Entry {} out of range (session has {} entries)",
            n,
            entries.len()
        ),
    }
}

pub fn export_entry(
    session: &SessionRecord,
    entry: &EntryRecord,
    formats: &[String],
    output_dir: &Path,
) -> Result<BTreeMap<String, String>> {
    let exporter = Exporter::new(output_dir)?;
    let names: Vec<&str> = formats.iter().map(String::as_str).collect();
    Ok(exporter.export_all(&entry.to_response(&session.topic), &names))
}

pub fn render_results(results: &BTreeMap<String, String>, r: &ConsoleRenderer) -> String {
    let mut out = String::new();
    for (format, outcome) in results {
        let line = if outcome.starts_with("Error: ") {
            r.failure(&format!("{}: {}", format, outcome))
        } else {
            r.success(&format!("Exported {}: {}", format, outcome))
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

pub fn handle(
    ctx: &ExecutionContext,
    session_id: i64,
    entry: Option<usize>,
    formats: &[String],
    output_dir: Option<&Path>,
) -> Result<()> {
    let manager = ctx.open_manager()?;
    let Some(session) = manager.get_session(session_id)? else {
        println!("{}", ctx.renderer.failure(&format!("Session {} not found.", session_id)));
        return Ok(());
    };

    let entries = manager.get_session_entries(session_id)?;
    let chosen = pick_entry(&entries, entry)?;
    let output_dir = output_dir.unwrap_or(ctx.config.export_dir.as_path());
    let results = export_entry(&session, chosen, &expand_formats(formats), output_dir)?;

    if ctx.renderer.is_json() {
        return ctx.renderer.print_json(&results);
    }

    print!("{}", render_results(&results, &ctx.renderer));
    Ok(())
}
