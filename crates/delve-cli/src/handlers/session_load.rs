use crate::context::ExecutionContext;
use crate::presentation::ConsoleRenderer;
use crate::presentation::views::session::load_summary;
use anyhow::Result;
use delve_runtime::SessionManager;

/// Make `session_id` active and describe where it left off.
///
/// A miss leaves the manager untouched and reports it as output, not as an
/// error.
pub fn load(manager: &mut SessionManager, session_id: i64, r: &ConsoleRenderer) -> Result<String> {
    if !manager.load_session(session_id)? {
        return Ok(format!("{}\n", r.failure(&format!("Session {} not found.", session_id))));
    }

    let entries = manager.current_session_entries()?;
    match manager.current_session() {
        Some(session) => Ok(load_summary(session, &entries, r)),
        None => Ok(format!("{}\n", r.failure(&format!("Session {} not found.", session_id)))),
    }
}

pub fn handle(ctx: &ExecutionContext, session_id: i64) -> Result<()> {
    let mut manager = ctx.open_manager()?;

    if ctx.renderer.is_json() {
        let loaded = manager.load_session(session_id)?;
        let entries = manager.current_session_entries()?;
        return ctx.renderer.print_json(&serde_json::json!({
            "loaded": loaded,
            "session": manager.current_session(),
            "entry_count": entries.len(),
            "last_query": entries.last().map(|e| e.query.as_str()),
        }));
    }

    print!("{}", load(&mut manager, session_id, &ctx.renderer)?);
    Ok(())
}
