use crate::context::ExecutionContext;
use crate::presentation::views::session::session_details;
use anyhow::Result;

pub fn handle(ctx: &ExecutionContext, session_id: i64) -> Result<()> {
    let manager = ctx.open_manager()?;
    let Some(session) = manager.get_session(session_id)? else {
        if ctx.renderer.is_json() {
            return ctx.renderer.print_json(&serde_json::Value::Null);
        }
        println!("{}", ctx.renderer.failure(&format!("Session {} not found.", session_id)));
        return Ok(());
    };
    let entries = manager.get_session_entries(session_id)?;

    if ctx.renderer.is_json() {
        return ctx.renderer.print_json(&serde_json::json!({
            "session": session,
            "entries": entries,
        }));
    }

    print!("{}", session_details(&session, &entries, &ctx.renderer));
    Ok(())
}
