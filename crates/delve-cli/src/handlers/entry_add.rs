use crate::context::ExecutionContext;
use anyhow::{Result, bail};
use delve_types::{ResearchResponse, ToolKind};

/// Names in `tools` the agent does not know about.
pub fn unknown_tools(tools: &[String]) -> Vec<&str> {
    tools
        .iter()
        .map(String::as_str)
        .filter(|name| name.parse::<ToolKind>().is_err())
        .collect()
}

pub fn handle(
    ctx: &ExecutionContext,
    session_id: i64,
    query: &str,
    result: &str,
    sources: Vec<String>,
    tools: Vec<String>,
) -> Result<()> {
    if query.trim().is_empty() {
        bail!("Query cannot be empty");
    }
    for name in unknown_tools(&tools) {
        tracing::warn!(tool = name, "recording unrecognized tool name");
    }

    let mut manager = ctx.open_manager()?;
    let Some(session) = manager.get_session(session_id)? else {
        println!("{}", ctx.renderer.failure(&format!("Session {} not found.", session_id)));
        return Ok(());
    };

    let response = ResearchResponse::new(session.topic, result)
        .with_sources(sources)
        .with_tools(tools);
    let entry_id = manager.add_entry_to(session_id, query, &response)?;

    if ctx.renderer.is_json() {
        return ctx.renderer.print_json(&serde_json::json!({
            "session_id": session_id,
            "entry_id": entry_id,
        }));
    }

    println!(
        "{}",
        ctx.renderer
            .success(&format!("Added entry {} to session {}", entry_id, session_id))
    );
    Ok(())
}
