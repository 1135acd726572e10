use crate::context::ExecutionContext;
use crate::prompt::{AssumeYes, Prompter};
use anyhow::{Result, bail};
use delve_index::SessionRecord;
use delve_runtime::SessionManager;
use delve_types::Metadata;

#[derive(Debug)]
pub enum NewOutcome {
    Created(SessionRecord),
    Cancelled,
}

/// Start a session, asking first when one is already active.
///
/// Declining leaves the manager and the store untouched.
pub fn start_session(
    manager: &mut SessionManager,
    topic: &str,
    model: &str,
    metadata: Option<&Metadata>,
    prompter: &mut dyn Prompter,
) -> Result<NewOutcome> {
    if let Some(current) = manager.current_session() {
        let question = format!(
            "You have an active session: {}\nDo you want to close the current session and start a new one?",
            current.topic
        );
        if !prompter.confirm(&question) {
            return Ok(NewOutcome::Cancelled);
        }
    }

    manager.create_new_session(topic, model, metadata)?;
    match manager.current_session() {
        Some(session) => Ok(NewOutcome::Created(session.clone())),
        None => bail!("Session was created but could not be read back"),
    }
}

/// Parse repeated `key=value` flags. Values that parse as JSON keep their
/// type; anything else is stored as a string.
pub fn parse_metadata(pairs: &[String]) -> Result<Metadata> {
    let mut metadata = Metadata::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("Invalid metadata '{}': expected KEY=VALUE", pair);
        };
        let key = key.trim();
        if key.is_empty() {
            bail!("Invalid metadata '{}': key must not be empty", pair);
        }

        let value = serde_json::from_str(value)
            .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
        metadata.insert(key.to_string(), value);
    }
    Ok(metadata)
}

pub fn handle(ctx: &ExecutionContext, topic: &str, model: Option<String>, meta: &[String]) -> Result<()> {
    let metadata = parse_metadata(meta)?;
    let model = model.unwrap_or_else(|| ctx.config.default_model.clone());
    let mut manager = ctx.open_manager()?;

    // A fresh process has nothing active, so this never prompts.
    let NewOutcome::Created(session) =
        start_session(&mut manager, topic, &model, Some(&metadata), &mut AssumeYes)?
    else {
        return Ok(());
    };

    if ctx.renderer.is_json() {
        return ctx.renderer.print_json(&session);
    }

    println!(
        "{}",
        ctx.renderer
            .success(&format!("Created session {}: {}", session.id, session.topic))
    );
    println!("  Model: {}", session.model_used);
    Ok(())
}
