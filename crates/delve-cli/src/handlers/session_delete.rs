use crate::context::ExecutionContext;
use crate::presentation::ConsoleRenderer;
use crate::presentation::views::session::delete_preview;
use crate::prompt::{AssumeYes, LinePrompter, Prompter, install_interrupt_handler};
use anyhow::Result;
use delve_runtime::SessionManager;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
    Cancelled,
    Failed,
}

impl DeleteOutcome {
    pub fn message(self, session_id: i64, r: &ConsoleRenderer) -> String {
        match self {
            DeleteOutcome::Deleted => {
                r.success(&format!("Session {} deleted successfully.", session_id))
            }
            DeleteOutcome::NotFound => r.failure(&format!("Session {} not found.", session_id)),
            DeleteOutcome::Cancelled => "Deletion cancelled.".to_string(),
            DeleteOutcome::Failed => r.failure(&format!("Failed to delete session {}.", session_id)),
        }
    }
}

/// Show the session, ask, then delete it with all of its entries.
///
/// The lookup is read-only; nothing is written unless the prompter agrees.
pub fn delete_with_confirmation(
    manager: &mut SessionManager,
    session_id: i64,
    prompter: &mut dyn Prompter,
) -> Result<DeleteOutcome> {
    let Some(session) = manager.get_session(session_id)? else {
        return Ok(DeleteOutcome::NotFound);
    };

    let question = format!(
        "{}\nAre you sure you want to delete this session and all its entries?",
        delete_preview(&session).trim_end()
    );
    if !prompter.confirm(&question) {
        return Ok(DeleteOutcome::Cancelled);
    }

    match manager.delete_session(session_id) {
        Ok(true) => Ok(DeleteOutcome::Deleted),
        Ok(false) => Ok(DeleteOutcome::Failed),
        Err(err) => {
            tracing::warn!(session_id, error = %err, "delete failed");
            Ok(DeleteOutcome::Failed)
        }
    }
}

pub fn handle(ctx: &ExecutionContext, session_id: i64, yes: bool) -> Result<()> {
    let mut manager = ctx.open_manager()?;

    let outcome = if yes {
        delete_with_confirmation(&mut manager, session_id, &mut AssumeYes)?
    } else {
        install_interrupt_handler();
        if ctx.renderer.is_json() {
            delete_with_confirmation(&mut manager, session_id, &mut LinePrompter::stdin_to_stderr())?
        } else {
            delete_with_confirmation(&mut manager, session_id, &mut LinePrompter::stdio())?
        }
    };

    if ctx.renderer.is_json() {
        return ctx.renderer.print_json(&serde_json::json!({
            "session_id": session_id,
            "outcome": outcome,
        }));
    }

    println!("{}", outcome.message(session_id, &ctx.renderer));
    Ok(())
}
