use super::export::{export_entry, expand_formats, render_results};
use super::session_delete::delete_with_confirmation;
use super::session_load::load;
use super::session_new::{NewOutcome, start_session};
use crate::context::ExecutionContext;
use crate::presentation::ConsoleRenderer;
use crate::presentation::views::session::{session_details, sessions_table};
use crate::prompt::{LinePrompter, install_interrupt_handler};
use anyhow::{Context, Result, anyhow};
use delve_runtime::{Error as RuntimeError, SessionManager};
use delve_types::{ResearchResponse, ToolKind};
use std::io::{BufRead, Write};
use std::path::PathBuf;

const HELP: &str = "\
Commands:
  list [N]          recent sessions
  load <id>         make a stored session active
  new <topic>       start a session
  delete <id>       delete a session and its entries
  show              the active session and its entries
  add               record a research entry in the active session
  export [format]   export the latest entry (txt, json, markdown, md, pdf, all)
  tools             tool names accepted when recording an entry
  help              this text
  quit              leave the shell
";

enum Flow {
    Continue,
    Quit,
}

/// Line-oriented loop over one manager, so the active session survives
/// between commands.
pub struct Shell<'a, R, W> {
    manager: &'a mut SessionManager,
    prompter: LinePrompter<R, W>,
    renderer: &'a ConsoleRenderer,
    model: String,
    list_limit: usize,
    export_dir: PathBuf,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(
        manager: &'a mut SessionManager,
        prompter: LinePrompter<R, W>,
        renderer: &'a ConsoleRenderer,
        model: String,
        list_limit: usize,
        export_dir: PathBuf,
    ) -> Self {
        Self {
            manager,
            prompter,
            renderer,
            model,
            list_limit,
            export_dir,
        }
    }

    /// Read commands until `quit` or end of input. A failing command is
    /// reported and the loop goes on.
    pub fn run(&mut self) {
        self.prompter
            .say("delve research shell. Type 'help' for commands.\n");

        loop {
            let prompt = match self.manager.current_session_id() {
                Some(id) => format!("delve[{}]> ", id),
                None => "delve> ".to_string(),
            };
            let Some(line) = self.prompter.read_line(&prompt) else {
                self.prompter.say("\n");
                break;
            };
            if self.prompter.take_interrupt() {
                continue;
            }

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match self.dispatch(line) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(err) => {
                    tracing::debug!(command = line, error = %err, "shell command failed");
                    self.prompter.say(&format!("Error: {}\n", err));
                }
            }
        }
    }

    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }

    fn dispatch(&mut self, line: &str) -> Result<Flow> {
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "quit" | "exit" => return Ok(Flow::Quit),
            "help" => self.prompter.say(HELP),
            "list" => {
                let limit = if rest.is_empty() {
                    self.list_limit
                } else {
                    rest.parse()
                        .with_context(|| format!("'{}' is not a number", rest))?
                };
                let sessions = self.manager.list_recent_sessions(limit)?;
                self.prompter.say(&sessions_table(&sessions, self.renderer));
            }
            "load" => {
                let out = load(self.manager, parse_id(rest)?, self.renderer)?;
                self.prompter.say(&out);
            }
            "new" => self.new_session(rest)?,
            "delete" => {
                let session_id = parse_id(rest)?;
                let outcome = delete_with_confirmation(self.manager, session_id, &mut self.prompter)?;
                self.prompter
                    .say(&format!("{}\n", outcome.message(session_id, self.renderer)));
            }
            "show" => self.show()?,
            "add" => self.add_entry()?,
            "export" => self.export(rest)?,
            "tools" => {
                for kind in ToolKind::ALL {
                    self.prompter
                        .say(&format!("  {:<18}{}\n", kind.name(), kind.description()));
                }
            }
            other => self.prompter.say(&format!(
                "Unknown command: {}. Type 'help' for commands.\n",
                other
            )),
        }
        Ok(Flow::Continue)
    }

    fn new_session(&mut self, topic: &str) -> Result<()> {
        if topic.is_empty() {
            self.prompter.say("Usage: new <topic>\n");
            return Ok(());
        }

        match start_session(self.manager, topic, &self.model, None, &mut self.prompter)? {
            NewOutcome::Created(session) => self.prompter.say(&format!(
                "{}\n",
                self.renderer
                    .success(&format!("Created session {}: {}", session.id, session.topic))
            )),
            NewOutcome::Cancelled => self.prompter.say("Keeping the current session.\n"),
        }
        Ok(())
    }

    fn show(&mut self) -> Result<()> {
        let Some(session) = self.manager.current_session().cloned() else {
            self.prompter
                .say("No active session. Use 'new <topic>' or 'load <id>'.\n");
            return Ok(());
        };
        let entries = self.manager.current_session_entries()?;
        self.prompter
            .say(&session_details(&session, &entries, self.renderer));
        Ok(())
    }

    fn add_entry(&mut self) -> Result<()> {
        let Some(topic) = self.manager.current_session().map(|s| s.topic.clone()) else {
            return Err(RuntimeError::NoActiveSession.into());
        };

        let Some(query) = self.prompter.ask("Query: ") else {
            return Ok(());
        };
        if query.trim().is_empty() {
            self.prompter.say("Nothing recorded: the query was empty.\n");
            return Ok(());
        }
        let Some(result) = self.prompter.ask("Result: ") else {
            return Ok(());
        };
        let Some(sources) = self.prompter.ask("Sources (comma-separated): ") else {
            return Ok(());
        };
        let Some(tools) = self.prompter.ask("Tools (comma-separated): ") else {
            return Ok(());
        };

        let response = ResearchResponse::new(topic, result)
            .with_sources(split_list(&sources))
            .with_tools(split_list(&tools));
        let entry_id = self.manager.add_research_entry(&query, &response)?;

        self.prompter.say(&format!(
            "{}\n",
            self.renderer.success(&format!("Recorded entry {}", entry_id))
        ));
        Ok(())
    }

    fn export(&mut self, formats: &str) -> Result<()> {
        let session = self
            .manager
            .current_session()
            .cloned()
            .ok_or(RuntimeError::NoActiveSession)?;
        let entries = self.manager.current_session_entries()?;
        let latest = entries
            .last()
            .ok_or_else(|| anyhow!("Session {} has no entries to export", session.id))?;

        let requested: Vec<String> = if formats.is_empty() {
            vec!["txt".to_string()]
        } else {
            formats.split_whitespace().map(str::to_string).collect()
        };
        let results = export_entry(&session, latest, &expand_formats(&requested), &self.export_dir)?;
        self.prompter.say(&render_results(&results, self.renderer));
        Ok(())
    }
}

fn parse_id(text: &str) -> Result<i64> {
    if text.is_empty() {
        return Err(anyhow!("A session id is required"));
    }
    text.parse()
        .with_context(|| format!("'{}' is not a valid session id", text))
}

fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn handle(ctx: &ExecutionContext, model: Option<String>) -> Result<()> {
    let mut manager = ctx.open_manager()?;
    let model = model.unwrap_or_else(|| ctx.config.default_model.clone());
    let renderer = ConsoleRenderer::new(false);
    install_interrupt_handler();

    let mut shell = Shell::new(
        &mut manager,
        LinePrompter::stdio(),
        &renderer,
        model,
        ctx.config.list_limit,
        ctx.config.export_dir.clone(),
    );
    shell.run();
    Ok(())
}
