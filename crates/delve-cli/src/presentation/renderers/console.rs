use anyhow::Result;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Decorates command output for the terminal or emits it as JSON.
pub struct ConsoleRenderer {
    json_mode: bool,
    color: bool,
}

impl ConsoleRenderer {
    pub fn new(json_mode: bool) -> Self {
        Self {
            json_mode,
            color: !json_mode && std::io::stdout().is_terminal(),
        }
    }

    /// Renderer that never emits escape codes, for captured output.
    pub fn plain() -> Self {
        Self {
            json_mode: false,
            color: false,
        }
    }

    pub fn is_json(&self) -> bool {
        self.json_mode
    }

    pub fn success(&self, message: &str) -> String {
        if self.color {
            format!("{} {}", "✓".green(), message)
        } else {
            format!("✓ {}", message)
        }
    }

    pub fn failure(&self, message: &str) -> String {
        if self.color {
            format!("{} {}", "✗".red(), message)
        } else {
            format!("✗ {}", message)
        }
    }

    pub fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}
