// NOTE: Command Organization Rationale
//
// Why namespaced subcommands (not flat)?
// - Session lifecycle (list/show/load/delete/new) and entry writes are different concerns
// - Namespaces keep --help readable as the surface grows
// - Example: `session delete` vs `entry add` vs flat `delete-session` and `add-entry`

mod commands;
mod common;
mod enums;

pub use commands::*;
pub use common::*;
pub use enums::*;

use clap::Parser;

#[derive(Parser)]
#[command(name = "delve")]
#[command(about = "Keep, browse and export multi-turn research sessions", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Session database file (default: research_sessions.db)")]
    pub db: Option<String>,

    #[arg(long, global = true, help = "Config file (default: <config dir>/delve/config.toml)")]
    pub config: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
