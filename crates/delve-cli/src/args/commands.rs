use super::common::ConfirmArgs;
use super::enums::ListOrder;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Manage research sessions")]
    Session {
        #[command(subcommand)]
        command: SessionCommand,
    },

    #[command(about = "Record research entries")]
    Entry {
        #[command(subcommand)]
        command: EntryCommand,
    },

    #[command(about = "List recent sessions (alias for 'session list')")]
    Sessions {
        #[arg(long)]
        limit: Option<usize>,
    },

    #[command(about = "Export a stored research entry as a report")]
    Export {
        session_id: i64,

        #[arg(long, help = "1-based entry number (default: the latest entry)")]
        entry: Option<usize>,

        #[arg(
            long = "to",
            default_value = "txt",
            help = "Report formats: txt, json, markdown, md, pdf, or all"
        )]
        formats: Vec<String>,

        #[arg(long, help = "Directory for report files (default: from config)")]
        output_dir: Option<PathBuf>,
    },

    #[command(about = "Inspect or create the config file")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    #[command(about = "Interactive session shell")]
    Shell {
        #[arg(long, help = "Model recorded on sessions created in the shell")]
        model: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum SessionCommand {
    #[command(about = "List recent sessions with their entry counts")]
    List {
        #[arg(long)]
        limit: Option<usize>,

        #[arg(long, default_value = "newest")]
        order: ListOrder,
    },

    #[command(about = "Show a session and all of its entries")]
    Show { session_id: i64 },

    #[command(about = "Load a session and summarize where it left off")]
    Load { session_id: i64 },

    #[command(about = "Delete a session and all of its entries")]
    Delete {
        session_id: i64,

        #[command(flatten)]
        confirm: ConfirmArgs,
    },

    #[command(about = "Start a new research session")]
    New {
        topic: String,

        #[arg(long, help = "Model identifier (default: from config)")]
        model: Option<String>,

        #[arg(long = "meta", value_name = "KEY=VALUE", help = "Session metadata (repeatable)")]
        meta: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Write a config file with the default settings")]
    Init {
        #[arg(long, help = "Overwrite an existing config file")]
        force: bool,
    },

    #[command(about = "Print the effective settings and resolved paths")]
    Show,
}

#[derive(Subcommand)]
pub enum EntryCommand {
    #[command(about = "Append a research entry to a session")]
    Add {
        session_id: i64,

        #[arg(long)]
        query: String,

        #[arg(long)]
        result: String,

        #[arg(long = "source", help = "Cited source (repeatable, kept in order)")]
        sources: Vec<String>,

        #[arg(long = "tool", help = "Tool used (repeatable, kept in order)")]
        tools: Vec<String>,
    },
}
