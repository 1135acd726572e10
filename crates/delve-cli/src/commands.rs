use super::args::{Cli, Commands, ConfigCommand, EntryCommand, SessionCommand};
use super::context::ExecutionContext;
use super::handlers;
use anyhow::{Result, bail};
use std::path::Path;

pub fn run(cli: Cli) -> Result<()> {
    let ctx = ExecutionContext::new(cli.db.as_deref(), cli.config.as_deref(), cli.format)?;

    let Some(command) = cli.command else {
        show_guidance(ctx.db_path());
        return Ok(());
    };

    match command {
        Commands::Session { command } => match command {
            SessionCommand::List { limit, order } => handlers::session_list::handle(&ctx, limit, order),
            SessionCommand::Show { session_id } => handlers::session_show::handle(&ctx, session_id),
            SessionCommand::Load { session_id } => handlers::session_load::handle(&ctx, session_id),
            SessionCommand::Delete {
                session_id,
                confirm,
            } => handlers::session_delete::handle(&ctx, session_id, confirm.yes),
            SessionCommand::New { topic, model, meta } => {
                if topic.trim().is_empty() {
                    bail!("Topic cannot be empty");
                }
                handlers::session_new::handle(&ctx, &topic, model, &meta)
            }
        },

        Commands::Entry { command } => match command {
            EntryCommand::Add {
                session_id,
                query,
                result,
                sources,
                tools,
            } => handlers::entry_add::handle(&ctx, session_id, &query, &result, sources, tools),
        },

        Commands::Sessions { limit } => {
            handlers::session_list::handle(&ctx, limit, Default::default())
        }

        Commands::Export {
            session_id,
            entry,
            formats,
            output_dir,
        } => handlers::export::handle(&ctx, session_id, entry, &formats, output_dir.as_deref()),

        Commands::Config { command } => match command {
            ConfigCommand::Init { force } => handlers::config::init(&ctx, force),
            ConfigCommand::Show => handlers::config::show(&ctx),
        },

        Commands::Shell { model } => handlers::shell::handle(&ctx, model),
    }
}

fn show_guidance(db_path: &Path) {
    println!("delve - Research session log\n");

    if !db_path.exists() {
        println!("Get started:");
        println!("  delve session new \"<topic>\"        # Start a research session");
        println!("  delve shell                         # Work interactively\n");
    } else {
        println!("Quick commands:");
        println!("  delve session list                  # View recent sessions");
        println!("  delve session show <ID>             # View a session and its entries");
        println!("  delve entry add <ID> --query Q --result R");
        println!("  delve export <ID> --to markdown     # Write a report\n");
    }

    println!("Database: {}", db_path.display());
    println!("For more commands:");
    println!("  delve --help");
}
