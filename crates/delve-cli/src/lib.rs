mod args;
mod commands;
pub mod context;
mod handlers;
pub mod presentation;
pub mod prompt;

pub use args::{Cli, Commands, ConfigCommand, EntryCommand, LogLevel, SessionCommand};
pub use commands::run;
