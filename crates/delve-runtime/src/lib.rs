pub mod config;
pub mod error;
pub mod export;
pub mod manager;

pub use config::{Config, resolve_config_path, resolve_database_path};
pub use error::{Error, Result};
pub use export::{ExportFormat, Exporter};
pub use manager::{SessionManager, SessionState};
