use crate::args::OutputFormat;
use crate::presentation::ConsoleRenderer;
use anyhow::{Context, Result};
use delve_runtime::{Config, SessionManager, resolve_config_path, resolve_database_path};
use std::path::{Path, PathBuf};

/// Everything a handler needs that comes from flags, environment or config.
pub struct ExecutionContext {
    pub config: Config,
    pub renderer: ConsoleRenderer,
    config_path: PathBuf,
    db_path: PathBuf,
}

impl ExecutionContext {
    pub fn new(db: Option<&str>, config: Option<&str>, format: OutputFormat) -> Result<Self> {
        let config_path = resolve_config_path(config)?;
        let config = Config::load_from(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
        let db_path = resolve_database_path(db, &config);
        tracing::debug!(config = %config_path.display(), db = %db_path.display(), "resolved paths");

        Ok(Self {
            config,
            renderer: ConsoleRenderer::new(format == OutputFormat::Json),
            config_path,
            db_path,
        })
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn open_manager(&self) -> Result<SessionManager> {
        SessionManager::open(&self.db_path)
            .with_context(|| format!("Failed to open session database {}", self.db_path.display()))
    }
}
