use crate::context::ExecutionContext;
use anyhow::{Context, Result, bail};
use delve_runtime::Config;
use std::path::Path;

/// Write the default settings to the resolved config path.
pub fn write_default(path: &Path, force: bool) -> Result<Config> {
    if path.exists() && !force {
        bail!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    let config = Config::default();
    config
        .save_to(path)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote default config");
    Ok(config)
}

pub fn init(ctx: &ExecutionContext, force: bool) -> Result<()> {
    let path = ctx.config_path();
    write_default(path, force)?;

    if ctx.renderer.is_json() {
        return ctx.renderer.print_json(&serde_json::json!({
            "config_path": path,
        }));
    }
    println!("{}", ctx.renderer.success(&format!("Wrote {}", path.display())));
    Ok(())
}

pub fn show(ctx: &ExecutionContext) -> Result<()> {
    if ctx.renderer.is_json() {
        return ctx.renderer.print_json(&serde_json::json!({
            "config_path": ctx.config_path(),
            "config_exists": ctx.config_path().exists(),
            "database": ctx.db_path(),
            "settings": ctx.config,
        }));
    }

    let exists = if ctx.config_path().exists() { "" } else { " (not created, using defaults)" };
    println!("Config:        {}{}", ctx.config_path().display(), exists);
    println!("Database:      {}", ctx.db_path().display());
    println!("Default model: {}", ctx.config.default_model);
    println!("Export dir:    {}", ctx.config.export_dir.display());
    println!("List limit:    {}", ctx.config.list_limit);
    Ok(())
}
