//! Shared fixture for driving the `delve` binary against a scratch database.
#![cfg(test)]
#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestFixture {
    temp_dir: TempDir,
    db_path: PathBuf,
    config_path: PathBuf,
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("research_sessions.db");
        let config_path = temp_dir.path().join("config.toml");

        Self {
            temp_dir,
            db_path,
            config_path,
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Command with an isolated database and config, run from the temp dir.
    pub fn command(&self) -> Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("delve");
        cmd.current_dir(self.root())
            .env_remove("DELVE_DB")
            .env_remove("DELVE_CONFIG")
            .env_remove("DELVE_LOG")
            .arg("--db")
            .arg(&self.db_path)
            .arg("--config")
            .arg(&self.config_path);
        cmd
    }

    pub fn new_session(&self, topic: &str) -> i64 {
        let output = self
            .command()
            .args(["--format", "json", "session", "new", topic, "--model", "model-x"])
            .output()
            .expect("Failed to run session new");
        assert!(
            output.status.success(),
            "session new failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let session: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("Parse failed");
        session["id"].as_i64().expect("session id")
    }

    pub fn add_entry(&self, session_id: i64, query: &str, sources: &[&str]) {
        let mut cmd = self.command();
        cmd.args(["entry", "add", &session_id.to_string(), "--query", query])
            .args(["--result", "stored answer", "--tool", "search"]);
        for source in sources {
            cmd.args(["--source", source]);
        }
        cmd.assert().success();
    }

    pub fn list_json(&self) -> Vec<serde_json::Value> {
        let output = self
            .command()
            .args(["--format", "json", "session", "list"])
            .output()
            .expect("Failed to run session list");
        assert!(output.status.success());

        let value: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("Parse failed");
        value.as_array().cloned().expect("Expected sessions array")
    }
}
