//! TestWorld pattern for declarative CLI test setup.
//!
//! Each world owns a temp directory holding the LLM and MCP recorder
//! directories and a `config.toml` that points the CLI at them.

use anyhow::Result;
use assert_cmd::Command;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::fixtures::{write_llm_record, write_session_log};

/// Isolated recorder directories plus a config file for CLI runs.
///
/// # Example
/// ```no_run
/// use wiretrace_testing::TestWorld;
/// use wiretrace_testing::fixtures::llm_record;
///
/// let world = TestWorld::new()
///     .with_llm_record(&llm_record("a", "2024-05-01T10:00:00", "gpt-4o", "Sunny.", 15));
///
/// let result = world.run(&["list"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    llm_dir: PathBuf,
    mcp_dir: PathBuf,
    config_path: PathBuf,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base_path = temp_dir.path().to_path_buf();
        let llm_dir = base_path.join("logs").join("llm_proxy");
        let mcp_dir = base_path.join("logs").join("mcp_weather");
        let config_path = base_path.join("config.toml");

        std::fs::create_dir_all(&llm_dir).expect("Failed to create llm log dir");
        std::fs::create_dir_all(&mcp_dir).expect("Failed to create mcp log dir");

        let world = Self {
            temp_dir,
            llm_dir,
            mcp_dir,
            config_path,
            env_vars: HashMap::new(),
        };
        world.write_config("").expect("Failed to write config");
        world
    }

    /// Rewrite the config file; `extra` is appended verbatim after the
    /// directory settings.
    pub fn write_config(&self, extra: &str) -> Result<()> {
        let content = format!(
            "llm_log_dir = {:?}\nmcp_log_dir = {:?}\n{}",
            self.llm_dir.display().to_string(),
            self.mcp_dir.display().to_string(),
            extra
        );
        std::fs::write(&self.config_path, content)?;
        Ok(())
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Add one LLM recorder file.
    pub fn with_llm_record(self, record: &Value) -> Self {
        write_llm_record(&self.llm_dir, record).expect("Failed to write llm record");
        self
    }

    /// Add one MCP session log.
    pub fn with_session_log(self, session: &str, lines: &[Value]) -> Self {
        write_session_log(&self.mcp_dir, session, lines).expect("Failed to write session log");
        self
    }

    /// Write an arbitrary file under the temp root and return its path.
    pub fn write_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Configure a CLI command with this test environment's settings.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.arg("--config").arg(&self.config_path);
        cmd.current_dir(self.temp_dir.path());
        cmd.env_remove("RUST_LOG");

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Execute the `wiretrace` binary with this environment and `args`.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("wiretrace")
            .map_err(|e| anyhow::anyhow!("Failed to find wiretrace binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
