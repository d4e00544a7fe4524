//! Test environment builder for isolated scssync testing.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

use super::fixtures::TARGET;

/// Result of running a scssync CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse every stdout line as a JSON event
    pub fn json_events(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line)
                    .unwrap_or_else(|e| panic!("not a JSON line: {line:?} ({e})"))
            })
            .collect()
    }

    /// JSON events whose `event` field equals `name`
    pub fn events_named(&self, name: &str) -> Vec<serde_json::Value> {
        self.json_events()
            .into_iter()
            .filter(|event| event["event"] == name)
            .collect()
    }
}

/// Isolated project directory holding `scssync.json`, a target file and
/// partials.
pub struct TestEnv {
    pub project_root: TempDir,
}

impl TestEnv {
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::new()
    }

    pub fn root(&self) -> &Path {
        self.project_root.path()
    }

    /// Get path relative to project root
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Run scssync from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run scssync from the project root with extra env vars
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = self.command();
        cmd.args(args);
        for (key, value) in env_vars {
            cmd.env(key, value);
        }
        let output = cmd.output().expect("Failed to execute scssync");
        output_to_result(output)
    }

    /// A `Command` for the binary, isolated from the caller's environment
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_scssync"));
        cmd.current_dir(self.project_root.path())
            .env("NO_COLOR", "1")
            .env_remove("SCSSYNC_CONFIG")
            .env_remove("SCSSYNC_DEBOUNCE_MS")
            .env_remove("SCSSYNC_LOG")
            .env_remove("GITHUB_ACTIONS");
        cmd
    }

    pub fn read(&self, relative: &str) -> String {
        let full_path = self.project_path(relative);
        std::fs::read_to_string(&full_path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    /// Write a file to the project directory, creating parents
    pub fn write(&self, relative: &str, content: &str) {
        let full_path = self.project_path(relative);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
    }

    pub fn remove(&self, relative: &str) {
        std::fs::remove_file(self.project_path(relative)).expect("Failed to remove file");
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// Builder for `TestEnv`
pub struct TestEnvBuilder {
    config: Option<String>,
    target: String,
    files: Vec<(String, String)>,
}

impl TestEnvBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            target: String::new(),
            files: Vec::new(),
        }
    }

    /// Raw `scssync.json` content
    pub fn with_config(mut self, config: &str) -> Self {
        self.config = Some(config.to_string());
        self
    }

    /// Initial content of `main.scss`
    pub fn with_target(mut self, content: &str) -> Self {
        self.target = content.to_string();
        self
    }

    /// An empty partial (or any file) under the project root
    pub fn with_partial(self, relative: &str) -> Self {
        self.with_file(relative, "")
    }

    pub fn with_file(mut self, relative: &str, content: &str) -> Self {
        self.files.push((relative.to_string(), content.to_string()));
        self
    }

    pub fn build(self) -> TestEnv {
        let env = TestEnv {
            project_root: TempDir::new().expect("Failed to create temp dir"),
        };
        env.write(TARGET, &self.target);
        if let Some(config) = &self.config {
            env.write("scssync.json", config);
        }
        for (relative, content) in &self.files {
            env.write(relative, content);
        }
        env
    }
}

impl Default for TestEnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}
