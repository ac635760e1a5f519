//! Common test utilities for CLI testing.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Output;

use assert_cmd::Command;
use tempfile::TempDir;

/// Test context with temporary directory
pub struct TestContext {
    pub temp_dir: TempDir,
    pub policy_path: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let temp_dir = abac_test_utils::temp_dir();
        let policy_path = temp_dir.path().join("policy.yaml");

        Self {
            temp_dir,
            policy_path,
        }
    }

    /// Write a policy document
    pub fn with_policy(self, policy: &str) -> Self {
        std::fs::write(&self.policy_path, policy).expect("Failed to write policy");
        self
    }

    /// Get path to temp directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// A command using the built-in lending policy
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("abac").expect("Binary not found");
        cmd.current_dir(self.path())
            .env_remove("ABAC_POLICY_PATH")
            .env_remove("ABAC_INVALID_PAIR")
            .env_remove("ABAC_LOG_LEVEL")
            .env_remove("ABAC_LOG_FORMAT")
            .env_remove("ABAC_LOG_FILE")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }

    /// A command reading this context's policy document
    pub fn policy_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.env("ABAC_POLICY_PATH", &self.policy_path);
        cmd
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Assert helpers for CLI output
pub trait OutputAssertions {
    fn assert_stdout_contains(&self, text: &str);
    fn assert_stderr_contains(&self, text: &str);
    fn assert_exit_code(&self, code: i32);
}

impl OutputAssertions for Output {
    fn assert_stdout_contains(&self, text: &str) {
        let stdout = String::from_utf8_lossy(&self.stdout);
        assert!(
            stdout.contains(text),
            "stdout did not contain '{}'\nstdout: {}",
            text,
            stdout
        );
    }

    fn assert_stderr_contains(&self, text: &str) {
        let stderr = String::from_utf8_lossy(&self.stderr);
        assert!(
            stderr.contains(text),
            "stderr did not contain '{}'\nstderr: {}",
            text,
            stderr
        );
    }

    fn assert_exit_code(&self, code: i32) {
        assert_eq!(
            self.status.code(),
            Some(code),
            "Expected exit code {}, got {:?}\nstderr: {}",
            code,
            self.status.code(),
            String::from_utf8_lossy(&self.stderr)
        );
    }
}

/// JSON output assertions
pub mod json {
    use serde_json::Value;

    pub fn parse_output(output: &[u8]) -> Value {
        serde_json::from_slice(output).expect("Failed to parse JSON output")
    }
}
