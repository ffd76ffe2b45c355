//! Common utilities for CLI E2E tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

pub const PLAN: &str = r#"
[[obligations]]
id = "work"
title = "Work"
start_time = "09:00"
end_time = "17:00"
category = "work"

[[obligations]]
id = "gym"
title = "Gym class"
start_time = "18:00"
end_time = "19:00"
category = "personal"
day = "friday"

[[tasks]]
id = "read"
title = "Read novel"
energy_level = "low"
location = "bedroom"
complexity = "simple"

[[tasks.subtasks]]
id = "c1"
title = "Chapter 1"
estimated_minutes = 30
energy_level = "low"

[[tasks.subtasks]]
id = "c2"
title = "Chapter 2"
estimated_minutes = 30
energy_level = "low"

[[tasks]]
id = "garage"
title = "Clean garage"
energy_level = "high"
location = "garage"
complexity = "complex"

[[tasks.subtasks]]
id = "sort"
title = "Sort items"
estimated_minutes = 45
energy_level = "high"

[[tasks.subtasks]]
id = "sweep"
title = "Sweep floor"
estimated_minutes = 20
energy_level = "medium"
"#;

/// Isolated home directory plus a plan file inside it.
pub struct Sandbox {
    dir: tempfile::TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("plan.toml"), PLAN).expect("Failed to write plan");
        Self { dir }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn plan(&self) -> String {
        self.path("plan.toml").display().to_string()
    }

    pub fn write(&self, name: &str, content: &str) -> String {
        let path = self.path(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path.display().to_string()
    }

    /// Invoke the CLI and return (stdout, stderr, exit code).
    pub fn run(&self, args: &[&str]) -> (String, String, i32) {
        run_in(self.dir.path(), args)
    }

    /// Invoke the CLI and expect success.
    pub fn run_success(&self, args: &[&str]) -> String {
        let (stdout, stderr, code) = self.run(args);
        assert_eq!(code, 0, "CLI command failed: {args:?}\nstderr: {stderr}");
        stdout
    }

    /// Invoke the CLI and expect failure; returns stderr.
    pub fn run_failure(&self, args: &[&str]) -> String {
        let (_, stderr, code) = self.run(args);
        assert_ne!(code, 0, "CLI command unexpectedly succeeded: {args:?}");
        stderr
    }

    pub fn run_json(&self, args: &[&str]) -> serde_json::Value {
        let stdout = self.run_success(args);
        serde_json::from_str(&stdout).expect("Failed to parse JSON output")
    }
}

fn run_in(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_dayslot"))
        .args(args)
        .env("HOME", home)
        .env_remove("DAYSLOT_ENV")
        .env_remove("DAYSLOT_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}
