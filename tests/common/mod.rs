//! Shared testing utilities for helmgen integration tests.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A payload covering all three resources plus an unrecognized key.
pub const FULL_PAYLOAD: &str = r#"{
  "deployment": {
    "metadata": {"name": "web", "labels": {"app": "web"}},
    "spec": {
      "replicas": 2,
      "template": {"spec": {"containers": [
        {"name": "web", "image": "nginx:1.25"},
        {"name": "sidecar", "image": "busybox"}
      ]}}
    }
  },
  "service": {"spec": {"type": "ClusterIP", "ports": [{"port": 80}]}},
  "ingress": {"spec": {"rules": [{"host": "example.com"}]}},
  "monitoring": {"enabled": true}
}"#;

/// Testing harness providing an isolated environment for CLI exercises.
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, work_dir }
    }

    /// Path to the directory used as the working directory for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Default chart directory relative to the work directory.
    pub fn chart_path(&self) -> PathBuf {
        self.work_dir.join("helm")
    }

    /// Build a command for invoking the compiled `helmgen` binary within the work directory.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("helmgen").expect("Failed to locate helmgen binary");
        cmd.current_dir(&self.work_dir).env_remove("RUST_LOG");
        cmd
    }

    /// Write a payload file into the work directory and return its path.
    pub fn write_payload(&self, name: &str, json: &str) -> PathBuf {
        let path = self.work_dir.join(name);
        fs::write(&path, json).expect("Failed to write payload");
        path
    }

    /// Write a file relative to the work directory.
    pub fn write_file(&self, relative: &str, content: &str) {
        let path = self.work_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(path, content).expect("Failed to write file");
    }
}

/// Parse a YAML file into a generic value.
pub fn read_yaml(path: &Path) -> serde_yaml::Value {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
    serde_yaml::from_str(&content).expect("Generated file should be valid YAML")
}

/// Look up a dotted path in a YAML mapping tree.
pub fn yaml_at<'a>(value: &'a serde_yaml::Value, dotted: &str) -> &'a serde_yaml::Value {
    dotted.split('.').fold(value, |node, key| &node[key])
}
