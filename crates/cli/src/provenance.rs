use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

/// Sidecar describing how an output file was produced.
#[derive(Debug, Serialize)]
pub struct Provenance {
    pub code_rev: String,
    pub core_version: &'static str,
    pub command: &'static str,
    pub params: Value,
    pub outputs: Vec<String>,
}

impl Provenance {
    pub fn new(command: &'static str, params: Value) -> Self {
        Self {
            code_rev: current_git_rev(),
            core_version: delaney::VERSION,
            command,
            params,
            outputs: Vec::new(),
        }
    }

    /// Write `<artifact stem>.provenance.json` next to `artifact`.
    pub fn write_next_to<P: AsRef<Path>>(mut self, artifact: P) -> Result<PathBuf> {
        let artifact = artifact.as_ref();
        self.outputs.push(artifact.to_string_lossy().into_owned());
        let path = sidecar_path(artifact);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating provenance dir {}", parent.display()))?;
            }
        }
        fs::write(&path, serde_json::to_vec_pretty(&self)?)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

fn sidecar_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("artifact"));
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

/// Commit hash from `GIT_COMMIT` (build time, then run time), else `git rev-parse`.
pub fn current_git_rev() -> String {
    let from_env = option_env!("GIT_COMMIT")
        .map(str::to_owned)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|s| !s.is_empty());
    if let Some(rev) = from_env {
        return rev;
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
