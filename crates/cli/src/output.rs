//! JSON outputs and run metadata.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Pretty-print `value` to `path`, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}

/// Git revision baked in at compile time, overridable at run time.
pub fn current_git_rev() -> String {
    if let Ok(from_env) = std::env::var("GIT_COMMIT") {
        if !from_env.is_empty() {
            return from_env;
        }
    }
    match option_env!("GIT_COMMIT") {
        Some(rev) if !rev.is_empty() => rev.to_string(),
        _ => "unknown".to_string(),
    }
}
