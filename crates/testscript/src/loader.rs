//! Script document loading.
//!
//! Script documents are JSON files; [`load_script`] reads and parses one,
//! [`discover_scripts`] walks a directory tree for candidates.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::script::Script;

/// Error loading a script document.
#[derive(Debug, Error)]
pub enum ScriptLoadError {
    /// The document file could not be read.
    #[error("could not read script document: {0}")]
    Io(String),

    /// The document is not a valid script.
    #[error("could not parse script document: {0}")]
    Parse(String),
}

/// Loads a script document from a JSON file.
pub fn load_script(path: &Path) -> Result<Script, ScriptLoadError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| ScriptLoadError::Io(e.to_string()))?;

    serde_json::from_str(&content).map_err(|e| ScriptLoadError::Parse(e.to_string()))
}

/// Discovers all script documents in a directory tree.
pub fn discover_scripts(dir: &Path) -> Vec<PathBuf> {
    let mut scripts = Vec::new();

    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() && path.extension().map(|e| e == "json").unwrap_or(false) {
                scripts.push(path);
            } else if path.is_dir() {
                scripts.extend(discover_scripts(&path));
            }
        }
    }

    scripts
}
