//! Writing YAML artifacts.

use crate::error::{Result, WizardError};
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub fn render<T: Serialize>(document: &T) -> Result<String> {
    Ok(serde_yaml::to_string(document)?)
}

/// `<dir>/<name>.yaml`
pub fn artifact_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.yaml", name))
}

/// Writes `contents` to `path`, creating parent directories as needed.
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.is_dir() {
            fs::create_dir_all(dir)?;
            info!(dir = %dir.display(), "created directory");
        }
    }
    if path.exists() {
        warn!(file = %path.display(), "overwriting existing file");
    }
    fs::write(path, contents)?;
    info!(file = %path.display(), bytes = contents.len(), "wrote artifact");
    Ok(())
}

/// Renders `document` first, so nothing is written when serialization fails.
pub fn write_document<T: Serialize>(dir: &Path, name: &str, document: &T) -> Result<PathBuf> {
    let contents = render(document)?;
    let path = artifact_path(dir, name);
    write_file(&path, &contents)?;
    Ok(path)
}

/// Top-level mapping of an existing YAML file, keys in file order.
pub fn read_mapping(path: &Path) -> Result<Mapping> {
    let raw = fs::read_to_string(path)?;
    let malformed = |reason: String| WizardError::MalformedDocument {
        path: path.to_path_buf(),
        reason,
    };

    match serde_yaml::from_str::<Value>(&raw).map_err(|e| malformed(e.to_string()))? {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Mapping::new()),
        _ => Err(malformed("top level is not a mapping".into())),
    }
}
