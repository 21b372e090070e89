//! Error types for the wizard.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for wizard operations
pub type Result<T> = std::result::Result<T, WizardError>;

#[derive(Error, Debug)]
pub enum WizardError {
    #[error("cancelled by user")]
    Cancelled,

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("object '{0}' must have at least one property")]
    EmptyObject(String),

    #[error("array '{0}' has no items defined")]
    MissingItems(String),

    #[error("invalid structure at {path}: {reason}")]
    Structure { path: String, reason: String },

    #[error("empty reference returned for '{0}'")]
    EmptyReference(String),

    #[error("references are not available in {0} mode")]
    UnsupportedReference(String),

    #[error("nothing to select in {}", .0.display())]
    NothingToSelect(PathBuf),

    #[error("malformed document {}: {reason}", .path.display())]
    MalformedDocument { path: PathBuf, reason: String },

    #[error("every HTTP method is already defined in {}", .0.display())]
    NoMethodsLeft(PathBuf),

    #[error("required setting {0} is not set")]
    MissingRoot(&'static str),

    #[error("{var} does not point to a readable directory: {}", .path.display())]
    RootNotDirectory { var: &'static str, path: PathBuf },

    #[error("scripted answer does not fit prompt '{prompt}': expected {expected}")]
    UnexpectedAnswer { prompt: String, expected: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
