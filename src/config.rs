//! Root directories the wizard reads from and writes to.

use crate::catalog::Mode;
use crate::error::{Result, WizardError};
use std::path::{Path, PathBuf};

pub const MODEL_PATH_VAR: &str = "OAW_MODEL_PATH";
pub const SCHEMA_PATH_VAR: &str = "OAW_SCHEMA_PATH";
pub const API_PATH_VAR: &str = "OAW_API_PATH";

/// Built once at start-up and handed to every builder.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub model_path: Option<PathBuf>,
    pub schema_path: Option<PathBuf>,
    pub api_path: Option<PathBuf>,
}

impl Config {
    pub fn new(
        model_path: Option<PathBuf>,
        schema_path: Option<PathBuf>,
        api_path: Option<PathBuf>,
    ) -> Self {
        let keep = |p: Option<PathBuf>| p.filter(|p| !p.as_os_str().is_empty());
        Self {
            model_path: keep(model_path),
            schema_path: keep(schema_path),
            api_path: keep(api_path),
        }
    }

    fn setting(&self, mode: Mode) -> (&'static str, Option<&Path>) {
        match mode {
            Mode::Model => (MODEL_PATH_VAR, self.model_path.as_deref()),
            Mode::Schema => (SCHEMA_PATH_VAR, self.schema_path.as_deref()),
            Mode::Api => (API_PATH_VAR, self.api_path.as_deref()),
        }
    }

    /// Root directory for artifacts of `mode`.
    pub fn root(&self, mode: Mode) -> Result<&Path> {
        let (var, path) = self.setting(mode);
        path.ok_or(WizardError::MissingRoot(var))
    }

    pub fn model_root(&self) -> Result<&Path> {
        self.root(Mode::Model)
    }

    pub fn schema_root(&self) -> Result<&Path> {
        self.root(Mode::Schema)
    }

    pub fn api_root(&self) -> Result<&Path> {
        self.root(Mode::Api)
    }

    /// Fails unless every listed root is set and is a directory. Called before
    /// the first prompt.
    pub fn ensure(&self, modes: &[Mode]) -> Result<()> {
        for &mode in modes {
            let (var, _) = self.setting(mode);
            let path = self.root(mode)?;
            if !path.is_dir() {
                return Err(WizardError::RootNotDirectory {
                    var,
                    path: path.to_path_buf(),
                });
            }
        }
        Ok(())
    }
}
