use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::utils::error::{ModelError, Result};

pub const DEFAULT_STORE_FILE: &str = "file.json";

/// Where the file-backed engine keeps its store. Loadable from a TOML file
/// or overridden through the `MODELSTORE_FILE` environment variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_file_path")]
    pub file_path: String,
}

fn default_file_path() -> String {
    DEFAULT_STORE_FILE.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            file_path: default_file_path(),
        }
    }
}

impl StoreConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ModelError::ConfigError {
            message: e.to_string(),
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_env() -> Self {
        match std::env::var("MODELSTORE_FILE") {
            Ok(path) if !path.is_empty() => Self { file_path: path },
            _ => Self::default(),
        }
    }
}
