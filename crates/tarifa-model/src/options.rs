//! Configuration options for contract assembly.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Environment variable naming a TOML options file.
pub const CONFIG_ENV_VAR: &str = "TARIFA_CONFIG";

/// Additional-line limit used when a structure row leaves `MaxAdditional` blank.
pub const DEFAULT_MAX_ADDITIONAL: usize = 4;

/// Options controlling contract assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractOptions {
    /// Sales agent name written to `EJECUTIVO` and the submission notice.
    pub executive: String,

    /// Additional-line limit for structure rows without `MaxAdditional`.
    pub default_max_additional: usize,
}

impl Default for ContractOptions {
    fn default() -> Self {
        Self {
            executive: String::new(),
            default_max_additional: DEFAULT_MAX_ADDITIONAL,
        }
    }
}

impl ContractOptions {
    pub fn with_executive(mut self, executive: impl Into<String>) -> Self {
        self.executive = executive.into().trim().to_string();
        self
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Resolves the options file: explicit path first, then `TARIFA_CONFIG`,
    /// then defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from));
        match path {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }
}
