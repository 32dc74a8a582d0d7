use crate::common::error::{EtlError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Pipeline configuration. Table identifiers are deliberately not here; they
/// are fixed constants shared with the upstream loader (see common::constants).
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub warehouse: WarehouseConfig,
}

#[derive(Debug, Deserialize)]
pub struct WarehouseConfig {
    /// Directory holding one JSON document per table.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("warehouse")
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            warehouse: WarehouseConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(path).map_err(|e| {
            EtlError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }

    /// Loads `config.toml` from the working directory, falling back to
    /// defaults when the file does not exist.
    pub fn load_or_default() -> Result<Self> {
        let path = Path::new("config.toml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
