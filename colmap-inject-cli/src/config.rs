use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// Relative locations of the ingestion inputs and the target database
/// beneath the project directory.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Camera calibration dump
    pub cameras_file: PathBuf,

    /// Image pose dump
    pub images_file: PathBuf,

    /// Target COLMAP database
    pub database_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cameras_file: PathBuf::from("colmap/sparse/origin/cameras.txt"),
            images_file: PathBuf::from("colmap/sparse/origin/images.txt"),
            database_path: PathBuf::from("colmap/database.db"),
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, CliError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_owned(),
            source,
        })?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }
}
