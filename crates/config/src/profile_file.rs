//! Profile file location and parsing.
//!
//! Responsibilities:
//! - Determine the platform config file path via the `directories` crate.
//! - Read and parse the JSON profile file.
//!
//! Does NOT handle:
//! - Writing profiles; the file is maintained by hand.
//! - Merging profile values into a loader (see `loader::profile`).
//!
//! Invariants:
//! - A missing file is reported distinctly from an unreadable or malformed one.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::loader::ConfigError;
use crate::types::ProfileConfig;

/// On-disk layout of the profile file.
///
/// ```json
/// { "profiles": { "contoso": { "tenant_id": "...", "client_id": "..." } } }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileFile {
    pub profiles: BTreeMap<String, ProfileConfig>,
}

impl ProfileFile {
    /// Load the profile file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|_| ConfigError::ConfigFileRead {
            path: path.to_path_buf(),
        })?;
        serde_json::from_str(&raw).map_err(|_| ConfigError::ConfigFileParse {
            path: path.to_path_buf(),
        })
    }

    /// Look up a profile by name.
    pub fn profile(&self, name: &str) -> Option<&ProfileConfig> {
        self.profiles.get(name)
    }
}

/// Returns the default path to the profile file.
///
/// - Linux: `~/.config/tenant-license-report/config.json`
/// - macOS: `~/Library/Application Support/tenant-license-report/config.json`
/// - Windows: `%AppData%\tenant-license-report\config.json`
pub fn default_config_path() -> Result<PathBuf, anyhow::Error> {
    let proj_dirs = directories::ProjectDirs::from("", "", "tenant-license-report")
        .context("Failed to determine project directories")?;

    Ok(proj_dirs.config_dir().join("config.json"))
}
