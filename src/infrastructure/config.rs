//! User configuration loaded from a TOML file.

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Settings read from `config.toml`. Every key is optional.
///
/// ```toml
/// tape_limit = 50
/// copy_on_evaluate = true
/// session_file = "work.tcalc"
/// export_file = "work.csv"
/// log_file = "/tmp/tcalc.log"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalcConfig {
    /// Maximum number of calculations kept on the tape.
    pub tape_limit: usize,
    /// Copy every successful result to the clipboard.
    pub copy_on_evaluate: bool,
    /// Default filename offered when saving or loading a session.
    pub session_file: String,
    /// Default filename offered when exporting the tape.
    pub export_file: String,
    /// Where logs go in interactive mode. No file, no logs.
    pub log_file: Option<PathBuf>,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            tape_limit: 100,
            copy_on_evaluate: false,
            session_file: "session.tcalc".to_string(),
            export_file: "tape.csv".to_string(),
            log_file: None,
        }
    }
}

impl CalcConfig {
    /// `<config_dir>/tcalc/config.toml`, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tcalc").join("config.toml"))
    }

    /// Loads the config from an explicit path, or from the default location.
    ///
    /// An explicit path must exist. A missing file at the default location
    /// yields the default config.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("no config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }
}
