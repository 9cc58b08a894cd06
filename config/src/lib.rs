//! Configuration loading and parsing for Switchboard.
//!
//! Raw TOML structs (all fields optional) stay private to this crate. They are
//! resolved into [`SwitchboardConfig`] at the parse boundary, so a loaded config
//! never carries contradictory options.
//!
//! ```toml
//! [options]
//! allow_multiple = false
//!
//! [states.sidebar]
//! value = true
//!
//! [states.header]
//! always_on = true
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use switchboard_types::{ControllerOptions, ControllerPolicy, OptionsConflict, StateSpec};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Options(#[from] OptionsConflict),
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    options: ControllerOptions,
    #[serde(default)]
    states: BTreeMap<String, StateSpec>,
}

/// Resolved configuration: a valid policy plus the states to create, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwitchboardConfig {
    policy: ControllerPolicy,
    states: Vec<(String, StateSpec)>,
}

impl SwitchboardConfig {
    #[must_use]
    pub fn new(policy: ControllerPolicy, states: Vec<(String, StateSpec)>) -> Self {
        Self { policy, states }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;
        let policy = raw.options.resolve()?;
        Ok(Self {
            policy,
            states: raw.states.into_iter().collect(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load `~/.switchboard/config.toml` if present.
    ///
    /// Read and parse failures are logged and treated as "no config".
    #[must_use]
    pub fn load_default() -> Option<Self> {
        let path = config_path()?;
        if !path.exists() {
            return None;
        }

        match Self::load(&path) {
            Ok(config) => Some(config),
            Err(err) => {
                tracing::warn!("Failed to load config at {}: {err}", path.display());
                None
            }
        }
    }

    #[must_use]
    pub fn policy(&self) -> ControllerPolicy {
        self.policy
    }

    /// State specs in key order.
    #[must_use]
    pub fn states(&self) -> &[(String, StateSpec)] {
        &self.states
    }

    #[must_use]
    pub fn into_parts(self) -> (ControllerPolicy, Vec<(String, StateSpec)>) {
        (self.policy, self.states)
    }
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".switchboard").join("config.toml"))
}
