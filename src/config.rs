//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/nestsum/nestsum.toml`
//! 3. Environment variables: `NESTSUM_*` prefix

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;

/// Prefix of the environment variables read by [`Settings::load`].
pub const ENV_PREFIX: &str = "NESTSUM";

/// How the summation service walks a tree.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Traversal {
    /// Plain recursion; call-stack depth equals tree height
    #[default]
    Recursive,
    /// Explicit work stack on the heap
    Iterative,
}

impl fmt::Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Traversal::Recursive => write!(f, "recursive"),
            Traversal::Iterative => write!(f, "iterative"),
        }
    }
}

impl FromStr for Traversal {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recursive" => Ok(Traversal::Recursive),
            "iterative" => Ok(Traversal::Iterative),
            other => Err(ApplicationError::Config {
                message: format!("unknown traversal: {other}"),
            }),
        }
    }
}

/// Unified configuration for nestsum.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Traversal strategy (default: recursive)
    pub traversal: Traversal,
    /// Reject trees deeper than this (default: no limit)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

/// Raw settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub traversal: Option<Traversal>,
    pub max_depth: Option<usize>,
}

/// Get the XDG config directory for nestsum.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "nestsum").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("nestsum.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            traversal: overlay.traversal.unwrap_or(self.traversal),
            max_depth: overlay.max_depth.or(self.max_depth),
        }
    }

    /// Load settings with layered precedence from the standard locations.
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/nestsum/nestsum.toml`
    /// 3. Environment variables: `NESTSUM_TRAVERSAL`, `NESTSUM_MAX_DEPTH`
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref(), ENV_PREFIX)
    }

    /// Load settings from an explicit global config file and env prefix.
    ///
    /// A missing file is skipped; an unreadable or malformed one is an error.
    pub fn load_from(global: Option<&Path>, env_prefix: &str) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global {
            if global_path.exists() {
                debug!("load_from: global config {}", global_path.display());
                let raw = load_raw_settings(global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Environment variables (explicit override)
        current = Self::apply_env_overrides(current, env_prefix)?;

        debug!("load_from: {:?}", current);
        Ok(current)
    }

    /// Apply `<PREFIX>_*` environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self, env_prefix: &str) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .separator("__"),
        );
        let config = builder.build().map_err(config_err)?;

        match config.get_string("traversal") {
            Ok(val) => settings.traversal = val.parse()?,
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }
        match config.get_string("max_depth") {
            Ok(val) => {
                let limit = val.trim().parse::<usize>().map_err(|e| ApplicationError::Config {
                    message: format!("{env_prefix}_MAX_DEPTH={val}: {e}"),
                })?;
                settings.max_depth = Some(limit);
            }
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# nestsum configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/nestsum/nestsum.toml
#   Env:    NESTSUM_* environment variables (explicit overrides)

# How trees are walked: "recursive" or "iterative"
# traversal = "recursive"

# Reject trees nested deeper than this
# max_depth = 10000
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
