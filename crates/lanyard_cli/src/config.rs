//! Resolution of the simulation configuration.
//!
//! Precedence, lowest to highest: built-in defaults, the TOML file given
//! with `--config`, then viewport flags. The result is validated once here
//! so every subcommand starts from a configuration the badge accepts.

use std::fs;
use std::path::{Path, PathBuf};

use lanyard::config::COARSE_POINTER_MAX_ANGLE;
use lanyard::{ConfigError, PointerKind, SimConfig, Viewport};
use tracing::info;

use crate::cli::Cli;

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Config file could not be read.
    #[error("Cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for a simulation config.
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The resolved configuration was rejected by the simulation.
    #[error("Invalid simulation config: {0}")]
    Invalid(#[from] ConfigError),
}

/// Loads a partial simulation config from a TOML file.
///
/// # Errors
///
/// Returns [`SettingsError::Read`] or [`SettingsError::Parse`].
pub fn load_file(path: &Path) -> Result<SimConfig, SettingsError> {
    let text = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses a partial simulation config.
///
/// # Errors
///
/// Returns the TOML error if `text` is malformed or has mistyped fields.
pub fn parse(text: &str) -> Result<SimConfig, toml::de::Error> {
    toml::from_str(text)
}

/// Builds the effective simulation config from CLI arguments.
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded or the result is
/// not a valid simulation config.
pub fn resolve(cli: &Cli) -> Result<SimConfig, SettingsError> {
    let mut config = match &cli.config {
        Some(path) => {
            info!(path = %path.display(), "loading simulation config");
            load_file(path)?
        }
        None => SimConfig::default(),
    };

    let pointer = if cli.coarse {
        PointerKind::Coarse
    } else {
        PointerKind::Fine
    };
    if let Some(height) = cli.viewport_height {
        config = config.with_viewport(Viewport::new(height, pointer));
    } else if cli.coarse {
        config.max_angle_degrees = COARSE_POINTER_MAX_ANGLE;
    }

    config.validate()?;
    Ok(config)
}

/// Renders a config as TOML.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_toml(config: &SimConfig) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(config)
}
