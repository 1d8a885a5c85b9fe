//! Locates and loads `layerguard.toml`.
//!
//! Lookup order, first hit wins:
//!
//! 1. `--config <file>`
//! 2. `layerguard.toml`, then `.layerguard.toml`, in the project directory
//! 3. `config.toml` in the global directory (`$LAYERGUARD_CONFIG_DIR`,
//!    else `~/.layerguard/`)
//! 4. built-in defaults

use layerguard_core::{Config, ConfigError};
use std::path::{Path, PathBuf};

const PROJECT_CONFIG_NAMES: &[&str] = &["layerguard.toml", ".layerguard.toml"];
const GLOBAL_CONFIG_NAME: &str = "config.toml";
const CONFIG_DIR_ENV: &str = "LAYERGUARD_CONFIG_DIR";

/// Where the configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config` flag; trusted as given, so a missing file is an error later.
    Explicit(PathBuf),
    /// Project directory.
    Project(PathBuf),
    /// Global config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// The file to read, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Reads the config, or returns defaults for [`ConfigSource::Default`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load(&self) -> Result<Config, ConfigError> {
        match self.path() {
            Some(path) => {
                tracing::debug!("Loading {self}");
                Config::from_file(path)
            }
            None => Ok(Config::default()),
        }
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Explicit(p) => write!(f, "config {}", p.display()),
            Self::Project(p) => write!(f, "project config {}", p.display()),
            Self::Global(p) => write!(f, "global config {}", p.display()),
            Self::Default => f.write_str("built-in defaults"),
        }
    }
}

/// Resolves the config for `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_in(project_dir, explicit, global_config_dir().as_deref())
}

// Takes the global directory as a parameter so tests never touch the env.
fn resolve_in(project_dir: &Path, explicit: Option<&Path>, global_dir: Option<&Path>) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file())
    {
        return ConfigSource::Project(found);
    }

    global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.is_file())
        .map_or(ConfigSource::Default, ConfigSource::Global)
}

/// Global config directory: `$LAYERGUARD_CONFIG_DIR`, else `~/.layerguard`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    std::env::var_os(CONFIG_DIR_ENV)
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|h| h.join(".layerguard")))
}
