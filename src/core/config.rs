//! Stage configuration store.
//!
//! Stages live in `.goseal` YAML files in two places: a global directory
//! under the user's config dir, and the current working directory. Both
//! are loaded and merged; lookups search local entries before global ones.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// A named preset for output location and signing certificate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageConfiguration {
    pub name: String,
    /// Certificate passed to kubeseal; empty means unsealed output.
    #[serde(default)]
    pub cert: String,
    /// Directory prefixed onto `--out`.
    #[serde(default, rename = "basePath")]
    pub base_path: String,
}

/// Ordered list of stage configurations, as stored in `.goseal`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub configs: Vec<StageConfiguration>,
}

/// Which of the two config files to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// `$GOSEAL_CONFIG_DIR`, or `<user config dir>/goseal`
    Global,
    /// The current working directory
    Local,
}

impl Scope {
    pub fn from_global_flag(global: bool) -> Self {
        if global {
            Scope::Global
        } else {
            Scope::Local
        }
    }

    /// Directory holding this scope's config file.
    pub fn dir(self) -> Result<PathBuf> {
        match self {
            Scope::Global => {
                if let Some(dir) = std::env::var_os(constants::CONFIG_DIR_ENV) {
                    return Ok(PathBuf::from(dir));
                }
                dirs::config_dir()
                    .map(|d| d.join(constants::GLOBAL_DIR_NAME))
                    .ok_or_else(|| ConfigError::NoConfigDir.into())
            }
            Scope::Local => Ok(std::env::current_dir()?),
        }
    }
}

impl Configuration {
    /// Load the configuration for a scope.
    pub fn load(scope: Scope) -> Result<Self> {
        Self::load_from(&scope.dir()?)
    }

    /// Load `.goseal` from `dir`, creating `dir` if it does not exist.
    ///
    /// A missing file yields an empty configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotADirectory` if `dir` is occupied by a file,
    /// or `ConfigError::Parse` if the YAML is malformed.
    pub fn load_from(dir: &Path) -> Result<Self> {
        ensure_dir(dir)?;

        let path = config_path(dir);
        debug!(path = %path.display(), "loading config");

        if !path.exists() || path.is_dir() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path).map_err(ConfigError::ReadFile)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(&contents)
            .map_err(|source| ConfigError::Parse { path, source })?;

        debug!(stages = config.configs.len(), "config loaded");
        Ok(config)
    }

    /// Serialize and write the configuration for a scope.
    pub fn write(&self, scope: Scope) -> Result<()> {
        self.write_to(&scope.dir()?)
    }

    /// Write `.goseal` into `dir`, overwriting any existing file.
    pub fn write_to(&self, dir: &Path) -> Result<()> {
        ensure_dir(dir)?;

        let path = config_path(dir);
        debug!(path = %path.display(), stages = self.configs.len(), "saving config");

        let contents = serde_yaml::to_string(self).map_err(ConfigError::Serialize)?;
        std::fs::write(&path, contents).map_err(ConfigError::WriteFile)?;
        Ok(())
    }

    /// Entries of `self` followed by entries of `overlay`. No deduplication.
    pub fn patch(mut self, overlay: Configuration) -> Configuration {
        self.configs.extend(overlay.configs);
        self
    }

    /// First stage whose name matches exactly.
    pub fn get_stage_config_by_name(&self, name: &str) -> Result<&StageConfiguration> {
        self.configs
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| ConfigError::StageNotFound(name.to_string()).into())
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

/// Global and local configurations as loaded from disk.
#[derive(Debug, Default)]
pub struct Layers {
    pub global: Configuration,
    pub local: Configuration,
}

impl Layers {
    /// Load both config files.
    pub fn load() -> Result<Self> {
        Ok(Self {
            global: Configuration::load(Scope::Global)?,
            local: Configuration::load(Scope::Local)?,
        })
    }

    /// Merged view in lookup order: local entries first, then global.
    pub fn merged(&self) -> Configuration {
        self.local.clone().patch(self.global.clone())
    }

    pub fn scope_mut(&mut self, scope: Scope) -> &mut Configuration {
        match scope {
            Scope::Global => &mut self.global,
            Scope::Local => &mut self.local,
        }
    }
}

/// Look up a stage across both config files, local first.
pub fn resolve_stage(name: &str) -> Result<StageConfiguration> {
    let layers = Layers::load()?;
    let stage = layers.merged().get_stage_config_by_name(name)?.clone();
    debug!(stage = %stage.name, "resolved stage config");
    Ok(stage)
}

fn config_path(dir: &Path) -> PathBuf {
    dir.join(constants::CONFIG_FILE)
}

/// Create `dir` (and parents) unless it already exists as a directory.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    if dir.exists() && !dir.is_dir() {
        return Err(ConfigError::NotADirectory(dir.to_path_buf()).into());
    }
    std::fs::create_dir_all(dir)?;
    Ok(())
}
