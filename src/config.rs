//! Runtime settings.
//!
//! Every value has a built-in default; nothing is read unless `--config`
//! points at a TOML file. Example:
//!
//! ```toml
//! [stack]
//! name = "minha_aplicacao"
//! ```
//!
//! The image tag is not configurable: the generated compose file references
//! `php-fpm:latest`, and the built image has to match it.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use swarmkit::DeploySpec;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub stack: StackSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StackSettings {
    pub name: String,
}

impl Default for StackSettings {
    fn default() -> Self {
        Self {
            name: swarmkit::stack::DEFAULT_STACK_NAME.to_string(),
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults when no file is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        let settings: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid config format in {}", path.display()))?;
        log::debug!("Loaded settings from {}: {:?}", path.display(), settings);
        Ok(settings)
    }

    pub fn deploy_spec(&self) -> DeploySpec {
        DeploySpec {
            stack_name: self.stack.name.clone(),
            ..DeploySpec::default()
        }
    }
}

/// Resolve the working directory, defaulting to the current directory
pub fn resolve_workdir(dir: Option<&Path>) -> Result<PathBuf> {
    match dir {
        Some(dir) => {
            anyhow::ensure!(
                dir.is_dir(),
                "Working directory does not exist: {}",
                dir.display()
            );
            Ok(dir.to_path_buf())
        }
        None => std::env::current_dir().context("Could not determine current directory"),
    }
}
