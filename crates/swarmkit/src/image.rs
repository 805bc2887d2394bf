//! Image build.

use crate::assets::DOCKERFILE;
use crate::error::{Error, Result};
use crate::shell::{Shell, command_line};
use std::path::Path;

/// Default image tag.
pub const DEFAULT_TAG: &str = "php-fpm:latest";

/// Arguments for `docker build`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSpec {
    /// Tag given with `-t`.
    pub tag: String,
    /// Dockerfile given with `-f`, relative to the working directory.
    pub dockerfile: String,
    /// Build context.
    pub context: String,
}

impl Default for BuildSpec {
    fn default() -> Self {
        Self {
            tag: DEFAULT_TAG.to_string(),
            dockerfile: DOCKERFILE.name.to_string(),
            context: ".".to_string(),
        }
    }
}

impl BuildSpec {
    /// Arguments passed to `docker`.
    pub fn args(&self) -> Vec<&str> {
        vec![
            "build",
            "-t",
            self.tag.as_str(),
            "-f",
            self.dockerfile.as_str(),
            self.context.as_str(),
        ]
    }
}

/// Build the image inside `dir`, streaming build output to the terminal.
///
/// A non-zero exit is an error.
pub fn build(shell: &dyn Shell, dir: &Path, spec: &BuildSpec) -> Result<()> {
    let args = spec.args();
    let exit = shell.run_inherit_in(Some(dir), "docker", &args)?;
    if !exit.success {
        return Err(Error::CommandFailed {
            command: command_line("docker", &args),
            code: exit.code_or_signal(),
        });
    }
    Ok(())
}
