//! Stack deployment.
//!
//! The deploy command's exit status is handed back to the caller and never
//! turned into an error, not even when `docker` cannot be started.

use crate::assets::COMPOSE;
use crate::error::{Error, Result};
use crate::shell::{Exit, Shell};
use std::path::Path;

/// Default stack name.
pub const DEFAULT_STACK_NAME: &str = "minha_aplicacao";

/// Arguments for `docker stack deploy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploySpec {
    /// Compose file given with `-c`, relative to the working directory.
    pub compose_file: String,
    /// Name of the stack.
    pub stack_name: String,
}

impl Default for DeploySpec {
    fn default() -> Self {
        Self {
            compose_file: COMPOSE.name.to_string(),
            stack_name: DEFAULT_STACK_NAME.to_string(),
        }
    }
}

impl DeploySpec {
    /// Arguments passed to `docker`.
    pub fn args(&self) -> Vec<&str> {
        vec![
            "stack",
            "deploy",
            "-c",
            self.compose_file.as_str(),
            self.stack_name.as_str(),
        ]
    }
}

/// Result of a deploy attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployOutcome {
    /// Exit status of `docker stack deploy`.
    pub exit: Exit,
}

/// Deploy the stack from inside `dir`.
///
/// A `docker` binary that cannot be started is reported as exit code 127.
pub fn deploy(shell: &dyn Shell, dir: &Path, spec: &DeploySpec) -> Result<DeployOutcome> {
    let exit = match shell.run_inherit_in(Some(dir), "docker", &spec.args()) {
        Ok(exit) => exit,
        Err(Error::Spawn { program, source }) => {
            log::warn!("could not start {program}: {source}");
            Exit::NOT_FOUND
        }
        Err(e) => return Err(e),
    };
    if !exit.success {
        log::warn!(
            "stack deploy for '{}' exited with code {}",
            spec.stack_name,
            exit.code_or_signal()
        );
    }
    Ok(DeployOutcome { exit })
}
