//! Swarm mode bootstrap.
//!
//! The engine status comes from `docker info` and is inspected for two
//! literal markers. An active swarm without a `NodeID` line is handled by
//! running `docker swarm init` again; that command does not promote an
//! existing member, it only initializes.

use crate::error::{Error, Result};
use crate::shell::{Exit, Shell};

/// Marker for an active swarm in `docker info` output.
pub const ACTIVE_MARKER: &str = "Swarm: active";

/// Marker for a node identity in `docker info` output.
pub const NODE_ID_MARKER: &str = "NodeID";

/// Swarm state as read from `docker info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SwarmStatus {
    /// `Swarm: active` was reported.
    pub active: bool,
    /// A `NodeID` line was reported.
    pub has_node_id: bool,
}

impl SwarmStatus {
    /// Parse `docker info` output.
    pub fn parse(info: &str) -> Self {
        Self {
            active: info.contains(ACTIVE_MARKER),
            has_node_id: info.contains(NODE_ID_MARKER),
        }
    }

    /// Whether the local node is already a usable manager.
    pub fn is_manager(&self) -> bool {
        self.active && self.has_node_id
    }
}

/// Step to take for a given status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwarmAction {
    /// Swarm is active and the node has an id.
    Nothing,
    /// Swarm is inactive.
    Init,
    /// Swarm is active but no node id was reported.
    Reinit,
}

impl SwarmAction {
    /// Decide what to do for a status.
    pub fn decide(status: &SwarmStatus) -> Self {
        match (status.active, status.has_node_id) {
            (false, _) => Self::Init,
            (true, false) => Self::Reinit,
            (true, true) => Self::Nothing,
        }
    }

    /// Whether this action runs `docker swarm init`.
    pub fn runs_init(&self) -> bool {
        !matches!(self, Self::Nothing)
    }
}

/// What [`ensure`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwarmOutcome {
    /// Action that was taken.
    pub action: SwarmAction,
    /// Exit status of `docker swarm init`, if it ran.
    pub init_exit: Option<Exit>,
}

/// Query the engine status.
pub fn status(shell: &dyn Shell) -> Result<SwarmStatus> {
    let output = shell
        .run("docker", &["info"])
        .map_err(|e| Error::StatusQuery {
            message: e.to_string(),
        })?;

    if !output.success {
        return Err(Error::StatusQuery {
            message: format!(
                "docker info exited with code {}: {}",
                output.exit().code_or_signal(),
                output.stderr_str().trim()
            ),
        });
    }

    Ok(SwarmStatus::parse(&output.stdout_str()))
}

/// Make sure swarm mode is active on the local engine.
///
/// Runs `docker swarm init` at most once. Its exit status is returned in the
/// outcome but never turned into an error.
pub fn ensure(shell: &dyn Shell) -> Result<SwarmOutcome> {
    let status = status(shell)?;
    let action = SwarmAction::decide(&status);
    log::debug!("swarm status {status:?} -> {action:?}");

    let init_exit = apply(shell, action)?;
    Ok(SwarmOutcome { action, init_exit })
}

/// Carry out a decided action. Returns the init exit status when init ran.
pub fn apply(shell: &dyn Shell, action: SwarmAction) -> Result<Option<Exit>> {
    if !action.runs_init() {
        return Ok(None);
    }
    let exit = shell.run_inherit("docker", &["swarm", "init"])?;
    if !exit.success {
        log::warn!("docker swarm init exited with code {}", exit.code_or_signal());
    }
    Ok(Some(exit))
}
