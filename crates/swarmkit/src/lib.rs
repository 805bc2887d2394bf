//! # swarmkit
//!
//! Pure Rust library for bootstrapping a single-host Docker Swarm deployment.
//!
//! This crate provides the steps of the bootstrap pipeline:
//! - Verifying the Docker runtime and installing it through the host's package manager
//! - Activating swarm mode on the local engine
//! - Writing the static deployment artifacts
//! - Building the PHP-FPM image
//! - Deploying the stack
//!
//! Every external program runs through the [`Shell`] trait.
//!
//! ## Example
//!
//! ```no_run
//! use swarmkit::{Host, SystemShell, assets, image, runtime, stack, swarm};
//! use std::path::Path;
//!
//! let shell = SystemShell::new();
//! let dir = Path::new(".");
//!
//! runtime::ensure(&shell, || Host::detect(&shell)).expect("runtime");
//! swarm::ensure(&shell).expect("swarm");
//! assets::materialize(dir).expect("assets");
//! image::build(&shell, dir, &image::BuildSpec::default()).expect("build");
//! stack::deploy(&shell, dir, &stack::DeploySpec::default()).expect("deploy");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assets;
pub mod error;
pub mod host;
pub mod image;
pub mod runtime;
pub mod shell;
pub mod stack;
pub mod swarm;

#[cfg(test)]
pub(crate) mod testing;

pub use assets::{ASSETS, Asset, AssetState};
pub use error::{Error, ErrorCategory, Result};
pub use host::{Host, OsFamily};
pub use image::BuildSpec;
pub use runtime::{InstallPlan, RuntimeOutcome, RuntimePresence};
pub use shell::{CommandOutput, Exit, Shell, SystemShell};
pub use stack::{DeployOutcome, DeploySpec};
pub use swarm::{SwarmAction, SwarmOutcome, SwarmStatus};
