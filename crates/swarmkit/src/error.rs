//! Error types for bootstrap operations.
//!
//! Errors are categorized so the CLI can print a short description and an
//! actionable hint next to the raw message.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result type alias for bootstrap operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Categories of bootstrap errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Host OS or distribution cannot be handled automatically.
    Platform,
    /// An external command could not be started or exited non-zero.
    Command,
    /// Filesystem error while writing or reading artifacts.
    Io,
}

impl ErrorCategory {
    /// Get a user-friendly description of this error category.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Platform => "Unsupported platform",
            Self::Command => "External command failed",
            Self::Io => "Filesystem error",
        }
    }

    /// Get actionable advice for resolving this error category.
    #[must_use]
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Platform => "Install Docker manually, then run swarmup again",
            Self::Command => "Check that the Docker daemon is running and reachable",
            Self::Io => "Check free disk space and permissions of the working directory",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Errors that can occur while bootstrapping the deployment.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The program could not be started at all (usually: not on `$PATH`).
    #[error("failed to execute {program}: {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// A command ran but exited unsuccessfully.
    #[error("command failed: {command} (exit code {code})")]
    CommandFailed {
        /// Full command line.
        command: String,
        /// Exit code, `-1` when terminated by a signal.
        code: i32,
    },

    /// `docker info` could not report the engine status.
    #[error("could not query the Docker engine status: {message}")]
    StatusQuery {
        /// Error output or reason.
        message: String,
    },

    /// The operating system is not supported.
    #[error("unsupported operating system: {os}")]
    UnsupportedPlatform {
        /// Operating system name.
        os: String,
    },

    /// The Linux distribution has no known install command.
    #[error("unsupported Linux distribution '{distro}'. Install Docker manually.")]
    UnsupportedDistribution {
        /// Distribution identifier as reported by the host.
        distro: String,
    },

    /// The runtime has to be installed by hand on this OS.
    #[error("install Docker manually on {os} via {url}")]
    ManualInstallRequired {
        /// Operating system name.
        os: String,
        /// Installation instructions.
        url: String,
    },

    /// IO error during file operations.
    #[error("IO error at {path}: {source}")]
    Io {
        /// Path involved in the error.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Get the error category.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnsupportedPlatform { .. }
            | Self::UnsupportedDistribution { .. }
            | Self::ManualInstallRequired { .. } => ErrorCategory::Platform,
            Self::Spawn { .. } | Self::CommandFailed { .. } | Self::StatusQuery { .. } => {
                ErrorCategory::Command
            }
            Self::Io { .. } => ErrorCategory::Io,
        }
    }

    /// Create an IO error with path context.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
