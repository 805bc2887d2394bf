//! Host operating system and Linux distribution detection.

use crate::shell::Shell;
use std::fmt;
use std::fs;
use std::path::Path;

/// Default location of the os-release file.
pub const OS_RELEASE_PATH: &str = "/etc/os-release";

/// Operating system family of the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OsFamily {
    /// Any Linux distribution.
    Linux,
    /// macOS.
    MacOs,
    /// Anything else, with the name reported by the standard library.
    Other(String),
}

impl OsFamily {
    /// Family of the machine this binary runs on.
    pub fn current() -> Self {
        Self::from_name(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` value to a family.
    pub fn from_name(name: &str) -> Self {
        match name {
            "linux" => Self::Linux,
            "macos" => Self::MacOs,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "Linux"),
            Self::MacOs => write!(f, "macOS"),
            Self::Other(name) => write!(f, "{name}"),
        }
    }
}

/// What we know about the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    /// Operating system family.
    pub os: OsFamily,
    /// Lowercased distribution name, only populated on Linux.
    pub distro: Option<String>,
}

impl Host {
    /// Build a host description by hand.
    pub fn new(os: OsFamily, distro: Option<&str>) -> Self {
        Self {
            os,
            distro: distro.map(str::to_lowercase),
        }
    }

    /// Detect the current host. The distribution is only queried on Linux.
    pub fn detect(shell: &dyn Shell) -> Self {
        let os = OsFamily::current();
        let distro = match os {
            OsFamily::Linux => detect_distro(shell, Path::new(OS_RELEASE_PATH)),
            _ => None,
        };
        Self { os, distro }
    }
}

/// Detect the Linux distribution, lowercased.
///
/// Asks `lsb_release -is` first. When that is missing or fails, falls back to
/// the given os-release file.
pub fn detect_distro(shell: &dyn Shell, os_release: &Path) -> Option<String> {
    match shell.run("lsb_release", &["-is"]) {
        Ok(output) if output.success => {
            let id = output.stdout_str().trim().to_lowercase();
            if !id.is_empty() {
                return Some(id);
            }
        }
        Ok(output) => log::debug!("lsb_release failed: {}", output.stderr_str().trim()),
        Err(e) => log::debug!("lsb_release unavailable: {e}"),
    }

    let content = fs::read_to_string(os_release).ok()?;
    parse_os_release(&content)
}

/// Distribution name from os-release content.
///
/// `NAME` is preferred over `ID`: Oracle Linux reports `ID="ol"` but
/// `NAME="Oracle Linux Server"`, and only the latter names the vendor.
pub fn parse_os_release(content: &str) -> Option<String> {
    os_release_field(content, "NAME").or_else(|| os_release_field(content, "ID"))
}

fn os_release_field(content: &str, key: &str) -> Option<String> {
    content
        .lines()
        .filter_map(|line| line.trim().strip_prefix(key)?.strip_prefix('='))
        .map(|value| value.trim().trim_matches('"').trim_matches('\'').to_lowercase())
        .find(|value| !value.is_empty())
}
