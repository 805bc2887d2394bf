//! Container runtime verification and installation.
//!
//! Presence is decided by `docker --version` alone. When it fails, the host
//! decides which package-manager one-liner is run. The install command's exit
//! status is reported back but never turned into an error.

use crate::error::{Error, Result};
use crate::host::{Host, OsFamily};
use crate::shell::{Exit, Shell};
use std::fmt;
use std::path::PathBuf;

/// Manual installation instructions for macOS.
pub const MACOS_INSTALL_URL: &str = "https://docs.docker.com/desktop/install/mac/";

/// Install line for Debian-family distributions.
pub const APT_INSTALL: &str = "apt-get update && apt-get install -y docker.io";

/// Install line for RHEL-family distributions.
pub const YUM_INSTALL: &str =
    "yum install -y docker && systemctl start docker && systemctl enable docker";

/// Whether the runtime answered the version query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimePresence {
    /// `docker --version` exited 0.
    Present {
        /// Trimmed version line.
        version: String,
    },
    /// The query failed or the binary is missing.
    Absent,
}

impl RuntimePresence {
    /// Check if the runtime is present.
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present { .. })
    }
}

/// Query the runtime version.
pub fn probe(shell: &dyn Shell) -> RuntimePresence {
    match shell.run("docker", &["--version"]) {
        Ok(output) if output.success => RuntimePresence::Present {
            version: output.stdout_str().trim().to_string(),
        },
        Ok(output) => {
            log::debug!(
                "docker --version exited with {}",
                output.exit().code_or_signal()
            );
            RuntimePresence::Absent
        }
        Err(e) => {
            log::debug!("docker --version could not run: {e}");
            RuntimePresence::Absent
        }
    }
}

/// Locate the `docker` binary on `$PATH`.
pub fn locate() -> Option<PathBuf> {
    which::which("docker").ok()
}

/// Package manager used to install the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallPlan {
    /// `apt-get` on Ubuntu and Debian.
    Apt,
    /// `yum` plus `systemctl` on CentOS and Oracle Linux.
    Yum,
}

impl InstallPlan {
    /// Pick the install plan for a host.
    pub fn for_host(host: &Host) -> Result<Self> {
        match &host.os {
            OsFamily::Linux => {
                let distro = host.distro.clone().unwrap_or_default();
                if distro.contains("ubuntu") || distro.contains("debian") {
                    Ok(Self::Apt)
                } else if distro.contains("centos") || distro.contains("oracle") {
                    Ok(Self::Yum)
                } else {
                    Err(Error::UnsupportedDistribution { distro })
                }
            }
            OsFamily::MacOs => Err(Error::ManualInstallRequired {
                os: host.os.to_string(),
                url: MACOS_INSTALL_URL.to_string(),
            }),
            OsFamily::Other(os) => Err(Error::UnsupportedPlatform { os: os.clone() }),
        }
    }

    /// Shell line that performs the installation.
    pub fn command(&self) -> &'static str {
        match self {
            Self::Apt => APT_INSTALL,
            Self::Yum => YUM_INSTALL,
        }
    }
}

impl fmt::Display for InstallPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Apt => write!(f, "apt-get"),
            Self::Yum => write!(f, "yum"),
        }
    }
}

/// What [`ensure`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeOutcome {
    /// Runtime was already there; nothing was installed.
    AlreadyInstalled {
        /// Version line reported by the runtime.
        version: String,
    },
    /// An install command ran. Its exit status is not verified further.
    Installed {
        /// Plan that was used.
        plan: InstallPlan,
        /// Exit status of the install line.
        exit: Exit,
    },
}

/// Make sure the runtime is present, installing it when it is not.
///
/// `detect_host` is only called when the runtime is absent.
pub fn ensure<F>(shell: &dyn Shell, detect_host: F) -> Result<RuntimeOutcome>
where
    F: FnOnce() -> Host,
{
    if let RuntimePresence::Present { version } = probe(shell) {
        return Ok(RuntimeOutcome::AlreadyInstalled { version });
    }

    let host = detect_host();
    let (plan, exit) = install(shell, &host)?;
    Ok(RuntimeOutcome::Installed { plan, exit })
}

/// Install the runtime with the package manager that fits `host`.
///
/// Fails before running anything when the host has no known install plan.
pub fn install(shell: &dyn Shell, host: &Host) -> Result<(InstallPlan, Exit)> {
    log::info!("Installing runtime on {} ({:?})", host.os, host.distro);
    let plan = InstallPlan::for_host(host)?;
    let exit = shell.run_script(plan.command())?;
    if !exit.success {
        log::warn!(
            "{} install exited with code {}",
            plan,
            exit.code_or_signal()
        );
    }
    Ok((plan, exit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Reply, ScriptedShell};

    fn linux(distro: &str) -> Host {
        Host::new(OsFamily::Linux, Some(distro))
    }

    #[test]
    fn test_present_runtime_skips_install() {
        let shell =
            ScriptedShell::new().on("docker --version", Reply::stdout(0, "Docker version 27.1.1\n"));

        let outcome = ensure(&shell, || panic!("host detection must not run")).unwrap();

        assert_eq!(
            outcome,
            RuntimeOutcome::AlreadyInstalled {
                version: "Docker version 27.1.1".to_string()
            }
        );
        assert_eq!(shell.calls(), vec!["docker --version"]);
    }

    #[test]
    fn test_ubuntu_uses_apt() {
        let shell = ScriptedShell::new().on("docker --version", Reply::exit(1));

        let outcome = ensure(&shell, || linux("Ubuntu")).unwrap();

        assert_eq!(
            outcome,
            RuntimeOutcome::Installed {
                plan: InstallPlan::Apt,
                exit: Exit::OK
            }
        );
        assert_eq!(
            shell.calls(),
            vec![
                "docker --version".to_string(),
                format!("sh -c {APT_INSTALL}")
            ]
        );
    }

    #[test]
    fn test_debian_uses_apt() {
        let shell = ScriptedShell::new().on("docker --version", Reply::exit(1));
        ensure(&shell, || linux("debian")).unwrap();
        assert_eq!(shell.count(&format!("sh -c {APT_INSTALL}")), 1);
    }

    #[test]
    fn test_centos_and_oracle_use_yum() {
        for distro in ["CentOS", "OracleServer"] {
            let shell = ScriptedShell::new().on("docker --version", Reply::exit(1));
            let outcome = ensure(&shell, || linux(distro)).unwrap();
            assert!(matches!(
                outcome,
                RuntimeOutcome::Installed {
                    plan: InstallPlan::Yum,
                    ..
                }
            ));
            assert_eq!(shell.count(&format!("sh -c {YUM_INSTALL}")), 1);
        }
    }

    #[test]
    fn test_missing_binary_counts_as_absent() {
        let shell = ScriptedShell::new().on("docker --version", Reply::Spawn);
        assert_eq!(probe(&shell), RuntimePresence::Absent);

        ensure(&shell, || linux("ubuntu")).unwrap();
        assert_eq!(shell.count("sh -c apt-get"), 1);
    }

    #[test]
    fn test_failed_install_is_not_an_error() {
        let shell = ScriptedShell::new()
            .on("docker --version", Reply::exit(1))
            .on("sh -c", Reply::exit(100));

        let outcome = ensure(&shell, || linux("ubuntu")).unwrap();

        match outcome {
            RuntimeOutcome::Installed { exit, .. } => {
                assert!(!exit.success);
                assert_eq!(exit.code, Some(100));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_macos_requires_manual_install() {
        let shell = ScriptedShell::new().on("docker --version", Reply::exit(1));

        let err = ensure(&shell, || Host::new(OsFamily::MacOs, None)).unwrap_err();

        match &err {
            Error::ManualInstallRequired { url, .. } => assert_eq!(url, MACOS_INSTALL_URL),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains(MACOS_INSTALL_URL));
        assert_eq!(shell.calls(), vec!["docker --version"]);
    }

    #[test]
    fn test_unknown_distro_is_rejected() {
        let shell = ScriptedShell::new().on("docker --version", Reply::exit(1));
        let err = ensure(&shell, || linux("arch")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedDistribution { ref distro } if distro == "arch"));
        assert_eq!(shell.count("sh -c"), 0);
    }

    #[test]
    fn test_unknown_distro_when_detection_failed() {
        let host = Host::new(OsFamily::Linux, None);
        assert!(matches!(
            InstallPlan::for_host(&host),
            Err(Error::UnsupportedDistribution { .. })
        ));
    }

    #[test]
    fn test_other_os_is_rejected() {
        let host = Host::new(OsFamily::Other("windows".to_string()), None);
        let err = InstallPlan::for_host(&host).unwrap_err();
        assert!(matches!(err, Error::UnsupportedPlatform { ref os } if os == "windows"));
    }

    #[test]
    fn test_plan_commands() {
        assert_eq!(
            InstallPlan::Apt.command(),
            "apt-get update && apt-get install -y docker.io"
        );
        assert_eq!(
            InstallPlan::Yum.command(),
            "yum install -y docker && systemctl start docker && systemctl enable docker"
        );
    }
}
