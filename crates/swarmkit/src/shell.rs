//! Command execution seam.
//!
//! Every external program the library touches goes through the [`Shell`]
//! trait, so the bootstrap steps can run against the real system
//! ([`SystemShell`]) or a scripted double in tests.

use crate::error::{Error, Result};
use std::path::Path;
use std::process::{Command, Output, Stdio};

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the command exited with status 0.
    pub success: bool,
    /// Exit code, `None` when terminated by a signal.
    pub code: Option<i32>,
    /// Raw standard output.
    pub stdout: Vec<u8>,
    /// Raw standard error.
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    /// Standard output as lossy UTF-8.
    pub fn stdout_str(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }

    /// Standard error as lossy UTF-8.
    pub fn stderr_str(&self) -> String {
        String::from_utf8_lossy(&self.stderr).to_string()
    }

    /// Exit status without the captured streams.
    pub fn exit(&self) -> Exit {
        Exit {
            success: self.success,
            code: self.code,
        }
    }
}

impl From<Output> for CommandOutput {
    fn from(output: Output) -> Self {
        Self {
            success: output.status.success(),
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        }
    }
}

/// Exit status of a command that ran with inherited stdio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exit {
    /// Whether the command exited with status 0.
    pub success: bool,
    /// Exit code, `None` when terminated by a signal.
    pub code: Option<i32>,
}

impl Exit {
    /// A successful exit.
    pub const OK: Self = Self {
        success: true,
        code: Some(0),
    };

    /// What `sh` reports for a command it cannot find.
    pub const NOT_FOUND: Self = Self {
        success: false,
        code: Some(127),
    };

    /// Exit code for display, `-1` when terminated by a signal.
    pub fn code_or_signal(&self) -> i32 {
        self.code.unwrap_or(-1)
    }
}

/// Runs external programs on behalf of the bootstrap steps.
pub trait Shell: Send + Sync {
    /// Run a program to completion and capture its output.
    fn run_in(&self, dir: Option<&Path>, program: &str, args: &[&str]) -> Result<CommandOutput>;

    /// Run a program with inherited stdio so its output streams to the terminal.
    fn run_inherit_in(&self, dir: Option<&Path>, program: &str, args: &[&str]) -> Result<Exit>;

    /// Run in the current directory and capture output.
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        self.run_in(None, program, args)
    }

    /// Run in the current directory with inherited stdio.
    fn run_inherit(&self, program: &str, args: &[&str]) -> Result<Exit> {
        self.run_inherit_in(None, program, args)
    }

    /// Run a command line through `sh -c`, for one-liners chained with `&&`.
    fn run_script(&self, script: &str) -> Result<Exit> {
        self.run_inherit("sh", &["-c", script])
    }
}

/// Join a program and its arguments for display and logging.
pub fn command_line(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

/// [`Shell`] backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemShell;

impl SystemShell {
    /// Create a new system shell.
    pub fn new() -> Self {
        Self
    }

    fn command(dir: Option<&Path>, program: &str, args: &[&str]) -> Command {
        log::debug!("$ {}", command_line(program, args));
        let mut cmd = Command::new(program);
        cmd.args(args);
        if let Some(dir) = dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

impl Shell for SystemShell {
    fn run_in(&self, dir: Option<&Path>, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let output = Self::command(dir, program, args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| Error::Spawn {
                program: program.to_string(),
                source,
            })?;
        Ok(output.into())
    }

    fn run_inherit_in(&self, dir: Option<&Path>, program: &str, args: &[&str]) -> Result<Exit> {
        let status = Self::command(dir, program, args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| Error::Spawn {
                program: program.to_string(),
                source,
            })?;
        Ok(Exit {
            success: status.success(),
            code: status.code(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Reply, ScriptedShell};

    #[test]
    fn test_command_line() {
        assert_eq!(command_line("docker", &[]), "docker");
        assert_eq!(
            command_line("docker", &["swarm", "init"]),
            "docker swarm init"
        );
    }

    #[test]
    fn test_output_strings() {
        let output = CommandOutput {
            success: false,
            code: Some(2),
            stdout: b"out".to_vec(),
            stderr: b"err".to_vec(),
        };
        assert_eq!(output.stdout_str(), "out");
        assert_eq!(output.stderr_str(), "err");
        assert_eq!(output.exit().code_or_signal(), 2);
    }

    #[test]
    fn test_run_script_goes_through_sh() {
        let shell = ScriptedShell::new().on("sh -c", Reply::exit(0));
        let exit = shell.run_script("true && true").unwrap();
        assert!(exit.success);
        assert_eq!(shell.calls(), vec!["sh -c true && true"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_system_shell_captures_stdout() {
        let output = SystemShell::new().run("sh", &["-c", "echo hello"]).unwrap();
        assert!(output.success);
        assert_eq!(output.stdout_str().trim(), "hello");
    }

    #[cfg(unix)]
    #[test]
    fn test_system_shell_reports_failure_code() {
        let output = SystemShell::new().run("sh", &["-c", "exit 3"]).unwrap();
        assert!(!output.success);
        assert_eq!(output.code, Some(3));
    }

    #[test]
    fn test_system_shell_missing_program() {
        let err = SystemShell::new()
            .run("swarmkit-definitely-not-a-real-program", &[])
            .unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
    }
}
