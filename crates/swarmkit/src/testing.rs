//! Scripted [`Shell`] double for unit tests.

use crate::error::{Error, Result};
use crate::shell::{CommandOutput, Exit, Shell, command_line};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Canned response for a command.
#[derive(Debug, Clone)]
pub enum Reply {
    /// The command ran with this exit code and output.
    Output {
        code: i32,
        stdout: String,
        stderr: String,
    },
    /// The program could not be started.
    Spawn,
}

impl Reply {
    pub fn exit(code: i32) -> Self {
        Self::Output {
            code,
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    pub fn stdout(code: i32, stdout: &str) -> Self {
        Self::Output {
            code,
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    pub fn stderr(code: i32, stderr: &str) -> Self {
        Self::Output {
            code,
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }
}

/// Records every invocation and answers from a prefix-matched rule table.
///
/// Commands without a matching rule succeed with empty output.
#[derive(Default)]
pub struct ScriptedShell {
    rules: Vec<(String, Reply)>,
    calls: Mutex<Vec<(Option<PathBuf>, String)>>,
}

impl ScriptedShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer commands whose command line starts with `prefix`.
    pub fn on(mut self, prefix: &str, reply: Reply) -> Self {
        self.rules.push((prefix.to_string(), reply));
        self
    }

    /// Command lines in invocation order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, line)| line.clone())
            .collect()
    }

    /// Number of invocations whose command line starts with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    /// Working directory of the first invocation starting with `prefix`.
    pub fn dir_of(&self, prefix: &str) -> Option<PathBuf> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .find(|(_, line)| line.starts_with(prefix))
            .and_then(|(dir, _)| dir.clone())
    }

    fn answer(&self, dir: Option<&Path>, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let line = command_line(program, args);
        self.calls
            .lock()
            .unwrap()
            .push((dir.map(Path::to_path_buf), line.clone()));

        let reply = self
            .rules
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| Reply::exit(0));

        match reply {
            Reply::Output {
                code,
                stdout,
                stderr,
            } => Ok(CommandOutput {
                success: code == 0,
                code: Some(code),
                stdout: stdout.into_bytes(),
                stderr: stderr.into_bytes(),
            }),
            Reply::Spawn => Err(Error::Spawn {
                program: program.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "not found"),
            }),
        }
    }
}

impl Shell for ScriptedShell {
    fn run_in(&self, dir: Option<&Path>, program: &str, args: &[&str]) -> Result<CommandOutput> {
        self.answer(dir, program, args)
    }

    fn run_inherit_in(&self, dir: Option<&Path>, program: &str, args: &[&str]) -> Result<Exit> {
        self.answer(dir, program, args).map(|o| o.exit())
    }
}
