// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command execution.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;

/// Exit codes reported for commands that never started
pub mod exit_codes {
    /// Launch failed for a reason other than the two below
    pub const LAUNCH_FAILED: i32 = 125;
    /// The program exists but could not be executed
    pub const NOT_EXECUTABLE: i32 = 126;
    /// The program was not found
    pub const NOT_FOUND: i32 = 127;
}

/// A program and its arguments, never interpreted by a shell
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append an argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Build from an argument vector; `None` when it is empty.
    pub fn from_argv<I, S>(argv: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut argv = argv.into_iter().map(Into::into);
        let program = argv.next()?;
        Some(Self {
            program,
            args: argv.collect(),
        })
    }

    /// Split a command string on single spaces.
    ///
    /// Quoted arguments are not recognized: `echo "a b"` becomes
    /// `["echo", "\"a", "b\""]`.
    #[deprecated(note = "splitting on spaces mangles quoted arguments; use `from_argv`")]
    pub fn from_shell_string(command: &str) -> Option<Self> {
        if command.is_empty() {
            return None;
        }
        Self::from_argv(command.split(' '))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " {arg:?}")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Output of one command execution
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Captured {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub exit_code: i32,
}

impl Captured {
    /// Ordinary output for a command that could not be started.
    pub fn from_launch_error(err: &LaunchError) -> Self {
        Self {
            stdout: Vec::new(),
            stderr: Vec::new(),
            exit_code: err.exit_code(),
        }
    }
}

/// A command that could not be started
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl LaunchError {
    /// Sentinel exit code standing in for the process's own
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::Spawn { source, .. } => match source.kind() {
                io::ErrorKind::NotFound => exit_codes::NOT_FOUND,
                io::ErrorKind::PermissionDenied => exit_codes::NOT_EXECUTABLE,
                _ => exit_codes::LAUNCH_FAILED,
            },
        }
    }
}

/// Executes commands and captures their output
pub trait CommandRunner {
    /// Run to completion. Blocks for as long as the command does.
    fn execute(&self, command: &CommandLine) -> Result<Captured, LaunchError>;
}

/// Runs commands as child processes of the current one
#[derive(Clone, Debug, Default)]
pub struct SystemRunner {
    cwd: Option<PathBuf>,
    env: Vec<(String, String)>,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the working directory of spawned commands
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Add an environment variable for spawned commands
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }
}

impl CommandRunner for SystemRunner {
    fn execute(&self, command: &CommandLine) -> Result<Captured, LaunchError> {
        let mut cmd = Command::new(command.program());
        cmd.args(command.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }
        for (key, value) in &self.env {
            cmd.env(key, value);
        }

        let output = cmd.output().map_err(|source| LaunchError::Spawn {
            program: command.program().to_string(),
            source,
        })?;
        let exit_code = exit_code_of(output.status);
        tracing::debug!(
            %command,
            exit_code,
            stdout = output.stdout.len(),
            stderr = output.stderr.len(),
            "command finished"
        );

        Ok(Captured {
            stdout: output.stdout,
            stderr: output.stderr,
            exit_code,
        })
    }
}

/// Signals map to `128 + signal`, as shells report them.
fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    -1
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
