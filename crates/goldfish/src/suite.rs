// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Suite files: declarative lists of cases in TOML or JSON.
//!
//! ```toml
//! golden_dir = "testdata"
//!
//! [[cases]]
//! name = "everything_fine"
//! command = ["echo", "hello, how are you?"]
//!
//! [[cases]]
//! name = "command_failed"
//! command = ["ls", "/nonexistent-path"]
//! exit_code = 2
//! stderr = { regex = true }
//! ```
//!
//! Relative golden directories resolve against the suite file's directory.

use crate::case::{CaseError, CaseOutcome, Harness, TestCase};
use crate::compare::StreamMode;
use crate::report::Reporter;
use crate::runner::{CommandLine, CommandRunner};
use crate::store::{GoldenFs, GoldenKey, StreamKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

fn default_golden_dir() -> PathBuf {
    PathBuf::from("testdata")
}

/// Top-level suite file
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteConfig {
    /// Name for reporting (default: file stem)
    #[serde(default)]
    pub name: Option<String>,

    /// Golden directory for cases that do not set their own
    #[serde(default = "default_golden_dir")]
    pub golden_dir: PathBuf,

    #[serde(default)]
    pub cases: Vec<CaseConfig>,
}

/// One case in a suite file
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CaseConfig {
    pub name: String,

    pub command: CommandConfig,

    #[serde(default)]
    pub golden_dir: Option<PathBuf>,

    #[serde(default)]
    pub update: bool,

    #[serde(default)]
    pub exit_code: i32,

    #[serde(default)]
    pub stdout: StreamMode,

    #[serde(default)]
    pub stderr: StreamMode,
}

/// A command as written in a suite file
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum CommandConfig {
    /// Program and arguments
    Argv(Vec<String>),
    /// Legacy form split on single spaces
    Shell(String),
}

impl CommandConfig {
    #[allow(deprecated)]
    fn to_command_line(&self, case: &str) -> Option<CommandLine> {
        match self {
            CommandConfig::Argv(argv) => CommandLine::from_argv(argv.iter().cloned()),
            CommandConfig::Shell(command) => {
                tracing::warn!(
                    case,
                    command = %command,
                    "string commands are split on spaces; use an argument list instead"
                );
                CommandLine::from_shell_string(command)
            }
        }
    }
}

/// Errors that can occur when loading a suite
#[derive(Debug, Error)]
pub enum SuiteError {
    #[error("Failed to read suite file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Validated cases ready to run
#[derive(Clone, Debug)]
pub struct Suite {
    name: String,
    cases: Vec<TestCase>,
}

impl Suite {
    /// Load a suite from a TOML or JSON file (chosen by extension).
    pub fn load(path: &Path) -> Result<Self, SuiteError> {
        let content = std::fs::read_to_string(path).map_err(|source| SuiteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: SuiteConfig = if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content)?
        } else {
            toml::from_str(&content)?
        };

        if config.name.is_none() {
            config.name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned());
        }
        let base_dir = path.parent().unwrap_or(Path::new("."));
        Self::from_config(config, base_dir)
    }

    /// Build a suite, resolving relative golden directories against `base_dir`.
    pub fn from_config(config: SuiteConfig, base_dir: &Path) -> Result<Self, SuiteError> {
        let mut cases = Vec::with_capacity(config.cases.len());

        for (index, case) in config.cases.into_iter().enumerate() {
            let command = case.command.to_command_line(&case.name).ok_or_else(|| {
                SuiteError::Validation(format!(
                    "case {} ('{}'): command cannot be empty",
                    index, case.name
                ))
            })?;

            let golden_dir =
                base_dir.join(case.golden_dir.as_ref().unwrap_or(&config.golden_dir));
            GoldenKey::new(&golden_dir, &case.name, StreamKind::Out)
                .map_err(|e| SuiteError::Validation(format!("case {index}: {e}")))?;

            cases.push(TestCase {
                name: case.name,
                golden_dir,
                command,
                update: case.update,
                exit_code: case.exit_code,
                stdout: case.stdout,
                stderr: case.stderr,
            });
        }

        ensure_unique_names(&cases)?;
        Ok(Self {
            name: config.name.unwrap_or_default(),
            cases,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Point every case at `dir`.
    ///
    /// Fails, leaving the suite unchanged, when two cases would then share
    /// a golden file.
    pub fn override_golden_dir(&mut self, dir: &Path) -> Result<(), SuiteError> {
        let moved: Vec<TestCase> = self
            .cases
            .iter()
            .map(|case| TestCase {
                golden_dir: dir.to_path_buf(),
                ..case.clone()
            })
            .collect();
        ensure_unique_names(&moved)?;
        self.cases = moved;
        Ok(())
    }

    /// Run every case in order. A fatal case does not stop the suite.
    pub fn run<R: CommandRunner, F: GoldenFs>(
        &self,
        harness: &Harness<R, F>,
        reporter: &dyn Reporter,
    ) -> SuiteOutcome {
        let results = self
            .cases
            .iter()
            .map(|case| (case.name.clone(), harness.run(case, reporter)))
            .collect();
        SuiteOutcome { results }
    }
}

/// Reject cases that would share a golden file.
pub fn ensure_unique_names<'a>(
    cases: impl IntoIterator<Item = &'a TestCase>,
) -> Result<(), SuiteError> {
    let mut seen = HashSet::new();
    for case in cases {
        if !seen.insert((case.golden_dir.as_path(), case.name.as_str())) {
            return Err(SuiteError::Validation(format!(
                "duplicate case name '{}' in {}",
                case.name,
                case.golden_dir.display()
            )));
        }
    }
    Ok(())
}

/// Results of running a suite, in case order
#[derive(Debug, Default)]
pub struct SuiteOutcome {
    pub results: Vec<(String, Result<CaseOutcome, CaseError>)>,
}

impl SuiteOutcome {
    pub fn passed(&self) -> usize {
        self.results
            .iter()
            .filter(|(_, r)| r.as_ref().is_ok_and(CaseOutcome::passed))
            .count()
    }

    /// Cases evaluated to completion with at least one mismatch
    pub fn failed(&self) -> usize {
        self.results
            .iter()
            .filter(|(_, r)| r.as_ref().is_ok_and(|o| !o.passed()))
            .count()
    }

    /// Cases aborted by a fatal error
    pub fn errored(&self) -> usize {
        self.results.iter().filter(|(_, r)| r.is_err()).count()
    }

    pub fn all_passed(&self) -> bool {
        self.passed() == self.results.len()
    }
}

#[cfg(test)]
#[path = "suite_tests.rs"]
mod tests;
