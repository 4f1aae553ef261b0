// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test case evaluation.
//!
//! A case runs its command once, then checks the exit code, stdout and
//! stderr in that order. Mismatches are reported and evaluation continues;
//! golden and comparison errors abort the case.

use crate::compare::{compare, CompareError, StreamMode, Verdict};
use crate::report::{Check, CollectingReporter, Reporter};
use crate::runner::{Captured, CommandLine, CommandRunner, SystemRunner};
use crate::store::{DiskFs, GoldenError, GoldenFs, GoldenKey, GoldenStore, StreamKind};
use std::path::PathBuf;
use thiserror::Error;

/// One command invocation and how to judge its output
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestCase {
    /// Unique within `golden_dir`; names the golden files
    pub name: String,
    pub golden_dir: PathBuf,
    pub command: CommandLine,
    /// Rewrite this case's golden files with the observed output
    pub update: bool,
    pub exit_code: i32,
    pub stdout: StreamMode,
    pub stderr: StreamMode,
}

impl TestCase {
    pub fn new(
        name: impl Into<String>,
        golden_dir: impl Into<PathBuf>,
        command: CommandLine,
    ) -> Self {
        Self {
            name: name.into(),
            golden_dir: golden_dir.into(),
            command,
            update: false,
            exit_code: 0,
            stdout: StreamMode::default(),
            stderr: StreamMode::default(),
        }
    }

    pub fn with_update(mut self, update: bool) -> Self {
        self.update = update;
        self
    }

    pub fn with_exit_code(mut self, exit_code: i32) -> Self {
        self.exit_code = exit_code;
        self
    }

    pub fn with_stdout(mut self, mode: StreamMode) -> Self {
        self.stdout = mode;
        self
    }

    pub fn with_stderr(mut self, mode: StreamMode) -> Self {
        self.stderr = mode;
        self
    }

    /// Comparison mode configured for a stream
    pub fn mode(&self, stream: StreamKind) -> StreamMode {
        match stream {
            StreamKind::Out => self.stdout,
            StreamKind::Err => self.stderr,
        }
    }

    /// Key of this case's golden file for a stream
    pub fn golden_key(&self, stream: StreamKind) -> Result<GoldenKey, GoldenError> {
        GoldenKey::new(&self.golden_dir, &self.name, stream)
    }

    /// Run against the disk with the environment's update switch, panicking
    /// with every mismatch if the case fails.
    ///
    /// # Panics
    ///
    /// When any check mismatches or the case cannot be evaluated.
    #[allow(clippy::panic)]
    #[track_caller]
    pub fn assert_passes(&self) {
        let harness = Harness::new(
            SystemRunner::new(),
            GoldenStore::on_disk(),
            RunOptions::from_env(),
        );
        match harness.run(self, &CollectingReporter::new()) {
            Ok(outcome) if outcome.passed() => {}
            Ok(outcome) => panic!("case '{}' failed:\n{}", self.name, outcome.summary()),
            Err(err) => panic!("case '{}' aborted: {err}", self.name),
        }
    }
}

/// Settings shared by every case in a run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Rewrite the golden files of every case
    pub update_all: bool,
}

impl RunOptions {
    /// Options taken from `GOLDFISH_UPDATE`
    pub fn from_env() -> Self {
        Self {
            update_all: crate::env::update(),
        }
    }

    pub fn with_update_all(mut self, update_all: bool) -> Self {
        self.update_all = update_all;
        self
    }
}

/// Errors that abort a case
#[derive(Debug, Error)]
pub enum CaseError {
    #[error(transparent)]
    Golden(#[from] GoldenError),

    #[error("{check}: {source}")]
    Compare {
        check: Check,
        #[source]
        source: CompareError,
    },
}

/// Verdicts of one fully evaluated case
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseOutcome {
    pub name: String,
    /// Exit code the command actually produced
    pub exit_code: i32,
    pub exit: Verdict,
    pub stdout: Verdict,
    pub stderr: Verdict,
}

impl CaseOutcome {
    pub fn passed(&self) -> bool {
        self.exit.matched && self.stdout.matched && self.stderr.matched
    }

    /// Checks that did not match, in evaluation order
    pub fn failures(&self) -> impl Iterator<Item = (Check, &Verdict)> {
        [
            (Check::ExitCode, &self.exit),
            (Check::Stdout, &self.stdout),
            (Check::Stderr, &self.stderr),
        ]
        .into_iter()
        .filter(|(_, verdict)| !verdict.matched)
    }

    /// Every failure with its diff
    pub fn summary(&self) -> String {
        self.failures()
            .map(|(check, verdict)| format!("{check} doesn't match:\n{}", verdict.diff))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Verdict for the exit-code check
pub fn check_exit_code(expected: i32, actual: i32) -> Verdict {
    if expected == actual {
        Verdict::matched()
    } else {
        Verdict::mismatch(format!("expected exit code {expected}, got {actual}"))
    }
}

/// Evaluates cases with a command runner and a golden store
#[derive(Clone, Debug, Default)]
pub struct Harness<R = SystemRunner, F = DiskFs> {
    runner: R,
    store: GoldenStore<F>,
    options: RunOptions,
}

impl<R: CommandRunner, F: GoldenFs> Harness<R, F> {
    pub fn new(runner: R, store: GoldenStore<F>, options: RunOptions) -> Self {
        Self {
            runner,
            store,
            options,
        }
    }

    /// Evaluate a case, reporting as it goes.
    ///
    /// `Ok` carries every verdict, matched or not; `Err` means the case was
    /// aborted and has already been reported as fatal.
    pub fn run(
        &self,
        case: &TestCase,
        reporter: &dyn Reporter,
    ) -> Result<CaseOutcome, CaseError> {
        let result = self.evaluate(case, reporter);
        match result {
            Ok(ref outcome) if outcome.passed() => reporter.report_pass(&case.name),
            Ok(_) => {}
            Err(ref err) => reporter.report_fatal(&case.name, &err.to_string()),
        }
        result
    }

    fn evaluate(
        &self,
        case: &TestCase,
        reporter: &dyn Reporter,
    ) -> Result<CaseOutcome, CaseError> {
        tracing::debug!(case = %case.name, command = %case.command, "running case");
        let captured = match self.runner.execute(&case.command) {
            Ok(captured) => captured,
            Err(err) => {
                tracing::warn!(case = %case.name, error = %err, "command failed to launch");
                Captured::from_launch_error(&err)
            }
        };

        // Checked first and never skipped, not even under update.
        let exit = check_exit_code(case.exit_code, captured.exit_code);
        if !exit.matched {
            reporter.report_mismatch(&case.name, Check::ExitCode, &exit.diff);
        }

        let stdout = self.check_stream(case, StreamKind::Out, &captured.stdout, reporter)?;
        let stderr = self.check_stream(case, StreamKind::Err, &captured.stderr, reporter)?;

        Ok(CaseOutcome {
            name: case.name.clone(),
            exit_code: captured.exit_code,
            exit,
            stdout,
            stderr,
        })
    }

    /// Resolve one stream's golden file and compare `actual` against it.
    pub fn check_stream(
        &self,
        case: &TestCase,
        stream: StreamKind,
        actual: &[u8],
        reporter: &dyn Reporter,
    ) -> Result<Verdict, CaseError> {
        let update = case.update || self.options.update_all;
        let key = case.golden_key(stream)?;
        let golden = self.store.resolve(&key, actual, update)?;

        let verdict = compare(actual, &golden, case.mode(stream)).map_err(|source| {
            CaseError::Compare {
                check: stream.into(),
                source,
            }
        })?;
        if !verdict.matched {
            reporter.report_mismatch(&case.name, stream.into(), &verdict.diff);
        }
        Ok(verdict)
    }
}

#[cfg(test)]
#[path = "case_tests.rs"]
mod tests;
