// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Result reporting.

use crate::store::StreamKind;
use parking_lot::Mutex;
use std::sync::Arc;

/// One of the three checks made for every case
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Check {
    ExitCode,
    Stdout,
    Stderr,
}

impl From<StreamKind> for Check {
    fn from(kind: StreamKind) -> Self {
        match kind {
            StreamKind::Out => Check::Stdout,
            StreamKind::Err => Check::Stderr,
        }
    }
}

impl std::fmt::Display for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Check::ExitCode => write!(f, "exit code"),
            Check::Stdout => write!(f, "stdout"),
            Check::Stderr => write!(f, "stderr"),
        }
    }
}

/// Receives verdicts as a case is evaluated.
///
/// Mismatches arrive as they are found; a fatal error ends the case.
pub trait Reporter {
    fn report_mismatch(&self, case: &str, check: Check, diff: &str);

    fn report_fatal(&self, case: &str, message: &str);

    /// Called once for a case whose checks all matched
    fn report_pass(&self, _case: &str) {}
}

/// A recorded report
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Report {
    Pass {
        case: String,
    },
    Mismatch {
        case: String,
        check: Check,
        diff: String,
    },
    Fatal {
        case: String,
        message: String,
    },
}

impl Report {
    pub fn case(&self) -> &str {
        match self {
            Report::Pass { case } | Report::Mismatch { case, .. } | Report::Fatal { case, .. } => {
                case
            }
        }
    }
}

/// Reporter that keeps every report in memory
#[derive(Clone, Debug, Default)]
pub struct CollectingReporter {
    reports: Arc<Mutex<Vec<Report>>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All reports, in arrival order
    pub fn reports(&self) -> Vec<Report> {
        self.reports.lock().clone()
    }

    /// Mismatched checks of one case
    pub fn mismatches(&self, case: &str) -> Vec<Check> {
        self.reports
            .lock()
            .iter()
            .filter_map(|r| match r {
                Report::Mismatch { case: c, check, .. } if c == case => Some(*check),
                _ => None,
            })
            .collect()
    }

    /// Fatal messages of all cases
    pub fn fatals(&self) -> Vec<String> {
        self.reports
            .lock()
            .iter()
            .filter_map(|r| match r {
                Report::Fatal { message, .. } => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.reports.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.lock().is_empty()
    }
}

impl Reporter for CollectingReporter {
    fn report_mismatch(&self, case: &str, check: Check, diff: &str) {
        self.reports.lock().push(Report::Mismatch {
            case: case.to_string(),
            check,
            diff: diff.to_string(),
        });
    }

    fn report_fatal(&self, case: &str, message: &str) {
        self.reports.lock().push(Report::Fatal {
            case: case.to_string(),
            message: message.to_string(),
        });
    }

    fn report_pass(&self, case: &str) {
        self.reports.lock().push(Report::Pass {
            case: case.to_string(),
        });
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
