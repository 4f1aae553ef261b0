// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Golden-file testing for command line programs.
//!
//! A [`TestCase`] runs a command, then checks its exit code and compares
//! stdout and stderr against golden files named `<name>.out` and
//! `<name>.err` in the case's golden directory. Streams can be compared
//! as plain text, as a regular expression, as a JSON document or as JSON
//! lines, optionally with regex leaves inside the JSON.
//!
//! ```no_run
//! use goldfish::{CommandLine, TestCase};
//!
//! TestCase::new(
//!     "everything_fine",
//!     "testdata",
//!     CommandLine::new("echo").arg("hello, how are you?"),
//! )
//! .assert_passes();
//! ```
//!
//! Set `GOLDFISH_UPDATE=1` to rewrite every golden file with the observed
//! output instead of failing.

pub mod case;
pub mod compare;
pub mod env;
pub mod report;
pub mod runner;
pub mod store;
pub mod suite;

pub use case::{check_exit_code, CaseError, CaseOutcome, Harness, RunOptions, TestCase};
pub use compare::{compare, CompareError, Format, JsonDifference, StreamMode, Verdict};
pub use report::{Check, CollectingReporter, Report, Reporter};
pub use runner::{exit_codes, Captured, CommandLine, CommandRunner, LaunchError, SystemRunner};
pub use store::{DiskFs, GoldenError, GoldenFs, GoldenKey, GoldenStore, MemoryFs, StreamKind};
pub use suite::{ensure_unique_names, Suite, SuiteError, SuiteOutcome};
