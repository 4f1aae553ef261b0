// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The `goldfish` command: load suite files and run their cases.

pub mod cli;
pub mod console;

use crate::cli::Cli;
use crate::console::{print_error, ConsoleReporter};
use goldfish::{ensure_unique_names, GoldenStore, Harness, RunOptions, Suite, SystemRunner};
use std::io::Write;

/// Process exit codes
pub mod exit_codes {
    /// Every case passed
    pub const SUCCESS: u8 = 0;
    /// At least one case mismatched or aborted
    pub const FAILED: u8 = 1;
    /// A suite file could not be loaded, or two cases share a golden file
    pub const INVALID_SUITE: u8 = 2;
}

/// Load every suite, then run them in order, writing results to `out`.
///
/// Nothing runs if any suite fails to load or two cases would share a
/// golden file.
pub fn run<W: Write>(cli: &Cli, out: W, color: bool) -> u8 {
    let mut suites = Vec::with_capacity(cli.suites.len());
    for path in &cli.suites {
        match Suite::load(path) {
            Ok(suite) => suites.push(suite),
            Err(e) => {
                print_error(format_args!("{}: {e}", path.display()));
                return exit_codes::INVALID_SUITE;
            }
        }
    }
    if let Some(ref dir) = cli.golden_dir {
        for suite in &mut suites {
            if let Err(e) = suite.override_golden_dir(dir) {
                print_error(format_args!("{}: {e}", suite.name()));
                return exit_codes::INVALID_SUITE;
            }
        }
    }
    if let Err(e) = ensure_unique_names(suites.iter().flat_map(Suite::cases)) {
        print_error(e);
        return exit_codes::INVALID_SUITE;
    }

    let options = RunOptions::from_env();
    let options = options.with_update_all(options.update_all || cli.update);
    let harness = Harness::new(SystemRunner::new(), GoldenStore::on_disk(), options);
    let reporter = ConsoleReporter::new(out, color);

    let (mut passed, mut failed, mut errored) = (0, 0, 0);
    for suite in &suites {
        tracing::info!(suite = suite.name(), cases = suite.len(), "running suite");
        let outcome = suite.run(&harness, &reporter);
        passed += outcome.passed();
        failed += outcome.failed();
        errored += outcome.errored();
    }
    reporter.summary(passed, failed, errored);

    if failed + errored == 0 {
        exit_codes::SUCCESS
    } else {
        exit_codes::FAILED
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
