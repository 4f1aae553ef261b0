// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Console output with ANSI color when writing to a terminal.

use goldfish::{Check, Reporter};
use parking_lot::Mutex;
use std::fmt::Display;
use std::io::{self, IsTerminal, Write};

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Print an error message to stderr.
///
/// Displays in red when stderr is a terminal, plain text otherwise.
pub fn print_error(msg: impl Display) {
    let is_tty = io::stderr().is_terminal();
    write_error(&mut io::stderr(), msg, is_tty);
}

fn write_error<W: Write>(writer: &mut W, msg: impl Display, is_terminal: bool) {
    if is_terminal {
        let _ = writeln!(writer, "{RED}Error: {msg}{RESET}");
    } else {
        let _ = writeln!(writer, "Error: {msg}");
    }
}

/// Writes case results as they arrive
pub struct ConsoleReporter<W: Write> {
    out: Mutex<W>,
    color: bool,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out: Mutex::new(out),
            color,
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    /// Final tally line
    pub fn summary(&self, passed: usize, failed: usize, errored: usize) {
        let color = if failed + errored == 0 { GREEN } else { RED };
        self.line(
            color,
            format_args!("{passed} passed, {failed} failed, {errored} errors"),
        );
    }

    fn line(&self, color: &str, msg: impl Display) {
        let mut out = self.out.lock();
        let _ = if self.color {
            writeln!(out, "{color}{msg}{RESET}")
        } else {
            writeln!(out, "{msg}")
        };
    }

    fn diff(&self, diff: &str) {
        let mut out = self.out.lock();
        for line in diff.lines() {
            let color = match line.as_bytes().first() {
                Some(b'+') if !line.starts_with("+++") => Some(GREEN),
                Some(b'-') if !line.starts_with("---") => Some(RED),
                _ => None,
            };
            let _ = match color {
                Some(color) if self.color => writeln!(out, "    {color}{line}{RESET}"),
                _ => writeln!(out, "    {line}"),
            };
        }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn report_mismatch(&self, case: &str, check: Check, diff: &str) {
        self.line(RED, format_args!("FAIL {case}: {check} doesn't match"));
        self.diff(diff);
    }

    fn report_fatal(&self, case: &str, message: &str) {
        self.line(YELLOW, format_args!("ERROR {case}: {message}"));
    }

    fn report_pass(&self, case: &str) {
        self.line(GREEN, format_args!("ok {case}"));
    }
}

#[cfg(test)]
#[path = "console_tests.rs"]
mod tests;
