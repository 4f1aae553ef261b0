// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON-lines strategy.
//!
//! Lines pair strictly by index. An inserted or dropped line shifts every
//! later pair, so one missing record shows up as a run of mismatches.

use super::json::differences;
use super::{CompareError, Side, Verdict};
use serde_json::Value;

pub(super) fn compare_lines(
    actual: &[u8],
    golden: &[u8],
    regex_leaves: bool,
) -> Result<Verdict, CompareError> {
    let golden_lines: Vec<&[u8]> = golden.split(|b| *b == b'\n').collect();
    let actual_lines: Vec<&[u8]> = actual.split(|b| *b == b'\n').collect();
    let mut mismatches = Vec::new();

    for (index, golden_line) in golden_lines.iter().enumerate() {
        if is_blank(golden_line) {
            continue;
        }
        let line = index + 1;
        let golden_value = parse_line(golden_line, Side::Golden, line)?;

        let Some(actual_line) = actual_lines.get(index).filter(|l| !is_blank(l)) else {
            mismatches.push(format!(
                "line {line}: missing from actual output, golden {golden_value}"
            ));
            continue;
        };
        let actual_value = parse_line(actual_line, Side::Actual, line)?;

        mismatches.extend(
            differences(&golden_value, &actual_value, regex_leaves)
                .iter()
                .map(|d| format!("line {line}: {d}")),
        );
    }

    // Trailing blank golden lines do not absorb extra actual records.
    let compared = golden_lines
        .iter()
        .rposition(|l| !is_blank(l))
        .map_or(0, |last| last + 1);
    for (index, actual_line) in actual_lines.iter().enumerate().skip(compared) {
        if !is_blank(actual_line) {
            mismatches.push(format!(
                "line {}: unexpected in actual output: {}",
                index + 1,
                String::from_utf8_lossy(actual_line).trim_end()
            ));
        }
    }

    if mismatches.is_empty() {
        Ok(Verdict::matched())
    } else {
        Ok(Verdict::mismatch(mismatches.join("\n")))
    }
}

fn parse_line(bytes: &[u8], side: Side, line: usize) -> Result<Value, CompareError> {
    serde_json::from_slice(bytes).map_err(|source| CompareError::JsonLine { side, line, source })
}

fn is_blank(line: &[u8]) -> bool {
    line.iter().all(u8::is_ascii_whitespace)
}

#[cfg(test)]
#[path = "lines_tests.rs"]
mod tests;
