// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Plain-text and regex strategies.

use super::{CompareError, Verdict};
use regex::bytes::Regex;

/// Exact comparison; no trimming or newline normalization.
pub(super) fn compare_plain(actual: &[u8], golden: &[u8]) -> Verdict {
    if actual == golden {
        return Verdict::matched();
    }

    let golden = String::from_utf8_lossy(golden);
    let actual = String::from_utf8_lossy(actual);
    let diff = unified_diff(&golden, &actual);
    if diff.is_empty() {
        // Lossy decoding folded the differing bytes together.
        Verdict::mismatch("outputs differ in bytes that are not valid UTF-8")
    } else {
        Verdict::mismatch(diff)
    }
}

/// The golden bytes are a pattern searched for anywhere in the output.
pub(super) fn compare_regex(actual: &[u8], golden: &[u8]) -> Result<Verdict, CompareError> {
    let pattern = String::from_utf8_lossy(golden);
    let re = Regex::new(&pattern)?;

    if re.is_match(actual) {
        return Ok(Verdict::matched());
    }
    Ok(Verdict::mismatch(format!(
        "pattern did not match\n--- pattern\n{}\n--- actual\n{}",
        pattern.trim_end_matches('\n'),
        String::from_utf8_lossy(actual).trim_end_matches('\n')
    )))
}

pub(super) fn unified_diff(golden: &str, actual: &str) -> String {
    similar::TextDiff::from_lines(golden, actual)
        .unified_diff()
        .header("golden", "actual")
        .to_string()
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
