// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Comparison engine.
//!
//! Decides whether captured output matches its golden reference under one
//! of four strategies and produces a diff when it does not:
//!
//! - plain text: exact byte equality, unified line diff
//! - regex: the reference is a pattern searched for in the output
//! - JSON: both sides parsed and compared structurally
//! - JSON lines: one JSON document per line, paired by line index
//!
//! JSON strategies can additionally treat string leaves as patterns, so a
//! reference can pin volatile fields (ids, timestamps) with a regex.

mod json;
mod lines;
mod text;

pub use json::{differences, JsonDifference};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a stream's output is interpreted
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// Raw text
    #[default]
    Text,
    /// A single JSON document
    Json,
    /// Newline-delimited JSON documents
    JsonLines,
}

/// Comparison configuration for one stream
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StreamMode {
    #[serde(default)]
    pub format: Format,

    /// Text: the reference is a pattern. JSON: string leaves are patterns.
    #[serde(default)]
    pub regex: bool,
}

impl StreamMode {
    pub const TEXT: Self = Self {
        format: Format::Text,
        regex: false,
    };
    pub const REGEX: Self = Self {
        format: Format::Text,
        regex: true,
    };
    pub const JSON: Self = Self {
        format: Format::Json,
        regex: false,
    };
    pub const JSON_LINES: Self = Self {
        format: Format::JsonLines,
        regex: false,
    };

    /// Toggle pattern matching
    pub fn with_regex(mut self, regex: bool) -> Self {
        self.regex = regex;
        self
    }

    /// The strategy this mode selects
    pub fn strategy(self) -> Strategy {
        match (self.format, self.regex) {
            (Format::Text, false) => Strategy::PlainText,
            (Format::Text, true) => Strategy::Regex,
            (Format::Json, regex_leaves) => Strategy::Json { regex_leaves },
            (Format::JsonLines, regex_leaves) => Strategy::JsonLines { regex_leaves },
        }
    }
}

/// Comparison strategy selected from a [`StreamMode`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    PlainText,
    Regex,
    Json { regex_leaves: bool },
    JsonLines { regex_leaves: bool },
}

/// Outcome of one comparison
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Verdict {
    pub matched: bool,
    /// Human-readable description of the mismatch, empty when matched
    pub diff: String,
}

impl Verdict {
    pub fn matched() -> Self {
        Self {
            matched: true,
            diff: String::new(),
        }
    }

    pub fn mismatch(diff: impl Into<String>) -> Self {
        Self {
            matched: false,
            diff: diff.into(),
        }
    }
}

/// Which side of a comparison an input came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Golden,
    Actual,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Golden => write!(f, "golden"),
            Side::Actual => write!(f, "actual"),
        }
    }
}

/// Errors that prevent a comparison from reaching a verdict
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("golden file is not a valid regex: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("{side} output is not valid JSON: {source}")]
    Json {
        side: Side,
        #[source]
        source: serde_json::Error,
    },

    #[error("{side} output line {line} is not valid JSON: {source}")]
    JsonLine {
        side: Side,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Compare captured bytes against golden bytes.
pub fn compare(actual: &[u8], golden: &[u8], mode: StreamMode) -> Result<Verdict, CompareError> {
    let strategy = mode.strategy();
    tracing::debug!(?strategy, actual = actual.len(), golden = golden.len(), "comparing output");

    match strategy {
        Strategy::PlainText => Ok(text::compare_plain(actual, golden)),
        Strategy::Regex => text::compare_regex(actual, golden),
        Strategy::Json { regex_leaves } => json::compare_documents(actual, golden, regex_leaves),
        Strategy::JsonLines { regex_leaves } => lines::compare_lines(actual, golden, regex_leaves),
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
