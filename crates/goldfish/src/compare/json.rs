// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Structural JSON strategy.
//!
//! Objects compare by key set and per-key value, arrays element-wise in
//! order. With regex leaves enabled, a pair of strings also matches when
//! either one, compiled as a pattern, finds a match in the other. A string
//! that does not compile matches nothing, so only the literal-equality and
//! opposite-direction checks can accept it.

use super::{CompareError, Side, Verdict};
use regex::Regex;
use serde_json::{Number, Value};
use std::fmt;

/// One point where two JSON values disagree
#[derive(Clone, Debug, PartialEq)]
pub struct JsonDifference {
    /// Location in the document, e.g. `$.items[2].id`
    pub path: String,
    /// Golden value, `None` when the golden side lacks the location
    pub golden: Option<Value>,
    /// Actual value, `None` when the actual side lacks the location
    pub actual: Option<Value>,
}

impl fmt::Display for JsonDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: golden {}, actual {}",
            self.path,
            describe(self.golden.as_ref()),
            describe(self.actual.as_ref())
        )
    }
}

fn describe(value: Option<&Value>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "<absent>".to_string(),
    }
}

pub(super) fn compare_documents(
    actual: &[u8],
    golden: &[u8],
    regex_leaves: bool,
) -> Result<Verdict, CompareError> {
    let golden = serde_json::from_slice::<Value>(golden).map_err(|source| CompareError::Json {
        side: Side::Golden,
        source,
    })?;
    let actual = serde_json::from_slice::<Value>(actual).map_err(|source| CompareError::Json {
        side: Side::Actual,
        source,
    })?;

    let found = differences(&golden, &actual, regex_leaves);
    if found.is_empty() {
        return Ok(Verdict::matched());
    }
    let diff = found
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    Ok(Verdict::mismatch(diff))
}

/// Every location where `actual` departs from `golden`; empty when equal.
pub fn differences(golden: &Value, actual: &Value, regex_leaves: bool) -> Vec<JsonDifference> {
    let mut found = Vec::new();
    walk("$", golden, actual, regex_leaves, &mut found);
    found
}

fn walk(
    path: &str,
    golden: &Value,
    actual: &Value,
    regex_leaves: bool,
    found: &mut Vec<JsonDifference>,
) {
    match (golden, actual) {
        (Value::Object(golden_map), Value::Object(actual_map)) => {
            for (key, golden_value) in golden_map {
                let child = format!("{path}.{key}");
                match actual_map.get(key) {
                    Some(actual_value) => {
                        walk(&child, golden_value, actual_value, regex_leaves, found)
                    }
                    None => found.push(JsonDifference {
                        path: child,
                        golden: Some(golden_value.clone()),
                        actual: None,
                    }),
                }
            }
            for (key, actual_value) in actual_map {
                if !golden_map.contains_key(key) {
                    found.push(JsonDifference {
                        path: format!("{path}.{key}"),
                        golden: None,
                        actual: Some(actual_value.clone()),
                    });
                }
            }
        }
        (Value::Array(golden_items), Value::Array(actual_items)) => {
            for index in 0..golden_items.len().max(actual_items.len()) {
                let child = format!("{path}[{index}]");
                match (golden_items.get(index), actual_items.get(index)) {
                    (Some(g), Some(a)) => walk(&child, g, a, regex_leaves, found),
                    (g, a) => found.push(JsonDifference {
                        path: child,
                        golden: g.cloned(),
                        actual: a.cloned(),
                    }),
                }
            }
        }
        (Value::Number(g), Value::Number(a)) => {
            if !numbers_equal(g, a) {
                found.push(leaf_difference(path, golden, actual));
            }
        }
        (Value::String(g), Value::String(a)) if regex_leaves => {
            if !strings_match(g, a) {
                found.push(leaf_difference(path, golden, actual));
            }
        }
        _ => {
            if golden != actual {
                found.push(leaf_difference(path, golden, actual));
            }
        }
    }
}

/// Numbers compare by value: `1`, `1.0` and `1e0` are equal. Integers are
/// compared exactly before falling back to `f64`.
fn numbers_equal(golden: &Number, actual: &Number) -> bool {
    if let (Some(g), Some(a)) = (golden.as_i64(), actual.as_i64()) {
        return g == a;
    }
    if let (Some(g), Some(a)) = (golden.as_u64(), actual.as_u64()) {
        return g == a;
    }
    match (golden.as_f64(), actual.as_f64()) {
        (Some(g), Some(a)) => g == a,
        _ => golden == actual,
    }
}

fn leaf_difference(path: &str, golden: &Value, actual: &Value) -> JsonDifference {
    JsonDifference {
        path: path.to_string(),
        golden: Some(golden.clone()),
        actual: Some(actual.clone()),
    }
}

fn strings_match(golden: &str, actual: &str) -> bool {
    golden == actual || pattern_finds(golden, actual) || pattern_finds(actual, golden)
}

fn pattern_finds(pattern: &str, text: &str) -> bool {
    Regex::new(pattern).is_ok_and(|re| re.is_match(text))
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
