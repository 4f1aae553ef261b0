// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use proptest::prelude::{any, prop_assert, proptest};
use yare::parameterized;

#[parameterized(
    text = { StreamMode::TEXT, Strategy::PlainText },
    regex = { StreamMode::REGEX, Strategy::Regex },
    json = { StreamMode::JSON, Strategy::Json { regex_leaves: false } },
    json_regex = { StreamMode::JSON.with_regex(true), Strategy::Json { regex_leaves: true } },
    json_lines = { StreamMode::JSON_LINES, Strategy::JsonLines { regex_leaves: false } },
    json_lines_regex = { StreamMode::JSON_LINES.with_regex(true), Strategy::JsonLines { regex_leaves: true } },
)]
fn mode_selects_strategy(mode: StreamMode, expected: Strategy) {
    assert_eq!(mode.strategy(), expected);
}

#[test]
fn default_mode_is_plain_text() {
    assert_eq!(StreamMode::default(), StreamMode::TEXT);
    assert_eq!(StreamMode::default().strategy(), Strategy::PlainText);
}

#[test]
fn mode_deserializes_from_toml() {
    let mode: StreamMode = toml::from_str(
        r#"
        format = "json_lines"
        regex = true
        "#,
    )
    .unwrap();
    assert_eq!(mode, StreamMode::JSON_LINES.with_regex(true));
}

#[test]
fn mode_defaults_missing_fields() {
    let mode: StreamMode = toml::from_str(r#"regex = true"#).unwrap();
    assert_eq!(mode, StreamMode::REGEX);
}

#[test]
fn mode_rejects_unknown_fields() {
    let err = toml::from_str::<StreamMode>(r#"fromat = "json""#).unwrap_err();
    assert!(err.to_string().contains("fromat"), "{err}");
}

#[test]
fn mode_rejects_unknown_format() {
    assert!(toml::from_str::<StreamMode>(r#"format = "yaml""#).is_err());
}

#[test]
fn compare_dispatches_plain_text() {
    assert!(compare(b"same\n", b"same\n", StreamMode::TEXT).unwrap().matched);
    let verdict = compare(b"left\n", b"right\n", StreamMode::TEXT).unwrap();
    assert!(!verdict.matched);
    assert!(!verdict.diff.is_empty());
}

#[test]
fn compare_dispatches_regex() {
    let verdict = compare(b"hello, how are you?", b"hello.*", StreamMode::REGEX).unwrap();
    assert!(verdict.matched);

    let verdict = compare(b"exactly", b"^exact$", StreamMode::REGEX).unwrap();
    assert!(!verdict.matched);
}

#[test]
fn compare_dispatches_json() {
    let verdict = compare(br#"{"b":2,"a":1}"#, br#"{"a":1,"b":2}"#, StreamMode::JSON).unwrap();
    assert!(verdict.matched);

    let verdict = compare(br#"{"a":2}"#, br#"{"a":1}"#, StreamMode::JSON).unwrap();
    assert!(!verdict.matched);
}

#[test]
fn compare_dispatches_json_with_regex_leaves() {
    let golden = br#"{"id":"\\d+","name":"fixed"}"#;
    let mode = StreamMode::JSON.with_regex(true);

    assert!(compare(br#"{"id":"42","name":"fixed"}"#, golden, mode).unwrap().matched);
    assert!(!compare(br#"{"id":"42","name":"moved"}"#, golden, mode).unwrap().matched);
}

#[test]
fn compare_dispatches_json_lines() {
    let golden = b"{\"a\":1}\n{\"a\":2}\n";
    let verdict = compare(b"{\"a\":1}\n{\"a\":2}", golden, StreamMode::JSON_LINES).unwrap();
    assert!(verdict.matched);
}

#[test]
fn invalid_standalone_regex_is_an_error() {
    let err = compare(b"anything", b"(unclosed", StreamMode::REGEX).unwrap_err();
    assert!(matches!(err, CompareError::InvalidPattern(_)));
}

#[test]
fn malformed_json_is_an_error_naming_the_side() {
    let err = compare(b"{}", b"{not json", StreamMode::JSON).unwrap_err();
    assert!(matches!(err, CompareError::Json { side: Side::Golden, .. }));
    assert!(err.to_string().starts_with("golden output"));

    let err = compare(b"oops", b"{}", StreamMode::JSON).unwrap_err();
    assert!(matches!(err, CompareError::Json { side: Side::Actual, .. }));
}

#[test]
fn verdict_constructors() {
    assert_eq!(
        Verdict::matched(),
        Verdict {
            matched: true,
            diff: String::new()
        }
    );
    let mismatch = Verdict::mismatch("nope");
    assert!(!mismatch.matched);
    assert_eq!(mismatch.diff, "nope");
}

proptest! {
    #[test]
    fn plain_text_matches_itself(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        let verdict = compare(&bytes, &bytes, StreamMode::TEXT).unwrap();
        prop_assert!(verdict.matched);
        prop_assert!(verdict.diff.is_empty());
    }
}
