// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::report::Report;
use crate::runner::LaunchError;
use crate::store::MemoryFs;
use std::io;
use std::path::Path;

/// Runner returning canned output without spawning anything
enum FakeRunner {
    Output(Captured),
    NotFound,
}

impl FakeRunner {
    fn output(stdout: &str, stderr: &str, exit_code: i32) -> Self {
        FakeRunner::Output(Captured {
            stdout: stdout.as_bytes().to_vec(),
            stderr: stderr.as_bytes().to_vec(),
            exit_code,
        })
    }
}

impl CommandRunner for FakeRunner {
    fn execute(&self, command: &CommandLine) -> Result<Captured, LaunchError> {
        match self {
            FakeRunner::Output(captured) => Ok(captured.clone()),
            FakeRunner::NotFound => Err(LaunchError::Spawn {
                program: command.program().to_string(),
                source: io::ErrorKind::NotFound.into(),
            }),
        }
    }
}

fn echo_case() -> TestCase {
    TestCase::new(
        "everything_fine",
        "testdata",
        CommandLine::new("echo").arg("hello, how are you?"),
    )
}

fn harness(runner: FakeRunner, fs: MemoryFs) -> Harness<FakeRunner, MemoryFs> {
    Harness::new(runner, GoldenStore::new(fs), RunOptions::default())
}

fn seeded(out: &str, err: &str) -> MemoryFs {
    MemoryFs::new()
        .with_file("testdata/everything_fine.out", out)
        .with_file("testdata/everything_fine.err", err)
}

#[test]
fn test_matching_case_passes() {
    let h = harness(
        FakeRunner::output("hello, how are you?\n", "", 0),
        seeded("hello, how are you?\n", ""),
    );
    let reporter = CollectingReporter::new();

    let outcome = h.run(&echo_case(), &reporter).unwrap();

    assert!(outcome.passed());
    assert_eq!(outcome.exit_code, 0);
    assert_eq!(outcome.failures().count(), 0);
    assert_eq!(
        reporter.reports(),
        vec![Report::Pass {
            case: "everything_fine".to_string()
        }]
    );
}

#[test]
fn test_wrong_exit_code_fails_with_matching_streams() {
    let h = harness(
        FakeRunner::output("hello, how are you?\n", "", 1),
        seeded("hello, how are you?\n", ""),
    );
    let reporter = CollectingReporter::new();

    let outcome = h.run(&echo_case(), &reporter).unwrap();

    assert!(!outcome.passed());
    assert!(outcome.stdout.matched);
    assert!(outcome.stderr.matched);
    assert_eq!(outcome.exit.diff, "expected exit code 0, got 1");
    assert_eq!(reporter.mismatches("everything_fine"), vec![Check::ExitCode]);
}

#[test]
fn test_all_mismatches_are_reported_together() {
    let h = harness(FakeRunner::output("wrong\n", "noise\n", 2), seeded("right\n", ""));
    let reporter = CollectingReporter::new();

    let outcome = h.run(&echo_case(), &reporter).unwrap();

    assert_eq!(
        reporter.mismatches("everything_fine"),
        vec![Check::ExitCode, Check::Stdout, Check::Stderr]
    );
    let failed: Vec<_> = outcome.failures().map(|(check, _)| check).collect();
    assert_eq!(failed, vec![Check::ExitCode, Check::Stdout, Check::Stderr]);
    assert!(outcome.summary().contains("stdout doesn't match"));
    assert!(outcome.summary().contains("+wrong"));
}

#[test]
fn test_missing_golden_is_fatal() {
    let h = harness(FakeRunner::output("x", "", 0), MemoryFs::new());
    let reporter = CollectingReporter::new();

    let err = h.run(&echo_case(), &reporter).unwrap_err();

    assert!(matches!(err, CaseError::Golden(GoldenError::Missing { .. })));
    assert_eq!(reporter.fatals().len(), 1);
    assert!(reporter.fatals()[0].contains("everything_fine.out"));
}

#[test]
fn test_fatal_stderr_keeps_earlier_reports() {
    // stdout golden exists and mismatches; stderr golden is missing
    let fs = MemoryFs::new().with_file("testdata/everything_fine.out", "right\n");
    let h = harness(FakeRunner::output("wrong\n", "", 0), fs);
    let reporter = CollectingReporter::new();

    let err = h.run(&echo_case(), &reporter).unwrap_err();

    assert!(matches!(err, CaseError::Golden(GoldenError::Missing { .. })));
    let reports = reporter.reports();
    assert!(matches!(reports[0], Report::Mismatch { check: Check::Stdout, .. }));
    assert!(matches!(reports[1], Report::Fatal { .. }));
}

#[test]
fn test_case_update_rewrites_goldens_and_passes() {
    let fs = seeded("stale\n", "stale\n");
    let h = harness(FakeRunner::output("fresh\n", "", 0), fs.clone());
    let case = echo_case().with_update(true);

    let outcome = h.run(&case, &CollectingReporter::new()).unwrap();

    assert!(outcome.passed());
    assert_eq!(fs.get(Path::new("testdata/everything_fine.out")).unwrap(), b"fresh\n");
    assert_eq!(fs.get(Path::new("testdata/everything_fine.err")).unwrap(), b"");
}

#[test]
fn test_update_all_creates_missing_goldens() {
    let fs = MemoryFs::new();
    let h = Harness::new(
        FakeRunner::output("fresh\n", "warn\n", 0),
        GoldenStore::new(fs.clone()),
        RunOptions::default().with_update_all(true),
    );

    let outcome = h.run(&echo_case(), &CollectingReporter::new()).unwrap();

    assert!(outcome.passed());
    assert_eq!(fs.len(), 2);
    assert_eq!(fs.get(Path::new("testdata/everything_fine.err")).unwrap(), b"warn\n");
}

#[test]
fn test_update_never_suppresses_exit_code_check() {
    let h = harness(FakeRunner::output("fresh\n", "", 3), MemoryFs::new());
    let case = echo_case().with_update(true);
    let reporter = CollectingReporter::new();

    let outcome = h.run(&case, &reporter).unwrap();

    assert!(!outcome.passed());
    assert!(outcome.stdout.matched);
    assert_eq!(reporter.mismatches("everything_fine"), vec![Check::ExitCode]);
}

#[test]
fn test_launch_error_becomes_sentinel_exit_code() {
    let fs = MemoryFs::new()
        .with_file("testdata/command_not_in_path.out", "")
        .with_file("testdata/command_not_in_path.err", "");
    let h = harness(FakeRunner::NotFound, fs);
    let case = TestCase::new("command_not_in_path", "testdata", CommandLine::new("ls-la"))
        .with_exit_code(crate::runner::exit_codes::NOT_FOUND);

    let outcome = h.run(&case, &CollectingReporter::new()).unwrap();

    assert!(outcome.passed());
    assert_eq!(outcome.exit_code, 127);
}

#[test]
fn test_stream_modes_are_independent() {
    let fs = MemoryFs::new()
        .with_file("testdata/mixed.out", r#"{"id":"\\d+","ok":true}"#)
        .with_file("testdata/mixed.err", ".*No such file.*");
    let h = harness(
        FakeRunner::output(
            r#"{"ok":true,"id":"7"}"#,
            "ls: cannot access '/x': No such file or directory\n",
            2,
        ),
        fs,
    );
    let case = TestCase::new("mixed", "testdata", CommandLine::new("tool"))
        .with_exit_code(2)
        .with_stdout(StreamMode::JSON.with_regex(true))
        .with_stderr(StreamMode::REGEX);

    let outcome = h.run(&case, &CollectingReporter::new()).unwrap();
    assert!(outcome.passed(), "{}", outcome.summary());
}

#[test]
fn test_malformed_json_golden_is_fatal() {
    let fs = seeded("{broken", "");
    let h = harness(FakeRunner::output("{}", "", 0), fs);
    let case = echo_case().with_stdout(StreamMode::JSON);
    let reporter = CollectingReporter::new();

    let err = h.run(&case, &reporter).unwrap_err();

    match err {
        CaseError::Compare { check, .. } => assert_eq!(check, Check::Stdout),
        other => panic!("expected Compare error, got {other}"),
    }
    assert!(reporter.fatals()[0].starts_with("stdout: golden output is not valid JSON"));
}

#[test]
fn test_invalid_regex_golden_is_fatal() {
    let fs = seeded("", "(unclosed");
    let h = harness(FakeRunner::output("", "anything", 0), fs);
    let case = echo_case().with_stderr(StreamMode::REGEX);

    let err = h.run(&case, &CollectingReporter::new()).unwrap_err();
    assert!(matches!(
        err,
        CaseError::Compare {
            check: Check::Stderr,
            source: CompareError::InvalidPattern(_)
        }
    ));
}

#[test]
fn test_invalid_name_is_fatal() {
    let h = harness(FakeRunner::output("", "", 0), MemoryFs::new());
    let case = TestCase::new("../outside", "testdata", CommandLine::new("true")).with_update(true);

    let err = h.run(&case, &CollectingReporter::new()).unwrap_err();
    assert!(matches!(err, CaseError::Golden(GoldenError::InvalidKey { .. })));
}

#[test]
fn test_golden_keys() {
    let case = echo_case();
    assert_eq!(
        case.golden_key(StreamKind::Out).unwrap().path(),
        Path::new("testdata/everything_fine.out")
    );
    assert_eq!(
        case.golden_key(StreamKind::Err).unwrap().path(),
        Path::new("testdata/everything_fine.err")
    );
}

#[test]
fn test_check_exit_code() {
    assert!(check_exit_code(2, 2).matched);
    let verdict = check_exit_code(0, 127);
    assert!(!verdict.matched);
    assert_eq!(verdict.diff, "expected exit code 0, got 127");
}

#[test]
fn test_builder_defaults() {
    let case = echo_case();
    assert_eq!(case.exit_code, 0);
    assert!(!case.update);
    assert_eq!(case.mode(StreamKind::Out), StreamMode::TEXT);
    assert_eq!(case.mode(StreamKind::Err), StreamMode::TEXT);
}
