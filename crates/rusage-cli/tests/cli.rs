//! Binary-level tests for the rusage CLI: exit codes and stderr contract.

use std::process::{Command, Output};

const REPORT_LABELS: [&str; 13] = [
    "Wall time (secs):",
    "CPU time (secs):",
    "Max resident set size:",
    "Integral shared memory:",
    "Integral unshared data:",
    "Integral unshared stack:",
    "Page reclaims:",
    "Page faults:",
    "Swaps:",
    "Block I/Os:",
    "Signals received:",
    "IPC messages:",
    "Context switches:",
];

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rusage"))
        .args(args)
        .output()
        .expect("tool binary should run")
}

fn stderr_of(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn test_missing_argument_is_a_usage_error() {
    let out = run(&[]);
    assert!(!out.status.success(), "missing command must not exit 0");
    let stderr = stderr_of(&out);
    assert!(stderr.contains("Usage:"), "no usage message in: {stderr}");
    for label in REPORT_LABELS {
        assert!(!stderr.contains(label), "report printed without a command");
    }
}

#[test]
fn test_child_exit_42_tool_exits_zero_with_full_report() {
    let out = run(&["-q", "/bin/sh", "-c", "exit 42"]);
    assert_eq!(out.status.code(), Some(0), "child's code must not be forwarded");
    let stderr = stderr_of(&out);
    for label in REPORT_LABELS {
        assert!(stderr.contains(label), "missing report line {label:?} in: {stderr}");
    }
    assert!(stderr.contains("Command exited with status 42"));
    assert!(out.stdout.is_empty(), "nothing belongs on stdout");
}

#[test]
fn test_launch_failure_exits_127_without_report() {
    let out = run(&["/definitely/not/here"]);
    assert_eq!(out.status.code(), Some(127));
    let stderr = stderr_of(&out);
    assert!(stderr.contains("Command could not be launched"), "stderr: {stderr}");
    for label in REPORT_LABELS {
        assert!(!stderr.contains(label), "report printed for a failed launch");
    }
}

#[test]
fn test_prefix_applies_to_report_lines() {
    let out = run(&["--prefix", "ru| ", "-q", "/bin/true"]);
    assert_eq!(out.status.code(), Some(0));
    let stderr = stderr_of(&out);
    let report: Vec<&str> = stderr.lines().filter(|l| l.starts_with("ru| ")).collect();
    assert_eq!(report.len(), 13, "stderr: {stderr}");
}
