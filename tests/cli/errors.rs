//! Tests for failure reporting and general CLI flags.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_kubectl_failure_reports_command_and_stderr() {
    let t = Test::new();
    t.write("secrets.yaml", PASSWORD_YAML);

    let output = t
        .cmd()
        .env("FAKE_KUBECTL_FAIL", "namespaces \"ns1\" not found")
        .args(["yaml", "-n", "ns1", "-s", "app-secret", "-f", "secrets.yaml"])
        .output()
        .unwrap();

    assert_failure_with(&output, "create secret generic app-secret -n ns1");
    assert_contains_all(&stderr(&output), &["failed", "namespaces \"ns1\" not found"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_kubeseal_failure_is_not_silent() {
    let t = Test::new();
    t.write("secrets.yaml", PASSWORD_YAML);

    let output = t
        .cmd()
        .env("FAKE_KUBESEAL_FAIL", "cannot read certificate")
        .args(["yaml", "-n", "ns1", "-s", "app-secret", "-f", "secrets.yaml"])
        .args(["-c", "cert.pem", "-o", "out.yaml"])
        .output()
        .unwrap();

    assert_failure_with(&output, "--format yaml --cert cert.pem");
    assert!(stderr(&output).contains("cannot read certificate"));
    assert!(!t.dir.path().join("out.yaml").exists());
}

#[test]
fn test_kubeseal_rejecting_before_reading_input_reports_kubeseal() {
    let t = Test::new();
    t.write("secrets.yaml", PASSWORD_YAML);

    let output = t
        .cmd()
        .env("FAKE_KUBESEAL_REJECT", "cannot read certificate")
        .args(["yaml", "-n", "ns1", "-s", "app-secret", "-f", "secrets.yaml"])
        .args(["-c", "missing.pem"])
        .output()
        .unwrap();

    assert_failure_with(&output, "--format yaml --cert missing.pem");
    assert!(stderr(&output).contains("cannot read certificate"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_missing_kubeseal_has_hint() {
    let t = Test::new();
    t.write("secrets.yaml", PASSWORD_YAML);

    let output = t
        .cmd()
        .env("GOSEAL_KUBESEAL", t.bin.path().join("no-kubeseal"))
        .args(["yaml", "-n", "ns1", "-s", "app-secret", "-f", "secrets.yaml", "-c", "cert.pem"])
        .output()
        .unwrap();

    assert_failure_with(&output, "not found in PATH");
    assert!(stderr(&output).contains("--kubeseal"));
}

#[test]
fn test_kubectl_flag_overrides_env() {
    let t = Test::new();
    t.write("secrets.yaml", PASSWORD_YAML);

    let output = t
        .cmd()
        .env("GOSEAL_KUBECTL", "/nonexistent/kubectl")
        .arg("--kubectl")
        .arg(t.tool("kubectl"))
        .args(["yaml", "-n", "ns1", "-s", "app-secret", "-f", "secrets.yaml"])
        .output()
        .unwrap();

    assert_success(&output);
}

#[test]
fn test_verbose_logs_to_stderr_only() {
    let t = Test::new();
    t.write("secrets.yaml", PASSWORD_YAML);

    let output = t
        .cmd()
        .args(["--verbose", "yaml", "-n", "ns1", "-s", "app-secret", "-f", "secrets.yaml"])
        .output()
        .unwrap();

    let out = assert_success(&output);
    assert!(!out.contains("DEBUG"));
    assert!(stderr(&output).contains("DEBUG"));
}

#[test]
fn test_secret_values_not_logged() {
    let t = Test::new();
    t.write("secrets.yaml", PASSWORD_YAML);

    let output = t
        .cmd()
        .env("GOSEAL_LOG", "goseal=trace")
        .args(["yaml", "-n", "ns1", "-s", "app-secret", "-f", "secrets.yaml"])
        .output()
        .unwrap();

    assert_success(&output);
    assert!(!stderr(&output).contains("s3cr3t"));
}

#[test]
fn test_help_and_version() {
    let t = Test::new();

    let out = assert_success(&t.cmd().arg("--help").output().unwrap());
    assert_contains_all(&out, &["yaml", "file", "config"]);

    t.cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("goseal "));
}

#[test]
fn test_completions_bash() {
    let t = Test::new();

    let out = assert_success(&t.cmd().args(["completions", "bash"]).output().unwrap());
    assert!(out.contains("_goseal") || out.contains("complete"));
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();
    t.cmd()
        .arg("apply")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}
