//! Tests for `goseal yaml`.

use crate::support::*;

#[test]
fn test_yaml_prints_manifest_to_stdout() {
    let t = Test::new();
    t.write("secrets.yaml", PASSWORD_YAML);

    let out = assert_success(&t.yaml("secrets.yaml", &[]));
    assert_contains_all(&out, &[PASSWORD_COMMAND, "kind: Secret"]);
    assert!(!out.contains("kubeseal"));
}

#[test]
fn test_yaml_alias() {
    let t = Test::new();
    t.write("secrets.yaml", PASSWORD_YAML);

    let output = t
        .cmd()
        .args(["y", "-n", "ns1", "-s", "app-secret", "-f", "secrets.yaml"])
        .output()
        .unwrap();
    let out = assert_success(&output);
    assert!(out.contains(PASSWORD_COMMAND));
}

#[test]
fn test_yaml_one_literal_per_key_in_key_order() {
    let t = Test::new();
    t.write("secrets.yaml", "user: admin\nport: 5432\napi_key: abc=def\n");

    let out = assert_success(&t.yaml("secrets.yaml", &[]));
    assert!(
        out.contains(
            "-o yaml --from-literal=api_key=abc=def --from-literal=port=5432 --from-literal=user=admin"
        ),
        "got: {out}"
    );
}

#[test]
fn test_yaml_sealed_writes_out_file() {
    let t = Test::new();
    t.write("secrets.yaml", PASSWORD_YAML);

    let output = t.yaml("secrets.yaml", &["--cert", "cert.pem", "--out", "out.yaml"]);
    let out = assert_success(&output);
    assert!(out.contains("wrote out.yaml"), "got: {out}");
    assert!(!out.contains("kind: Secret"));

    let sealed = t.read("out.yaml");
    assert_contains_all(
        &sealed,
        &[
            "# kubeseal --format yaml --cert cert.pem",
            &format!("sealed: # {}", PASSWORD_COMMAND),
            "sealed: kind: Secret",
        ],
    );
}

#[test]
fn test_yaml_unsealed_out_creates_parent_dirs() {
    let t = Test::new();
    t.write("secrets.yaml", PASSWORD_YAML);

    assert_success(&t.yaml("secrets.yaml", &["-o", "manifests/app/secret.yaml"]));

    let written = t.read("manifests/app/secret.yaml");
    assert_contains_all(&written, &[PASSWORD_COMMAND, "kind: Secret"]);
}

#[test]
fn test_yaml_sealed_to_stdout() {
    let t = Test::new();
    t.write("secrets.yaml", PASSWORD_YAML);

    let out = assert_success(&t.yaml("secrets.yaml", &["-c", "cert.pem"]));
    assert!(out.starts_with("# kubeseal --format yaml --cert cert.pem\n"), "got: {out}");
}

#[test]
fn test_yaml_empty_file_fails_before_running() {
    let t = Test::new();
    t.write("empty.yaml", "");

    let output = t
        .cmd()
        .env("FAKE_KUBECTL_FAIL", "should not run")
        .args(["yaml", "-n", "ns1", "-s", "app-secret", "-f", "empty.yaml"])
        .output()
        .unwrap();
    assert_failure_with(&output, "file content is empty");
    assert!(!stderr(&output).contains("should not run"));
}

#[test]
fn test_yaml_malformed_input_fails() {
    let t = Test::new();
    t.write("bad.yaml", "password: [unclosed\n");

    assert_failure_with(&t.yaml("bad.yaml", &[]), "invalid secret file");
}

#[test]
fn test_yaml_missing_input_fails() {
    let t = Test::new();
    assert_failure_with(&t.yaml("missing.yaml", &[]), "failed to read");
}
