//! Test fixtures and constants.

/// Stand-in for `kubectl`: prints its command line and a minimal manifest.
///
/// Fails with the message in `FAKE_KUBECTL_FAIL` when set.
pub const FAKE_KUBECTL: &str = r##"#!/bin/sh
if [ -n "$FAKE_KUBECTL_FAIL" ]; then
  echo "error: $FAKE_KUBECTL_FAIL" >&2
  exit 1
fi
echo "# kubectl $*"
printf 'apiVersion: v1\nkind: Secret\n'
"##;

/// Stand-in for `kubeseal`: prints its command line, then echoes stdin with
/// every line prefixed by `sealed: `.
///
/// Fails with the message in `FAKE_KUBESEAL_FAIL` when set, after reading
/// stdin. `FAKE_KUBESEAL_REJECT` fails without reading stdin at all.
pub const FAKE_KUBESEAL: &str = r##"#!/bin/sh
if [ -n "$FAKE_KUBESEAL_REJECT" ]; then
  echo "error: $FAKE_KUBESEAL_REJECT" >&2
  exit 1
fi
if [ -n "$FAKE_KUBESEAL_FAIL" ]; then
  cat >/dev/null
  echo "error: $FAKE_KUBESEAL_FAIL" >&2
  exit 1
fi
echo "# kubeseal $*"
sed 's/^/sealed: /'
"##;

/// Single key input for the yaml command.
pub const PASSWORD_YAML: &str = "password: s3cr3t\n";

/// Stage configs: `prod` with cert and base path, `dev` with neither.
pub const STAGES_YAML: &str = "configs:
  - name: prod
    cert: /certs/prod.pem
    basePath: out/prod
  - name: dev
";

/// Command line the fake kubectl reports for `PASSWORD_YAML`.
pub const PASSWORD_COMMAND: &str =
    "kubectl create secret generic app-secret -n ns1 --dry-run -o yaml --from-literal=password=s3cr3t";
