//! Secret maps and the commands built from them.
//!
//! A secret map is read either from a YAML document of key/value pairs or
//! from a single file whose whole content becomes one value. It is then
//! rendered into a `kubectl create secret generic --dry-run` invocation.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use std::process::Command;

use serde_yaml::Value;
use tracing::{debug, trace};
use zeroize::Zeroizing;

use crate::error::{InputError, Result};

/// Secret key to plaintext value, ordered by key.
///
/// Values are wiped from memory when the map is dropped.
pub type SecretMap = BTreeMap<String, Zeroizing<String>>;

/// Read a file fully, keeping the raw bytes in a zeroizing buffer.
///
/// # Errors
///
/// Returns `InputError::EmptyFile` if the file has no content.
pub fn read_input(path: &Path) -> Result<Zeroizing<Vec<u8>>> {
    let mut buf = Zeroizing::new(Vec::new());
    std::fs::File::open(path)
        .and_then(|mut f| f.read_to_end(&mut buf))
        .map_err(|source| InputError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    if buf.is_empty() {
        return Err(InputError::EmptyFile(path.to_path_buf()).into());
    }

    trace!(path = %path.display(), len = buf.len(), "read input file");
    Ok(buf)
}

/// Decode a YAML mapping of secret keys to scalar values.
///
/// Strings, numbers and booleans are taken as their text and a null value
/// as the empty string. A document with no content yields an empty map.
pub fn from_yaml(content: &[u8], path: &Path) -> Result<SecretMap> {
    if content.is_empty() {
        return Err(InputError::EmptyFile(path.to_path_buf()).into());
    }

    let parse_err = |reason: String| InputError::Parse {
        path: path.to_path_buf(),
        reason,
    };

    if is_blank_yaml(content) {
        return Ok(SecretMap::new());
    }

    let doc: Value = serde_yaml::from_slice(content).map_err(|e| parse_err(e.to_string()))?;
    let mapping = match doc {
        Value::Null => return Ok(SecretMap::new()),
        Value::Mapping(m) => m,
        _ => return Err(parse_err("expected a mapping of key: value pairs".into()).into()),
    };

    let mut secrets = SecretMap::new();
    for (key, value) in mapping {
        let key = scalar_text(&key)
            .ok_or_else(|| parse_err("keys must be scalars".into()))?;
        let value = match value {
            Value::Null => Some(String::new()),
            other => scalar_text(&other),
        }
        .ok_or_else(|| parse_err(format!("value for '{}' must be a scalar", key)))?;
        secrets.insert(key, Zeroizing::new(value));
    }

    debug!(keys = secrets.len(), "decoded yaml secrets");
    Ok(secrets)
}

/// Use a whole file's content as the value of a single key.
pub fn from_file(key: &str, content: &[u8], path: &Path) -> Result<SecretMap> {
    if content.is_empty() {
        return Err(InputError::EmptyFile(path.to_path_buf()).into());
    }

    let value = std::str::from_utf8(content)
        .map_err(|_| InputError::NotUtf8(path.to_path_buf()))?;

    let mut secrets = SecretMap::new();
    secrets.insert(key.to_string(), Zeroizing::new(value.to_string()));
    Ok(secrets)
}

// Only whitespace and comments.
fn is_blank_yaml(content: &[u8]) -> bool {
    String::from_utf8_lossy(content)
        .lines()
        .map(str::trim)
        .all(|l| l.is_empty() || l.starts_with('#'))
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(t) => scalar_text(&t.value),
        _ => None,
    }
}

/// Build `<kubectl> create secret generic <name> -n <namespace> --dry-run -o yaml
/// --from-literal=<key>=<value>...`.
pub fn build_secret_command(
    secrets: &SecretMap,
    name: &str,
    namespace: &str,
    kubectl: &str,
) -> Command {
    let mut cmd = Command::new(kubectl);
    cmd.args([
        "create",
        "secret",
        "generic",
        name,
        "-n",
        namespace,
        "--dry-run",
        "-o",
        "yaml",
    ]);

    // `Command` keeps its own copy of each argument.
    for (key, value) in secrets {
        let literal = Zeroizing::new(format!("--from-literal={}={}", key, value.as_str()));
        cmd.arg(literal.as_str());
    }

    debug!(
        secret = name,
        namespace,
        keys = ?secrets.keys().collect::<Vec<_>>(),
        "built secret command"
    );
    cmd
}

/// Build `<kubeseal> --format yaml --cert <cert>`.
pub fn build_seal_command(cert: &str, kubeseal: &str) -> Command {
    let mut cmd = Command::new(kubeseal);
    cmd.args(["--format", "yaml", "--cert", cert]);
    cmd
}
