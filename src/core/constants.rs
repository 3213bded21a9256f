//! Constants used throughout goseal.
//!
//! Centralizes magic strings and configuration values.

/// Stage configuration file name, looked up in both config directories.
pub const CONFIG_FILE: &str = ".goseal";

/// Directory under the OS user-config dir holding the global config.
pub const GLOBAL_DIR_NAME: &str = "goseal";

/// Overrides the global config directory.
pub const CONFIG_DIR_ENV: &str = "GOSEAL_CONFIG_DIR";

/// Tracing filter for log output.
pub const LOG_ENV: &str = "GOSEAL_LOG";

/// Secret manifest generator.
pub const KUBECTL: &str = "kubectl";

/// Sealing utility.
pub const KUBESEAL: &str = "kubeseal";
