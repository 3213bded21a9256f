//! Error types for goseal.
//!
//! Each concern has its own error enum; they are aggregated into [`Error`]
//! so command handlers can propagate everything with `?`.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the stage configuration store.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine the user configuration directory")]
    NoConfigDir,

    #[error("path exists but is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to read config: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to write config: {0}")]
    WriteFile(#[source] std::io::Error),

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_yaml::Error),

    #[error("stage config not found: {0}")]
    StageNotFound(String),
}

/// Errors from reading and decoding the secret input file.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("file content is empty: {}", .0.display())]
    EmptyFile(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid secret file {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("file is not valid UTF-8: {}", .0.display())]
    NotUtf8(PathBuf),
}

/// Errors from running the external commands and writing their output.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("{program} not found in PATH")]
    NotInstalled { program: String },

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to connect '{from}' to '{to}'")]
    Pipe { from: String, to: String },

    #[error("command '{command}' failed: {status}{}", stderr_suffix(.stderr))]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("{seal}\ninput command also failed: {generate}")]
    BothFailed {
        seal: Box<PipelineError>,
        generate: Box<PipelineError>,
    },

    #[error("failed to write {}: {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("\n{}", trimmed)
    }
}

impl Error {
    /// Suggested next step for the user, if there is an obvious one.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Error::Config(ConfigError::StageNotFound(_)) => Some("run: goseal config --global print"),
            Error::Pipeline(PipelineError::NotInstalled { program })
                if program.ends_with("kubeseal") =>
            {
                Some("install kubeseal or point --kubeseal at it")
            }
            Error::Pipeline(PipelineError::NotInstalled { .. }) => {
                Some("install kubectl or point --kubectl at it")
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
