//! Command-line interface.

pub mod completions;
pub mod config;
pub mod output;
pub mod secret;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::config::StageConfiguration;
use crate::core::constants;
use crate::error::Result;

/// goseal - generate (and optionally seal) Kubernetes secret files.
#[derive(Parser)]
#[command(
    name = "goseal",
    about = "Used to automatically generate kubernetes secret files (and optionally seal them)",
    version
)]
pub struct Cli {
    /// Stage config to take the output base path and certificate from
    #[arg(short = 'c', long = "config", value_name = "STAGE")]
    pub stage: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Secret manifest generator
    #[arg(long, env = "GOSEAL_KUBECTL", default_value = constants::KUBECTL, global = true)]
    pub kubectl: String,

    /// Sealing utility
    #[arg(long, env = "GOSEAL_KUBESEAL", default_value = constants::KUBESEAL, global = true)]
    pub kubeseal: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Create a secret file with key-value pairs as in the yaml file
    #[command(visible_alias = "y")]
    Yaml {
        #[command(flatten)]
        args: SecretArgs,
    },

    /// Create a secret with a file as secret value
    File {
        #[command(flatten)]
        args: SecretArgs,
        /// The secret key, under which the file can be accessed
        #[arg(short, long)]
        key: String,
    },

    /// Read or edit the stage configuration
    #[command(visible_alias = "c")]
    Config {
        /// Use the global config instead of the one in the current directory
        #[arg(short, long)]
        global: bool,
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Flags shared by `yaml` and `file`.
#[derive(Args, Debug, Clone)]
pub struct SecretArgs {
    /// The namespace of the secret
    #[arg(short, long)]
    pub namespace: String,

    /// The input file
    #[arg(short, long)]
    pub file: PathBuf,

    /// The secret name
    #[arg(short, long)]
    pub secret_name: String,

    /// If set, will run kubeseal with the given cert
    #[arg(short, long)]
    pub cert: Option<String>,

    /// Destination file
    #[arg(short, long)]
    pub out: Option<String>,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the stage configs (merged with global ones when --global is set)
    Print {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a stage config
    Add {
        /// Stage name
        #[arg(short, long)]
        name: String,
        /// Certificate used for sealing
        #[arg(long, default_value = "")]
        cert: String,
        /// Directory prefixed onto --out
        #[arg(long, default_value = "")]
        base_path: String,
    },
}

/// External programs the pipeline runs.
#[derive(Debug, Clone)]
pub struct Tools {
    pub kubectl: String,
    pub kubeseal: String,
}

/// Execute a parsed command line.
pub fn execute(cli: Cli) -> Result<()> {
    let Cli {
        stage,
        kubectl,
        kubeseal,
        command,
        ..
    } = cli;
    let tools = Tools { kubectl, kubeseal };
    let stage = stage.as_deref();

    match command {
        Command::Yaml { args } => secret::yaml(&args, stage, &tools),
        Command::File { args, key } => secret::file(&args, &key, stage, &tools),
        Command::Config { global, action } => match action {
            ConfigAction::Print { json } => config::print(global, json),
            ConfigAction::Add {
                name,
                cert,
                base_path,
            } => config::add(
                global,
                StageConfiguration {
                    name,
                    cert,
                    base_path,
                },
            ),
        },
        Command::Completions { shell } => completions::execute(shell),
    }
}
