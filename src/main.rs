//! goseal - generate Kubernetes secret files and optionally seal them.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use goseal::cli::{execute, output, Cli};
use goseal::core::constants;

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("goseal=debug")
        } else {
            EnvFilter::new("goseal=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli) {
        tracing::debug!(error = ?e, "command failed");
        output::error(&e.to_string());
        if let Some(hint) = e.hint() {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
