//! alloyrank - pick the best alloy for a target yield strength
//!
//! Reads a materials CSV, scores every row and reports the best match.

use alloyrank::cli;
use alloyrank::RankError;
use clap::Parser;
use console::style;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    // Usage errors share the generic failure code; 2 is reserved for unreadable datasets
    let cli = match cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(1);
        }
        Err(e) => e.exit(),
    };

    // Initialize logging; RUST_LOG overrides --log-level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Err(err) = cli::run(cli) {
        let code = err.downcast_ref::<RankError>().map_or(1, RankError::exit_code);
        eprintln!("{} {:#}", style("error:").red().bold(), err);
        std::process::exit(code);
    }
}
