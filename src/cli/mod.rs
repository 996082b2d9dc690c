//! CLI command definitions and handlers

mod init;
mod prompt;
mod rank;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// alloyrank - pick the best alloy for a target yield strength
#[derive(Parser, Debug)]
#[command(name = "alloyrank")]
#[command(
    version,
    args_conflicts_with_subcommands = true,
    about = "Rank alloy materials against a target yield strength and thermal, electrical and cost preferences",
    long_about = "alloyrank scores every row of a materials CSV in a single pass and reports \
the best match. Strength and fatigue are always fully weighted; thermal, electrical \
and cost contributions are scaled by the importance weights you give (0-1).\n\n\
Parameters not given as flags are prompted for on stdin.",
    after_help = "\
Examples:
  alloyrank                                              Prompt for parameters, rank data/steel_dataset.csv
  alloyrank -d alloys.csv --required-yield 800 --thermal 0.2 --electrical 0.9 --cost 0.5
  alloyrank -d alloys.csv --required-yield 800 --thermal 0 --electrical 0 --cost 1 --format json
  alloyrank init                                         Write an example alloyrank.toml"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Directory containing alloyrank.toml (default: current directory)
    #[arg(long, global = true, default_value = ".")]
    pub config_dir: PathBuf,

    #[command(flatten)]
    pub rank: RankArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank a dataset and report the best material (default command)
    Rank(RankArgs),

    /// Write an example alloyrank.toml config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Arguments of a ranking run
#[derive(Args, Debug, Clone, Default)]
pub struct RankArgs {
    /// Dataset CSV (default: [dataset].path from config, then data/steel_dataset.csv)
    #[arg(long, short = 'd')]
    pub dataset: Option<PathBuf>,

    /// Required yield strength in MPa (must be > 0)
    #[arg(long, allow_negative_numbers = true)]
    pub required_yield: Option<f64>,

    /// Thermal conductivity importance (0-1)
    #[arg(long, allow_negative_numbers = true)]
    pub thermal: Option<f64>,

    /// Electrical conductivity importance (0-1)
    #[arg(long, allow_negative_numbers = true)]
    pub electrical: Option<f64>,

    /// Cost importance (0-1)
    #[arg(long, allow_negative_numbers = true)]
    pub cost: Option<f64>,

    /// Output format: text, json (default: [defaults].format from config, then text)
    #[arg(long, short = 'f', value_parser = ["text", "json"])]
    pub format: Option<String>,

    /// Output file path (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Show how the winning score was computed
    #[arg(long)]
    pub explain_score: bool,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Rank(args)) => rank::run(&cli.config_dir, &args),
        Some(Commands::Init { force }) => init::run(&cli.config_dir, force),
        None => rank::run(&cli.config_dir, &cli.rank),
    }
}
