//! Rank command - score a dataset and report the best material

use super::{prompt, RankArgs};
use crate::config::load_project_config;
use crate::models::RankReport;
use crate::pipeline::RankPipeline;
use crate::reporters::{self, OutputFormat};
use crate::scoring::ScoreBreakdown;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Run the rank command
pub fn run(config_dir: &Path, args: &RankArgs) -> Result<()> {
    let config = load_project_config(config_dir);
    let pipeline = RankPipeline::new(&config)?;

    let dataset = config.dataset_path(args.dataset.as_deref());
    let format = OutputFormat::from_str(&config.output_format(args.format.as_deref()))?;

    // Source errors win over parameter errors: open before prompting
    let reader = pipeline.open(&dataset)?;

    let stdin = std::io::stdin();
    let params = prompt::collect_parameters(args, &mut stdin.lock(), &mut std::io::stderr())?;
    debug!("Run parameters: {:?}", params);

    let selection = pipeline.rank(reader, &params)?;
    let report = RankReport::new(dataset.display().to_string(), params, selection);

    let mut rendered = reporters::report_with_format(&report, format)?;
    if args.explain_score && format == OutputFormat::Text {
        let breakdown = ScoreBreakdown {
            composite: report.best.composite,
            sub_scores: report.best.sub_scores,
        };
        rendered.push_str(&format!(
            "\n{}\n{}\n",
            style("Score breakdown").bold(),
            pipeline.scorer().explain(&breakdown, &params)
        ));
    }

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            eprintln!("Report written to {}", style(path.display()).cyan());
        }
        None => print!("{rendered}"),
    }

    Ok(())
}
