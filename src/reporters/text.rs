//! Text (terminal) reporter

use crate::models::RankReport;
use anyhow::Result;
use console::style;

/// Render report as terminal output
pub fn render(report: &RankReport) -> Result<String> {
    let best = &report.best;
    let record = &best.record;
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", style("=== BEST MATERIAL ===").bold()));
    out.push_str(&format!("Name: {}\n", record.name));
    out.push_str(&format!("Yield Strength: {:.1} MPa\n", record.yield_strength));
    out.push_str(&format!("Ductility: {:.1} %\n", record.ductility));
    out.push_str(&format!("Cluster: {}\n", record.cluster));
    out.push_str(&format!("Score: {:.3}\n", best.composite));

    let summary = if report.rows_malformed > 0 {
        format!(
            "Scanned {} rows ({} malformed, read with zero defaults)",
            report.rows_scanned, report.rows_malformed
        )
    } else {
        format!("Scanned {} rows", report.rows_scanned)
    };
    out.push_str(&format!("\n{}\n", style(summary).dim()));

    Ok(out)
}
