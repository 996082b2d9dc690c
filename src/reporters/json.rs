//! JSON reporter
//!
//! Outputs the full RankReport as pretty-printed JSON.
//! Useful for machine consumption, piping to jq, or further processing.

use crate::models::RankReport;
use anyhow::Result;

/// Render report as JSON
pub fn render(report: &RankReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    #[test]
    fn test_json_render_valid() {
        let report = test_report();
        let json_str = render(&report).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");

        assert_eq!(parsed["best"]["record"]["name"], "Alloy-X");
        assert_eq!(parsed["best"]["record"]["cluster"], 7);
        assert_eq!(parsed["best"]["composite"], 0.561);
        assert_eq!(parsed["best"]["sub_scores"]["thermal"], 0.96);
        assert_eq!(parsed["parameters"]["required_yield"], 1000.0);
        assert_eq!(parsed["rows_scanned"], 3);
        assert_eq!(parsed["rows_malformed"], 1);
    }

    #[test]
    fn test_json_round_trips_report() {
        let report = test_report();
        let json_str = render(&report).expect("render JSON");
        let back: RankReport = serde_json::from_str(&json_str).expect("parse report");
        assert_eq!(back.best, report.best);
        assert_eq!(back.parameters, report.parameters);
    }
}
