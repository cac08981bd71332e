use crate::types::attestation::AggregateReport;
use crate::types::score::ScoreBreakdown;

pub fn score_to_json(breakdown: &ScoreBreakdown) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(breakdown)
}

pub fn aggregate_to_json(report: &AggregateReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
