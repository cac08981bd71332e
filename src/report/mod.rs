pub mod json;
pub mod md;

use crate::error::YapError;
use crate::types::attestation::AggregateReport;
use crate::types::score::ScoreBreakdown;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render_score(breakdown: &ScoreBreakdown, format: OutputFormat) -> Result<String, YapError> {
    match format {
        OutputFormat::Json => json::score_to_json(breakdown).map_err(YapError::Json),
        OutputFormat::Md => Ok(md::score_to_markdown(breakdown)),
    }
}

pub fn render_aggregate(
    report: &AggregateReport,
    format: OutputFormat,
) -> Result<String, YapError> {
    match format {
        OutputFormat::Json => json::aggregate_to_json(report).map_err(YapError::Json),
        OutputFormat::Md => Ok(md::aggregate_to_markdown(report)),
    }
}
