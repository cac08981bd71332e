use crate::types::attestation::AggregateReport;
use crate::types::score::ScoreBreakdown;

pub fn score_to_markdown(breakdown: &ScoreBreakdown) -> String {
    let mut output = String::new();
    output.push_str("# YAPS Content Score\n\n");
    output.push_str(&format!(
        "Total: {:.1} ({})\n",
        breakdown.total, breakdown.rating
    ));
    output.push_str(&format!("Estimated YAPS: ~{}\n\n", breakdown.estimated_yaps));

    output.push_str("## Sub-scores\n\n");
    output.push_str(&format!(
        "- optimization: {:.0}/10\n- engagement: {:.0}/10\n- quality: {:.0}/10\n\n",
        breakdown.sub_scores.optimization,
        breakdown.sub_scores.engagement,
        breakdown.sub_scores.quality
    ));

    output.push_str("## Signals\n\n");
    let features = &breakdown.features;
    output.push_str(&format!(
        "- length: {} chars, {} words{}\n",
        features.char_count,
        features.word_count,
        if features.is_optimal_length {
            " (optimal)"
        } else {
            ""
        }
    ));
    output.push_str(&format!(
        "- crypto keywords: {}\n- generic phrases: {}\n- question: {}\n- metrics: {}\n\n",
        features.crypto_keyword_count,
        features.generic_phrase_count,
        yes_no(features.contains_question_mark),
        yes_no(features.matches_metric_pattern)
    ));

    output.push_str("## Content Types\n\n");
    if breakdown.content_types.is_empty() {
        output.push_str("- standard format\n\n");
    } else {
        for content_type in &breakdown.content_types {
            output.push_str(&format!("- {content_type}\n"));
        }
        output.push('\n');
    }

    output.push_str("## Penalties\n\n");
    if breakdown.penalties.is_empty() {
        output.push_str("- none\n\n");
    } else {
        for penalty in &breakdown.penalties {
            output.push_str(&format!("- {penalty}\n"));
        }
        output.push('\n');
    }

    output.push_str("## Suggestions\n\n");
    for suggestion in &breakdown.suggestions {
        output.push_str(&format!("- {suggestion}\n"));
    }

    output
}

pub fn aggregate_to_markdown(report: &AggregateReport) -> String {
    let mut output = String::new();
    output.push_str("# Attestation Field Statistics\n\n");
    if let Some(schema) = &report.schema_uid {
        output.push_str(&format!("Schema: {schema}\n"));
    }
    output.push_str(&format!(
        "Records: {} (skipped: {})\n\n",
        report.record_count, report.skipped_records
    ));

    for (name, stats) in &report.fields {
        output.push_str(&format!("## {} ({})\n\n", name, stats.declared_type));
        if stats.samples == 0 {
            output.push_str("- no numeric samples\n\n");
            continue;
        }
        output.push_str(&format!("- samples: {}\n", stats.samples));
        if let (Some(min), Some(max)) = (stats.min, stats.max) {
            output.push_str(&format!("- range: {} - {}\n", min.trunc(), max.trunc()));
        }
        // Means are truncated for display only; the stored value stays exact.
        if let Some(mean) = stats.mean {
            output.push_str(&format!("- average: {}\n", mean.trunc()));
        }
        if let Some(median) = stats.median {
            output.push_str(&format!("- median: {}\n", median.trunc()));
        }
        if let Some(distribution) = &stats.distribution {
            let preview = distribution
                .iter()
                .map(|value| format!("{}", value.trunc()))
                .collect::<Vec<_>>()
                .join(", ");
            output.push_str(&format!("- distribution: {preview}\n"));
        }
        if let Some(percentiles) = &stats.percentiles {
            for percentile in percentiles {
                output.push_str(&format!(
                    "- p{}: {}\n",
                    percentile.percentile,
                    percentile.value.trunc()
                ));
            }
        }
        output.push('\n');
    }

    output.push_str("## Inputs\n\n");
    for input in &report.inputs {
        output.push_str(&format!("- {} ({})\n", input.path, input.sha256));
    }

    output
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
