pub mod lookup;

use crate::types::attestation::{
    numeric_value, AttestationRecord, FieldStatistics, Percentile,
};
use crate::types::config::AggregateConfig;
use std::collections::BTreeMap;
use tracing::debug;

/// Result of one aggregation pass. Skipped records carried malformed
/// `decodedDataJson` and are reported, not raised.
#[derive(Debug, Clone)]
pub struct Aggregation {
    pub fields: BTreeMap<String, FieldStatistics>,
    pub record_count: usize,
    pub skipped_records: usize,
}

struct FieldAccumulator {
    declared_type: String,
    values: Vec<f64>,
}

/// Groups decoded field values by name and computes per-field descriptive
/// statistics in a single pass. Non-numeric values are excluded from the
/// statistics but keep the field tracked.
pub fn aggregate(records: &[AttestationRecord], cfg: &AggregateConfig) -> Aggregation {
    let mut accumulators: BTreeMap<String, FieldAccumulator> = BTreeMap::new();
    let mut skipped = 0usize;

    for record in records {
        let fields = match record.decoded_fields() {
            Ok(fields) => fields,
            Err(err) => {
                debug!(error = %err, "skipping record with malformed decoded payload");
                skipped += 1;
                continue;
            }
        };

        for field in fields {
            let entry = accumulators
                .entry(field.name.clone())
                .or_insert_with(|| FieldAccumulator {
                    declared_type: field.field_type.clone(),
                    values: Vec::new(),
                });
            if let Some(value) = numeric_value(field.unwrapped()) {
                entry.values.push(value);
            }
        }
    }

    let fields = accumulators
        .into_iter()
        .map(|(name, accumulator)| {
            let is_marker = cfg
                .distribution_markers
                .iter()
                .any(|marker| name.to_lowercase().contains(marker.as_str()));
            let statistics = finalize(accumulator, is_marker, cfg);
            (name, statistics)
        })
        .collect();

    Aggregation {
        fields,
        record_count: records.len(),
        skipped_records: skipped,
    }
}

fn finalize(accumulator: FieldAccumulator, is_marker: bool, cfg: &AggregateConfig) -> FieldStatistics {
    let values = accumulator.values;
    if values.is_empty() {
        return FieldStatistics {
            declared_type: accumulator.declared_type,
            samples: 0,
            values,
            min: None,
            max: None,
            mean: None,
            median: None,
            distribution: None,
            percentiles: None,
        };
    }

    let mut sorted = values.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let min = sorted.first().copied();
    let max = sorted.last().copied();
    // True average; integer division would bias every mean downward.
    let mean = Some(values.iter().sum::<f64>() / values.len() as f64);
    let median = Some(median_of(&sorted));

    let (distribution, percentiles) = if is_marker {
        let mut distinct = sorted.clone();
        distinct.dedup();
        distinct.truncate(cfg.distribution_preview);
        (Some(distinct), Some(percentiles_of(&sorted, &cfg.percentiles)))
    } else {
        (None, None)
    };

    FieldStatistics {
        declared_type: accumulator.declared_type,
        samples: values.len(),
        values,
        min,
        max,
        mean,
        median,
        distribution,
        percentiles,
    }
}

fn median_of(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn percentiles_of(sorted: &[f64], percentiles: &[u8]) -> Vec<Percentile> {
    percentiles
        .iter()
        .map(|p| {
            let index = ((*p as usize) * sorted.len() / 100).min(sorted.len() - 1);
            Percentile {
                percentile: *p,
                value: sorted[index],
            }
        })
        .collect()
}
