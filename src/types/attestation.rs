use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One attestation as returned by the EAS GraphQL indexer. `decodedDataJson`
/// holds a JSON-encoded array of name/type/value triples.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttestationRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub attester: Option<String>,
    #[serde(default)]
    pub recipient: Option<String>,
    #[serde(default)]
    pub decoded_data_json: String,
    #[serde(default)]
    pub time_created: i64,
    #[serde(default)]
    pub revoked: bool,
}

impl AttestationRecord {
    /// Decodes the embedded field triples. A malformed payload is the
    /// caller's cue to skip this record, never to abort the batch.
    pub fn decoded_fields(&self) -> Result<Vec<DecodedField>, serde_json::Error> {
        serde_json::from_str(&self.decoded_data_json)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.time_created, 0).single()
    }
}

/// One `{name, type, value}` triple from a decoded attestation payload.
#[derive(Debug, Clone, Deserialize)]
pub struct DecodedField {
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: String,
    #[serde(default)]
    pub value: Value,
}

impl DecodedField {
    pub fn unwrapped(&self) -> &Value {
        unwrap_value(&self.value)
    }
}

/// The indexer double-wraps values as `{value: {value: X}}` for some
/// schemas and `{value: X}` for others; both must yield `X`.
pub fn unwrap_value(value: &Value) -> &Value {
    match value {
        Value::Object(map) => match map.get("value") {
            Some(inner) => unwrap_value(inner),
            None => value,
        },
        _ => value,
    }
}

/// Admits JSON numbers and strings composed entirely of ASCII digits.
/// Everything else is excluded from statistics.
pub fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) => {
            text.parse::<f64>().ok()
        }
        _ => None,
    }
}

/// One schema registration from the indexer's `schemata` listing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SchemaRecord {
    pub id: String,
    #[serde(default)]
    pub schema: String,
    #[serde(default)]
    pub creator: Option<String>,
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub index: Option<String>,
}

/// One percentile of a field's numeric sample.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Percentile {
    pub percentile: u8,
    pub value: f64,
}

/// Aggregated view over one field name across a batch of records.
#[derive(Debug, Clone, Serialize)]
pub struct FieldStatistics {
    pub declared_type: String,
    pub samples: usize,
    /// Numeric values in order of arrival.
    pub values: Vec<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    /// First N sorted distinct values; marker fields only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentiles: Option<Vec<Percentile>>,
}

/// Digest of one input file, recorded so a run is traceable to its inputs.
#[derive(Debug, Clone, Serialize)]
pub struct InputDigest {
    pub path: String,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AggregateReport {
    pub generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_uid: Option<String>,
    pub record_count: usize,
    pub skipped_records: usize,
    pub inputs: Vec<InputDigest>,
    pub fields: BTreeMap<String, FieldStatistics>,
}
