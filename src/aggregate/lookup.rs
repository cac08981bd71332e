use crate::types::attestation::{AttestationRecord, DecodedField};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// The latest attestation published for one user, plus how many the batch
/// held in total.
#[derive(Debug)]
pub struct UserAttestation {
    pub fields: Vec<DecodedField>,
    pub time_created: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub revoked: bool,
    pub total_matches: usize,
}

/// Filters a batch down to the attestations whose `twitterUserId` field
/// equals `user_id` and returns the most recent one. The id arrives either
/// as a JSON number or a digit string; both compare by digits. Records with
/// malformed payloads are skipped, matching the aggregation pass.
pub fn lookup_user(records: &[AttestationRecord], user_id: &str) -> Option<UserAttestation> {
    let mut matches: Vec<(&AttestationRecord, Vec<DecodedField>)> = Vec::new();

    for record in records {
        let fields = match record.decoded_fields() {
            Ok(fields) => fields,
            Err(_) => continue,
        };
        let is_match = fields.iter().any(|field| {
            field.name.contains("twitterUserId")
                && id_string(field.unwrapped()).as_deref() == Some(user_id)
        });
        if is_match {
            matches.push((record, fields));
        }
    }

    let total_matches = matches.len();
    matches
        .into_iter()
        .max_by_key(|(record, _)| record.time_created)
        .map(|(record, fields)| UserAttestation {
            fields,
            time_created: record.time_created,
            created_at: record.created_at(),
            revoked: record.revoked,
            total_matches,
        })
}

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
