pub mod projects;

use crate::error::{Result, YapError};
use crate::types::attestation::{AttestationRecord, InputDigest, SchemaRecord};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

/// Schema declarations containing any of these are worth a second look when
/// hunting for the scoring schemas.
pub const DEFAULT_SCHEMA_KEYWORDS: [&str; 7] = [
    "yap", "score", "point", "scaled", "lifetime", "monthly", "rating",
];

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct AttestationData {
    attestations: Option<Vec<AttestationRecord>>,
}

#[derive(Debug, Deserialize)]
struct SchemaData {
    schemata: Option<Vec<SchemaRecord>>,
}

/// Decodes a saved GraphQL response and enforces the `data.attestations`
/// shape. Anything else is a query failure and aborts the operation; there
/// are no partial results.
pub fn parse_attestation_response(body: &str) -> Result<Vec<AttestationRecord>> {
    let response: GraphqlResponse<AttestationData> = serde_json::from_str(body)?;
    response
        .data
        .and_then(|data| data.attestations)
        .ok_or_else(|| YapError::QueryShape("missing data.attestations".to_string()))
}

/// Same contract for the `data.schemata` listing.
pub fn parse_schema_response(body: &str) -> Result<Vec<SchemaRecord>> {
    let response: GraphqlResponse<SchemaData> = serde_json::from_str(body)?;
    response
        .data
        .and_then(|data| data.schemata)
        .ok_or_else(|| YapError::QueryShape("missing data.schemata".to_string()))
}

/// Loads exported attestation pages from a single JSON file or a directory
/// of them, concatenating records in file order. Each input's sha256 is
/// recorded so a run is traceable to its exact inputs.
pub fn load_attestations(path: &Path) -> Result<(Vec<AttestationRecord>, Vec<InputDigest>)> {
    let mut records = Vec::new();
    let mut inputs = Vec::new();
    for file in input_files(path)? {
        let body = std::fs::read_to_string(&file)?;
        let mut page = parse_attestation_response(&body)
            .map_err(|err| annotate_with_path(err, &file))?;
        info!(path = %file.display(), records = page.len(), "loaded attestation page");
        records.append(&mut page);
        inputs.push(digest_of(&file, &body));
    }
    Ok((records, inputs))
}

pub fn load_schemas(path: &Path) -> Result<(Vec<SchemaRecord>, Vec<InputDigest>)> {
    let mut schemas = Vec::new();
    let mut inputs = Vec::new();
    for file in input_files(path)? {
        let body = std::fs::read_to_string(&file)?;
        let mut page =
            parse_schema_response(&body).map_err(|err| annotate_with_path(err, &file))?;
        schemas.append(&mut page);
        inputs.push(digest_of(&file, &body));
    }
    Ok((schemas, inputs))
}

/// Case-insensitive keyword scan over schema declarations.
pub fn scan_schema_candidates<'a>(
    schemas: &'a [SchemaRecord],
    keywords: &[String],
) -> Vec<&'a SchemaRecord> {
    schemas
        .iter()
        .filter(|schema| {
            let declaration = schema.schema.to_lowercase();
            keywords
                .iter()
                .any(|keyword| declaration.contains(keyword.to_lowercase().as_str()))
        })
        .collect()
}

fn input_files(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        return Err(YapError::PathNotFound(path.display().to_string()));
    }
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .filter(|file| file.extension().map(|ext| ext == "json").unwrap_or(false))
        .collect();
    files.sort();
    if files.is_empty() {
        return Err(YapError::PathNotFound(format!(
            "no .json exports under {}",
            path.display()
        )));
    }
    Ok(files)
}

fn digest_of(path: &Path, body: &str) -> InputDigest {
    let mut hasher = Sha256::new();
    hasher.update(body.as_bytes());
    InputDigest {
        path: path.display().to_string(),
        sha256: format!("{:x}", hasher.finalize()),
    }
}

fn annotate_with_path(err: YapError, path: &Path) -> YapError {
    match err {
        YapError::QueryShape(msg) => {
            YapError::QueryShape(format!("{}: {}", path.display(), msg))
        }
        YapError::Json(json) => {
            YapError::QueryShape(format!("{}: {}", path.display(), json))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const PAGE: &str = r#"{
        "data": {
            "attestations": [
                {
                    "id": "0x01",
                    "attester": "0xabc",
                    "decodedDataJson": "[{\"name\":\"yapPoints\",\"type\":\"uint64\",\"value\":{\"value\":100}}]",
                    "timeCreated": 1735689600,
                    "revoked": false
                }
            ]
        }
    }"#;

    #[test]
    fn parse_accepts_the_expected_attestation_shape() {
        let records = parse_attestation_response(PAGE).expect("page should parse");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id.as_deref(), Some("0x01"));
        assert!(!records[0].revoked);
    }

    #[test]
    fn parse_rejects_a_response_without_attestations() {
        let err = parse_attestation_response(r#"{"data": {}}"#)
            .expect_err("shape error expected");
        assert!(err.to_string().contains("data.attestations"));

        let err = parse_attestation_response(r#"{"errors": [{"message": "boom"}]}"#)
            .expect_err("shape error expected");
        assert!(err.to_string().contains("data.attestations"));
    }

    #[test]
    fn parse_schema_listing() {
        let body = r#"{
            "data": {
                "schemata": [
                    {"id": "0xaa", "schema": "uint64 yapPoints", "creator": "0xdeee", "index": "155"},
                    {"id": "0xbb", "schema": "string name"}
                ]
            }
        }"#;
        let schemas = parse_schema_response(body).expect("listing should parse");
        assert_eq!(schemas.len(), 2);
        assert_eq!(schemas[0].index.as_deref(), Some("155"));
    }

    #[test]
    fn scan_matches_keywords_case_insensitively() {
        let schemas = vec![
            SchemaRecord {
                id: "0xaa".to_string(),
                schema: "uint64 twitterUserId, uint64 yapScaledPoints".to_string(),
                creator: None,
                time: None,
                index: None,
            },
            SchemaRecord {
                id: "0xbb".to_string(),
                schema: "string message".to_string(),
                creator: None,
                time: None,
                index: None,
            },
        ];
        let keywords = vec!["SCALED".to_string()];
        let candidates = scan_schema_candidates(&schemas, &keywords);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].id, "0xaa");
    }

    #[test]
    fn load_attestations_from_a_directory_of_pages() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(dir.path().join("page-1.json"), PAGE).expect("page 1 should write");
        fs::write(dir.path().join("page-2.json"), PAGE).expect("page 2 should write");
        fs::write(dir.path().join("notes.txt"), "ignored").expect("notes should write");

        let (records, inputs) =
            load_attestations(dir.path()).expect("directory load should succeed");
        assert_eq!(records.len(), 2);
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].sha256.len(), 64);
    }

    #[test]
    fn load_attestations_rejects_missing_path() {
        let err = load_attestations(Path::new("/nonexistent/export.json"))
            .expect_err("missing path should fail");
        assert!(matches!(err, YapError::PathNotFound(_)));
    }

    #[test]
    fn load_attestations_reports_the_offending_file_on_shape_errors() {
        let dir = TempDir::new().expect("temp dir should be created");
        let bad = dir.path().join("bad.json");
        fs::write(&bad, r#"{"data": {}}"#).expect("bad page should write");

        let err = load_attestations(&bad).expect_err("shape error expected");
        assert!(err.to_string().contains("bad.json"));
    }
}
