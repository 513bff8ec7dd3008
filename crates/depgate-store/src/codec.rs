//! History envelope encoding.
//!
//! The on-disk format is a JSON envelope that names itself, carries a
//! schema version, and seals the records with a SHA256 digest:
//!
//! ```text
//! {
//!   "format": "depgate-history",
//!   "schema_version": 1,
//!   "written_at": "2024-05-01T12:00:00Z",
//!   "records_digest": "<sha256 hex>",
//!   "records": { "/abs/path/requirements.txt": { "flask": "1.2" } }
//! }
//! ```
//!
//! Decoding distinguishes a valid empty history from a damaged file: any
//! envelope mismatch is an error, an empty `records` object is not.

use crate::errors::{corrupt_history, serialization_error, unsupported_schema, Result};
use chrono::{DateTime, Utc};
use depgate_core::model::HistoryRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Format tag written into every envelope
pub const FORMAT_TAG: &str = "depgate-history";

/// Current envelope schema version
pub const SCHEMA_VERSION: u32 = 1;

/// On-disk envelope around a [`HistoryRecord`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEnvelope {
    pub format: String,
    pub schema_version: u32,
    pub written_at: DateTime<Utc>,
    pub records_digest: String,
    pub records: HistoryRecord,
}

/// Encode a record into envelope bytes.
///
/// # Errors
///
/// Returns `Serialization` if JSON encoding fails.
pub fn encode(record: &HistoryRecord) -> Result<Vec<u8>> {
    let envelope = HistoryEnvelope {
        format: FORMAT_TAG.to_string(),
        schema_version: SCHEMA_VERSION,
        written_at: Utc::now(),
        records_digest: records_digest(record)?,
        records: record.clone(),
    };
    let mut bytes =
        serde_json::to_vec_pretty(&envelope).map_err(|e| serialization_error("history_encode", e))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Decode envelope bytes into the full envelope.
///
/// # Errors
///
/// - `CorruptHistory`: not JSON, not an object, wrong format tag,
///   missing fields, or digest mismatch
/// - `UnsupportedSchema`: schema version is not [`SCHEMA_VERSION`]
pub fn decode_envelope(bytes: &[u8]) -> Result<HistoryEnvelope> {
    let raw: Value = serde_json::from_slice(bytes)
        .map_err(|e| corrupt_history(format!("history is not valid JSON: {}", e)))?;

    let obj = raw
        .as_object()
        .ok_or_else(|| corrupt_history("history JSON root must be an object"))?;

    match obj.get("format").and_then(Value::as_str) {
        Some(FORMAT_TAG) => {}
        Some(other) => {
            return Err(corrupt_history(format!(
                "unexpected format tag `{}`",
                other
            )))
        }
        None => return Err(corrupt_history("format tag is missing")),
    }

    let version = obj
        .get("schema_version")
        .and_then(Value::as_u64)
        .ok_or_else(|| corrupt_history("schema_version must be an unsigned integer"))?;
    if version != u64::from(SCHEMA_VERSION) {
        return Err(unsupported_schema(version, SCHEMA_VERSION));
    }

    let envelope: HistoryEnvelope = serde_json::from_value(raw)
        .map_err(|e| corrupt_history(format!("history envelope is incomplete: {}", e)))?;

    let computed = records_digest(&envelope.records)?;
    if computed != envelope.records_digest {
        return Err(corrupt_history(format!(
            "records digest mismatch: recorded {}, computed {}",
            envelope.records_digest, computed
        )));
    }

    Ok(envelope)
}

/// Decode envelope bytes into the history record.
pub fn decode(bytes: &[u8]) -> Result<HistoryRecord> {
    decode_envelope(bytes).map(|envelope| envelope.records)
}

/// SHA256 over the canonical (key-sorted, compact) JSON of the records.
pub fn records_digest(record: &HistoryRecord) -> Result<String> {
    let canonical =
        serde_json::to_string(record).map_err(|e| serialization_error("history_digest", e))?;
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}
