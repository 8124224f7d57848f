//! Hosted-backend row mapping
//!
//! The hosted database hands back loosely-typed JSON. Before any of it
//! reaches the ledger it is mapped here into [`TransactionRecord`]s, and
//! anything that does not fit the shape is a [`FetchError::Malformed`].
//!
//! Accepted payloads:
//!
//! - a bare array of row objects
//! - an envelope `{ "data": [...], "error": null }`
//! - an envelope with a non-null `"error"`, reported as [`FetchError::Rejected`]
//!
//! Row fields: `from_member` (or `from`, `giver`, `from_user`), `to_member`
//! (or `to`, `receiver`, `to_user`) and `minutes`. Other fields are ignored.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

use crate::ledger::{FetchError, TransactionRecord, TransactionSource};
use crate::models::{MemberId, MAX_FAVOR_MINUTES};

const FROM_KEYS: &[&str] = &["from_member", "from", "giver", "from_user"];
const TO_KEYS: &[&str] = &["to_member", "to", "receiver", "to_user"];

/// Decode a hosted-backend payload into transaction records
pub fn decode_rows(payload: &Value) -> Result<Vec<TransactionRecord>, FetchError> {
    let rows = match payload {
        Value::Array(rows) => rows,
        Value::Object(envelope) => {
            if let Some(error) = envelope.get("error").filter(|e| !e.is_null()) {
                return Err(FetchError::Rejected(error_message(error)));
            }
            match envelope.get("data") {
                Some(Value::Array(rows)) => rows,
                Some(Value::Null) | None => {
                    return Err(FetchError::Malformed(
                        "response has neither data nor error".into(),
                    ))
                }
                Some(other) => {
                    return Err(FetchError::Malformed(format!(
                        "expected data to be an array, got {}",
                        kind(other)
                    )))
                }
            }
        }
        other => {
            return Err(FetchError::Malformed(format!(
                "expected an array of rows, got {}",
                kind(other)
            )))
        }
    };

    rows.iter()
        .enumerate()
        .map(|(i, row)| decode_row(row).map_err(|msg| FetchError::Malformed(format!("row {}: {}", i, msg))))
        .collect()
}

/// Parse and decode a payload held in a string
pub fn decode_rows_str(payload: &str) -> Result<Vec<TransactionRecord>, FetchError> {
    let value: Value = serde_json::from_str(payload)
        .map_err(|e| FetchError::Malformed(format!("invalid JSON: {}", e)))?;
    decode_rows(&value)
}

fn decode_row(row: &Value) -> Result<TransactionRecord, String> {
    let object = row
        .as_object()
        .ok_or_else(|| format!("expected an object, got {}", kind(row)))?;

    let from_member = member_field(object, FROM_KEYS)?;
    let to_member = member_field(object, TO_KEYS)?;

    let minutes = match object.get("minutes") {
        Some(Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| format!("minutes must be a whole number, got {}", n))?,
        Some(other) => return Err(format!("minutes must be a number, got {}", kind(other))),
        None => return Err("missing minutes".into()),
    };
    if minutes < 0 {
        return Err(format!("minutes must not be negative, got {}", minutes));
    }
    if minutes > MAX_FAVOR_MINUTES {
        return Err(format!(
            "minutes must be at most {}, got {}",
            MAX_FAVOR_MINUTES, minutes
        ));
    }

    Ok(TransactionRecord {
        from_member,
        to_member,
        minutes,
    })
}

fn member_field(object: &Map<String, Value>, keys: &[&str]) -> Result<MemberId, String> {
    let (key, value) = keys
        .iter()
        .find_map(|k| object.get(*k).map(|v| (*k, v)))
        .ok_or_else(|| format!("missing {}", keys[0]))?;

    let id = match value {
        Value::String(s) => MemberId::new(s.as_str()),
        Value::Number(n) if n.is_u64() || n.is_i64() => MemberId::new(n.to_string()),
        other => return Err(format!("{} must be a string, got {}", key, kind(other))),
    };

    if id.is_blank() {
        return Err(format!("{} is empty", key));
    }
    Ok(id)
}

fn error_message(error: &Value) -> String {
    match error {
        Value::String(s) => s.clone(),
        Value::Object(o) => o
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string()),
        other => other.to_string(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Transaction source backed by a JSON export of the hosted favors table
///
/// The file is re-read on every fetch, so each call sees the current
/// snapshot.
pub struct ExportSource {
    path: PathBuf,
}

impl ExportSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TransactionSource for ExportSource {
    fn fetch_transactions(
        &self,
        a: &MemberId,
        b: &MemberId,
    ) -> Result<Vec<TransactionRecord>, FetchError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            FetchError::Unavailable(format!("{}: {}", self.path.display(), e))
        })?;

        let records = decode_rows_str(&contents)?;
        debug!(path = %self.path.display(), rows = records.len(), "decoded export rows");

        Ok(records.into_iter().filter(|r| r.is_between(a, b)).collect())
    }
}
