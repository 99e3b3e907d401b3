use serde::Deserialize;
use serde_json::Value;

use super::types::{AuditLogRecord, COLUMNS, ParsedBatch, RecordIssue};
use crate::errors::FetchError;

/// Parse an upstream response body.
///
/// The body must be a JSON array; anything else is a `FetchError`.
/// Elements that are not complete records are collected as `RecordIssue`s
/// and do not abort the batch.
pub fn parse_batch(body: &str) -> Result<ParsedBatch, FetchError> {
    let value: Value = serde_json::from_str(body)?;
    let items = match value {
        Value::Array(items) => items,
        other => return Err(FetchError::NotAnArray(json_kind(&other))),
    };

    let mut batch = ParsedBatch::default();
    for (idx, item) in items.iter().enumerate() {
        match validate_record(idx + 1, item) {
            Ok(record) => batch.records.push(record),
            Err(issue) => batch.rejected.push(issue),
        }
    }
    Ok(batch)
}

fn validate_record(position: usize, item: &Value) -> Result<AuditLogRecord, RecordIssue> {
    if let Ok(record) = AuditLogRecord::deserialize(item) {
        return Ok(record);
    }

    let Some(obj) = item.as_object() else {
        return Err(RecordIssue {
            position,
            missing: vec![],
            not_strings: vec![],
            not_an_object: true,
        });
    };

    let mut missing = Vec::new();
    let mut not_strings = Vec::new();
    for col in COLUMNS {
        match obj.get(col.source) {
            None | Some(Value::Null) => missing.push(col.source),
            Some(Value::String(_)) => {}
            Some(_) => not_strings.push(col.source),
        }
    }
    Err(RecordIssue { position, missing, not_strings, not_an_object: false })
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
