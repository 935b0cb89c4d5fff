//! Response envelope normalisation.
//!
//! The backend wraps payloads inconsistently: `{ "data": X }`,
//! `{ "success": true, "data": X, "message": "..." }` or a bare `X`. Every
//! response body passes through this module exactly once.

use serde_json::Value;

use super::ApiError;

/// Keys under which listing endpoints nest their rows.
const LIST_KEYS: &[&str] = &["items", "records", "results", "rows"];

/// Reject `{ "success": false, ... }` bodies, leaving anything else intact.
///
/// # Errors
///
/// Returns [`ApiError::Rejected`] carrying the envelope's `message` (or
/// `error`) when `success` is `false`.
pub fn ensure_accepted(body: Value) -> Result<Value, ApiError> {
    if body.get("success").and_then(Value::as_bool) == Some(false) {
        let message = ["message", "error"]
            .iter()
            .find_map(|key| body.get(*key).and_then(Value::as_str))
            .unwrap_or("Request was rejected");
        return Err(ApiError::Rejected(message.to_string()));
    }
    Ok(body)
}

/// Unwrap one envelope level.
///
/// # Errors
///
/// Returns [`ApiError::Rejected`] for `success: false` envelopes.
pub fn unwrap(body: Value) -> Result<Value, ApiError> {
    let body = ensure_accepted(body)?;
    match body {
        Value::Object(mut object) if object.contains_key("data") => {
            Ok(object.remove("data").unwrap_or(Value::Null))
        }
        other => Ok(other),
    }
}

/// Unwrap an envelope whose payload is a list of records.
///
/// Accepts a bare array, an object nesting the array under one of
/// `items`/`records`/`results`/`rows`, or `null` (no records).
///
/// # Errors
///
/// Returns [`ApiError::Parse`] when no array can be found.
pub fn unwrap_list(body: Value) -> Result<Vec<Value>, ApiError> {
    match unwrap(body)? {
        Value::Array(items) => Ok(items),
        Value::Null => Ok(Vec::new()),
        Value::Object(mut object) => LIST_KEYS
            .iter()
            .find_map(|key| match object.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .ok_or_else(|| ApiError::Parse("expected a list of records".to_string())),
        other => Err(ApiError::Parse(format!("expected a list of records, got {other}"))),
    }
}
