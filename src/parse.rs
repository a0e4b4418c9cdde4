//! CrossRef response parsing.
//!
//! Every CrossRef response is wrapped in an envelope:
//!
//! ```json
//! {"status": "ok", "message-type": "work-list", "message": { ... }}
//! ```
//!
//! [`parse_envelope`] validates that shape and unwraps `message`;
//! [`parse_page`] splits a list message into items and continuation state.

use crate::error::{CrossRefError, Result};
use crate::query::QueryOptions;
use crate::types::Page;
use serde_json::{Map, Value};

/// Validate a decoded response body and return its `message`.
pub fn parse_envelope(body: Value) -> Result<Value> {
    let mut envelope = match body {
        Value::Object(map) => map,
        other => {
            return Err(CrossRefError::Malformed(format!(
                "response was not a JSON object: {}",
                other
            )))
        }
    };

    let status = match envelope.get("status") {
        Some(value) if is_present(value) => match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
        _ => return Err(CrossRefError::Malformed("no `status` field.".to_string())),
    };
    if status != "ok" {
        return Err(CrossRefError::Upstream {
            status: None,
            message: status,
        });
    }

    envelope
        .remove("message")
        .ok_or_else(|| CrossRefError::Malformed("no `message` field.".to_string()))
}

/// `null`, `false`, `0` and `""` count as an absent `status`.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64() != Some(0.0),
        _ => true,
    }
}

/// Decode a raw body and validate it as an envelope.
pub fn parse_envelope_str(body: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(body).map_err(|_| {
        CrossRefError::Malformed(format!("response was not JSON: {}", snippet(body)))
    })?;
    parse_envelope(value)
}

/// Split a list message into a [`Page`].
///
/// When the message carries `items-per-page` and `query.start-index`, the
/// next offset is `start-index + items-per-page` and the page is final once
/// that offset exceeds `total-results`; without `total-results` the page is
/// never final. Messages without the first two fields (the `types` list, for
/// one) are a single, final page and the options are returned unchanged.
pub fn parse_page(message: Value, options: &QueryOptions) -> Result<Page> {
    let mut message = match message {
        Value::Object(map) => map,
        _ => {
            return Err(CrossRefError::Malformed(
                "list `message` is not an object.".to_string(),
            ))
        }
    };

    let items = match message.remove("items") {
        Some(Value::Array(items)) => items,
        _ => {
            return Err(CrossRefError::Malformed(
                "list `message` has no `items` array.".to_string(),
            ))
        }
    };

    let (next_options, is_done) = match next_offset(&message) {
        Some(next) => {
            let total = message.get("total-results").and_then(Value::as_u64);
            (options.with_offset(next), total.map_or(false, |t| next > t))
        }
        None => (options.clone(), true),
    };

    Ok(Page {
        items,
        next_options,
        is_done,
        message,
    })
}

/// `start-index + items-per-page` for a paginated message.
///
/// A zero page size is treated as missing metadata, since it could never
/// advance.
fn next_offset(message: &Map<String, Value>) -> Option<u64> {
    let per_page = message
        .get("items-per-page")
        .and_then(Value::as_u64)
        .filter(|n| *n > 0)?;
    let start = message
        .get("query")
        .and_then(|q| q.get("start-index"))
        .and_then(Value::as_u64)?;
    Some(start + per_page)
}

/// Best human-readable message from an HTTP error body.
///
/// CrossRef error bodies are either plain text or an envelope whose
/// `message` is a list of `{"message": ...}` objects.
pub fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let Ok(value) = serde_json::from_str::<Value>(trimmed) else {
        return Some(snippet(trimmed));
    };

    let message = match value.get("message") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Array(entries)) => {
            let parts: Vec<&str> = entries
                .iter()
                .filter_map(|e| e.get("message").and_then(Value::as_str))
                .collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    };
    message.or_else(|| Some(snippet(trimmed)))
}

fn snippet(body: &str) -> String {
    const LIMIT: usize = 200;
    match body.char_indices().nth(LIMIT) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
