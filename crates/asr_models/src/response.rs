//! Shared provider response parsing
//!
//! Providers returning JSON agree on nothing beyond "the text is in
//! there somewhere". Policy: prefer a field literally named `text`;
//! otherwise scan the remaining fields in the order they arrived and
//! take the first non-empty string value. Status flags are metadata,
//! not transcript candidates, so the scan skips them.

use serde_json::Value;

use crate::error::AsrError;

/// Extract transcript text from a decoded provider response
///
/// # Errors
///
/// Returns [`AsrError::MalformedResponse`] with the full body when
/// no text-bearing field can be located.
pub(crate) fn extract_text(value: &Value) -> Result<String, AsrError> {
    if let Some(obj) = value.as_object() {
        if let Some(text) = obj.get("text").and_then(Value::as_str) {
            return Ok(text.trim().to_string());
        }

        for (key, field) in obj {
            if key == "status" {
                continue;
            }
            if let Some(s) = field.as_str() {
                if !s.is_empty() {
                    return Ok(s.trim().to_string());
                }
            }
        }
    }

    Err(AsrError::MalformedResponse {
        body: value.to_string(),
    })
}
