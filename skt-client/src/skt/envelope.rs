//! SOAP envelope unwrapping and provider error detection.

use serde::Deserialize;
use serde_json::Value;

use super::normalize::{leaf_text, lenient_string};

/// Error reported when a response carries no result element at all.
pub const INTERNAL_ERROR: &str = "roerrorinternal";

/// Drill `Envelope.Body.<response_key>.<result_key>`.
///
/// Returns `None` when any level is missing or the result is null.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use skt_client::skt::unwrap;
///
/// let raw = json!({"Envelope": {"Body": {"R": {"Res": {"Code": "0"}}}}});
/// assert!(unwrap(&raw, "R", "Res").is_some());
/// assert!(unwrap(&raw, "Other", "Res").is_none());
/// assert!(unwrap(&json!("not an envelope"), "R", "Res").is_none());
/// ```
pub fn unwrap<'a>(raw: &'a Value, response_key: &str, result_key: &str) -> Option<&'a Value> {
    raw.get("Envelope")?
        .get("Body")?
        .get(response_key)?
        .get(result_key)
        .filter(|result| !result.is_null())
}

/// Status fields present on every result element.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ResultStatus {
    #[serde(default)]
    code: Option<Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    message: Option<String>,
}

/// An error reported in the response itself rather than by HTTP.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResponseError {
    /// The envelope held no result
    #[error("roerrorinternal")]
    Internal,

    /// The provider returned a result code other than zero
    #[error("{message}")]
    Provider { code: String, message: String },
}

impl ResponseError {
    /// Classify an unwrapped result.
    ///
    /// A missing `Code` counts as success. Any code that is not the
    /// integer zero, including text that is not a number, is an error.
    pub fn from_result(result: Option<&Value>) -> Option<Self> {
        let Some(result) = result else {
            return Some(ResponseError::Internal);
        };
        let Ok(status) = ResultStatus::deserialize(result) else {
            return Some(ResponseError::Internal);
        };

        let code = match status.code? {
            Value::Null => return None,
            value => leaf_text(value.clone()).unwrap_or_else(|| value.to_string()),
        };
        if code.trim().parse::<i64>() == Ok(0) {
            return None;
        }

        let message = status
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("provider error {code}"));
        Some(ResponseError::Provider { code, message })
    }
}

/// The error message for an unwrapped result, or `None` on success.
pub fn extract_error(result: Option<&Value>) -> Option<String> {
    ResponseError::from_result(result).map(|e| e.to_string())
}
