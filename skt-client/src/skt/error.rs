//! SKT client error types.

use crate::xml::XmlError;

use super::convert::ConversionError;
use super::envelope::ResponseError;

/// Errors from the SKT client and response pipeline.
#[derive(Debug, thiserror::Error)]
pub enum SktError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the API
    #[error("rate limited by SKT API")]
    RateLimited,

    /// Unauthorized
    #[error("unauthorized")]
    Unauthorized,

    /// XML body could not be converted
    #[error("XML error: {0}")]
    Xml(#[from] XmlError),

    /// JSON body could not be parsed
    #[error("JSON parse error: {message}{}", .body.as_ref().map(|b| format!(" (body: {b})")).unwrap_or_default())]
    Json {
        message: String,
        body: Option<String>,
    },

    /// The response reported an error
    #[error(transparent)]
    Response(#[from] ResponseError),

    /// The response could not be mapped to domain types
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}
