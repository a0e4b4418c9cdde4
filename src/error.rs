//! Error types for the CrossRef client.

/// Errors that can occur when interacting with the CrossRef API.
#[derive(Debug, thiserror::Error)]
pub enum CrossRefError {
    /// HTTP request failed before a response was obtained (connection, timeout, etc.)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The resource does not exist (HTTP 404). Carries the fully resolved URL.
    #[error("Not found on CrossRef: '{url}'")]
    NotFound { url: String },

    /// CrossRef answered with an HTTP error status, or an envelope whose
    /// `status` is not `"ok"` (in which case `status` is `None`).
    #[error("CrossRef error: {}", upstream_message(.status, .message))]
    Upstream { status: Option<u16>, message: String },

    /// The response body was not a well-formed CrossRef envelope.
    #[error("Malformed CrossRef response: {0}")]
    Malformed(String),

    /// The call could not be turned into a request (e.g. a missing path
    /// parameter). Nothing was sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn upstream_message(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("[{}] {}", code, message),
        None => message.to_string(),
    }
}

/// Convenience alias for Results using [`CrossRefError`].
pub type Result<T> = std::result::Result<T, CrossRefError>;
