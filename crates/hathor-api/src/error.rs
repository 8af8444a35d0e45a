//! Error types for fullnode API operations.

/// Errors that can occur when interacting with a fullnode.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to serialize or deserialize data.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Fullnode returned a non-2xx response.
    #[error("node error ({status_code}): {message}")]
    Node {
        /// HTTP status code.
        status_code: u16,
        /// Error message from the node.
        message: String,
    },

    /// Fullnode answered but reported the request as unsuccessful.
    #[error("request rejected: {0}")]
    Rejected(String),
}
