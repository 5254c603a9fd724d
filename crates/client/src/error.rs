//! Error type for the marketplace backend service layer.

/// Errors from the marketplace backend service layer.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Backend API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}
