//! Backend connection configuration.

/// Connection settings for the marketplace backend, loaded from
/// environment variables.
///
/// All fields have defaults suitable for local development; in production,
/// override via environment variables.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the backend API (no trailing slash).
    pub base_url: String,
    /// Bearer token attached to every request, when present.
    pub auth_token: Option<String>,
    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl BackendConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default                          |
    /// |--------------------------------|----------------------------------|
    /// | `BACKEND_BASE_URL`             | `http://localhost:4000/api/v1`   |
    /// | `BACKEND_AUTH_TOKEN`           | (unset)                          |
    /// | `BACKEND_REQUEST_TIMEOUT_SECS` | `30`                             |
    pub fn from_env() -> Self {
        let base_url = std::env::var("BACKEND_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:4000/api/v1".into());
        let base_url = base_url.trim_end_matches('/').to_string();

        let auth_token = std::env::var("BACKEND_AUTH_TOKEN")
            .ok()
            .filter(|token| !token.is_empty());

        let request_timeout_secs: u64 = std::env::var("BACKEND_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("BACKEND_REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url,
            auth_token,
            request_timeout_secs,
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4000/api/v1".into(),
            auth_token: None,
            request_timeout_secs: 30,
        }
    }
}
