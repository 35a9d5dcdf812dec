use thiserror::Error;

/// Errors returned by [`crate::TechmartClient`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP 401/403: missing, expired, or rejected bearer token.
    #[error("not authorized: {detail}")]
    Unauthorized { detail: String },

    #[error("not found: {url}")]
    NotFound { url: String },

    #[error("rate limited (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    /// Any other non-2xx response. `detail` is the backend's `{"detail": ...}`
    /// message when present, otherwise the raw body.
    #[error("unexpected HTTP status {status} from {url}: {detail}")]
    Status {
        status: u16,
        url: String,
        detail: String,
    },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl ApiError {
    /// HTTP status code of a backend rejection, if the error carries one.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Http(e) => e.status().map(|s| s.as_u16()),
            ApiError::NotFound { .. } => Some(404),
            ApiError::RateLimited { .. } => Some(429),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Unauthorized { .. }
            | ApiError::Deserialize { .. }
            | ApiError::InvalidBaseUrl { .. } => None,
        }
    }

    /// `true` when the request never got a response (connect failure, timeout).
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Http(e) if e.is_timeout() || e.is_connect() || e.is_request())
    }

    /// `true` when a write may have been applied even though the call failed.
    ///
    /// Transport failures and unreadable response bodies both qualify: the
    /// backend may have accepted the request before the client lost track of
    /// it. Status rejections are definite and do not.
    #[must_use]
    pub fn leaves_outcome_unknown(&self) -> bool {
        match self {
            ApiError::Http(e) => self.is_transport() || e.is_body() || e.is_decode(),
            ApiError::Deserialize { .. } => true,
            ApiError::Unauthorized { .. }
            | ApiError::NotFound { .. }
            | ApiError::RateLimited { .. }
            | ApiError::Status { .. }
            | ApiError::InvalidBaseUrl { .. } => false,
        }
    }
}
