use thiserror::Error;

/// Errors returned by the pharmacy store client.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered 404 for the requested resource.
    #[error("not found: {url}")]
    NotFound { url: String },

    /// Any other non-2xx answer.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl StoreError {
    /// Lets callers that want idempotent deletes treat a missing record as
    /// success. The client never does this on its own.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
