//! Error types for courier-store.

use thiserror::Error;

/// A failed call against an external task board.
///
/// The sync engine treats every variant the same way — one failed call —
/// and does not interpret sub-kinds (auth, rate limit, schema mismatch).
/// The variants exist so operators can read useful messages in the logs.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Could not reach the store at all (DNS, connect, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// The store answered with a non-success HTTP status.
    #[error("store returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The store answered 2xx but the payload was not the expected shape.
    #[error("unexpected store response: {0}")]
    Response(String),
}

impl From<ureq::Error> for StoreError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => {
                let body = response.into_string().unwrap_or_default();
                StoreError::Status { status, body }
            }
            ureq::Error::Transport(transport) => StoreError::Transport(transport.to_string()),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Response(err.to_string())
    }
}
