//! Error taxonomy of the content API adapter

use thiserror::Error;

/// Failures surfaced by the content API adapter
///
/// "Document not found" is not an error: lookup operations return
/// `Ok(None)` for that case. Everything here is a genuine failure the
/// caller must propagate.
#[derive(Debug, Error)]
pub enum CmsError {
    /// Transport-level failure (connect, timeout, TLS)
    #[error("content API request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status (auth, rate limit, ...)
    #[error("content API returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The response body did not match the expected document shape
    #[error("content API returned a malformed response: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The API metadata exposes no master ref to query against
    #[error("content API exposes no master ref")]
    MissingMasterRef,
}
