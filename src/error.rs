use thiserror::Error;

/// Failure of a single tracker request.
///
/// There are only two ways a request can go wrong: the URL could not be
/// built, or the round trip to the server failed. A non-2xx status counts as
/// the latter.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("malformed request url: {0}")]
    MalformedUrl(String),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ApiError {
    /// Fixed human-readable string used in place of a response body when the
    /// caller prefers text over a `Result`.
    pub fn sentinel(&self) -> &'static str {
        match self {
            ApiError::MalformedUrl(_) => "Malformed URL",
            ApiError::Network(_) => "Network error",
        }
    }
}
