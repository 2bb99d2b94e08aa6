use thiserror::Error;

/// Errors returned by a [`RemoteDataService`](super::RemoteDataService).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RemoteError {
    /// No signed-in session is cached.
    #[error("Not signed in")]
    NotAuthenticated,

    /// The service answered with a non-success status.
    #[error("Service returned {status}: {message}")]
    Http { status: u16, message: String },

    /// The request never got an answer.
    #[error("Network error: {0}")]
    Network(String),

    /// The answer could not be decoded.
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl RemoteError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RemoteError::Http { status: 404, .. })
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            RemoteError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            RemoteError::Http {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else {
            RemoteError::Network(e.to_string())
        }
    }
}
