use reqwest::StatusCode;
use thiserror::Error;

/// ApiError
///
/// The single error shape surfaced by the API gateway. Every failure is
/// either an application error (the server answered with a non-success
/// status) or a transport error (no response at all).
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server responded with a non-success status. `message` comes from
    /// the response body's `message` field when present, otherwise a generic
    /// status-coded fallback.
    #[error("{message}")]
    Http { status: StatusCode, message: String },

    /// The request never produced a response: DNS failure, refused
    /// connection, dropped socket, unreadable body.
    #[error("{0}")]
    Transport(String),
}

impl ApiError {
    /// HTTP status of an application error; `None` for transport failures.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Transport(_) => None,
        }
    }

    /// The user-displayable message, regardless of variant.
    pub fn message(&self) -> &str {
        match self {
            ApiError::Http { message, .. } => message,
            ApiError::Transport(message) => message,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}
