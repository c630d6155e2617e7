use std::fmt;

use prom_core::SubmissionError;

#[derive(Debug)]
pub enum ApiError {
    /// The request never completed (connect, timeout, broken body).
    Transport(reqwest::Error),
    /// The backend answered with a non-success status.
    Status { status: u16, detail: Option<String> },
    /// The body did not have the expected shape.
    Decode(String),
    Config(String),
    Io(std::io::Error),
}

impl ApiError {
    /// The backend's own explanation, when it sent one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(e) => write!(f, "request failed: {e}"),
            ApiError::Status {
                status,
                detail: Some(detail),
            } => write!(f, "HTTP {status}: {detail}"),
            ApiError::Status { status, detail: None } => write!(f, "HTTP {status}"),
            ApiError::Decode(msg) => write!(f, "unexpected response: {msg}"),
            ApiError::Config(msg) => write!(f, "invalid config: {msg}"),
            ApiError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e)
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(e: std::io::Error) -> Self {
        ApiError::Io(e)
    }
}

impl From<ApiError> for SubmissionError {
    fn from(e: ApiError) -> Self {
        SubmissionError::new(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
