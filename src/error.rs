use thiserror::Error;

/// Errors that can occur while talking to the remote admin API.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Server responded with {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("{operation} is not supported for {resource}")]
    Unsupported { resource: &'static str, operation: &'static str },
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

/// Errors returned by view-model and tab operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ViewModelError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("No brand selected")]
    NoBrandSelected,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

/// Top-level errors of the dashboard binary.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    ViewModel(#[from] ViewModelError),
    #[error("Fetch failed: {0}")]
    FetchFailed(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Task failed: {0}")]
    Task(String),
}
