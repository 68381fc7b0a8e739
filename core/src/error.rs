use thiserror::Error;

/// Failures talking to the backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// No response was received.
    #[error("Network error: {0}")]
    Transport(String),

    #[error("The server took too long to respond. Please try again.")]
    Timeout,

    /// Non-2xx status. `detail` is the server's message or the status text.
    #[error("{detail}")]
    Rejected { status: u16, detail: String },

    #[error("Unexpected response from server: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Failures of the session hand-off storage.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("Failed to serialize session data: {0}")]
    Serialize(String),

    #[error("Failed to write session key '{key}': {reason}")]
    Write { key: String, reason: String },
}

/// Errors surfaced to the user by a step flow.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlowError {
    #[error("Only PDF files are supported.")]
    NotPdf,

    #[error("Please upload a PDF to continue.")]
    MissingFile,

    #[error("A request is already in progress.")]
    Busy,

    /// The step was left before the request finished.
    #[error("The request was abandoned because the page was closed.")]
    Cancelled,

    #[error("No PDF is available for this course.")]
    NoPdf,

    #[error("The course PDF could not be decoded: {0}")]
    CorruptPdf(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
