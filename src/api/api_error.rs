use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The operations API could not be reached at all.
    #[error("Connection error: {0}")]
    Connection(String),
    /// The API answered with a non-200 status.
    #[error("API returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Unexpected payload: {0}")]
    Payload(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}
