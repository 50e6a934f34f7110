// errors.rs
use astra::Response;
use thiserror::Error;

/// Errors originating from the server logic (routing, malformed forms,
/// poisoned session locks). Remote API failures are handled by the pages
/// themselves and never reach this type.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Internal Server Error")]
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;
