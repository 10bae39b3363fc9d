use thiserror::Error;

/// Errors that can occur during user operations.
///
/// `NotFound` is the only domain failure. `ActorCommunicationError` means the
/// service task is gone, not that the request was wrong.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
