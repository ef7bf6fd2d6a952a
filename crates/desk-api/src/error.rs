use thiserror::Error as ThisError;

/// Errors crossing the collaborator boundary.
#[derive(Debug, ThisError)]
pub enum ApiError {
    /// The response did not have the expected shape (missing
    /// success flag or record array). Not recoverable at the
    /// view level.
    #[error("malformed response: {0}")]
    Shape(&'static str),
    /// The collaborator answered, but refused the request.
    #[error("{0}")]
    Rejected(String),
    /// The transport itself failed.
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}
