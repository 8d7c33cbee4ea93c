use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MediaError {
    /// The user has not granted access to the host's session listing.
    #[error("access to active media sessions has not been granted")]
    AccessDenied,
    #[error("media session service unavailable: {0}")]
    Unavailable(String),
    #[error("media backend error: {0}")]
    Backend(String),
    #[error("failed to inject media key: {0}")]
    KeyInjection(String),
    #[error("failed to encode artwork: {0}")]
    Artwork(String),
    #[error("failed to open access settings: {0}")]
    Settings(String),
    #[error("method not implemented: {0}")]
    UnknownMethod(String),
    #[error("{0}")]
    Usage(String),
}

impl MediaError {
    /// Process exit code used by the command-line front end.
    pub fn exit_code(&self) -> i32 {
        match self {
            MediaError::UnknownMethod(_) | MediaError::Usage(_) => 2,
            _ => 1,
        }
    }
}
