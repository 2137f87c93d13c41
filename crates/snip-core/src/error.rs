use thiserror::Error;

/// Errors related to the core functionality of the URL shortener service.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
}

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

#[derive(Debug, Clone, Error)]
pub enum ShortenerError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("failed to allocate a unique short code after {attempts} attempts")]
    Exhausted { attempts: u32 },
    #[error("invalid shortener settings: {0}")]
    InvalidSettings(String),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
