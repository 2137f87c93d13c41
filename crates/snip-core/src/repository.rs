use crate::error::StorageError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A stored link in the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// The short code identifying the link.
    pub code: ShortCode,
    /// The destination URL, exactly as it was submitted.
    pub url: String,
    /// Number of successful resolutions.
    pub clicks: u64,
    /// When the link was created.
    pub created_at: Timestamp,
}

impl LinkRecord {
    /// A freshly created link with no clicks.
    pub fn new(code: ShortCode, url: impl Into<String>, created_at: Timestamp) -> Self {
        Self {
            code,
            url: url.into(),
            clicks: 0,
            created_at,
        }
    }
}

/// Outcome of a conditional insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The code was free and the link is now stored.
    Inserted,
    /// The code is already taken; nothing was written.
    AlreadyExists,
}

/// A read-only view of a repository.
///
/// This trait provides only the read operations from [`Repository`],
/// allowing services like the stats reader to have read-only access.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the link for a given short code.
    /// Returns `None` if the code does not exist.
    async fn get(&self, code: &ShortCode) -> Result<Option<LinkRecord>>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Stores a new link with zero clicks unless the code is already taken.
    ///
    /// The uniqueness check and the write happen as one atomic step in the
    /// backend, so two concurrent calls with the same code can never both
    /// observe [`InsertOutcome::Inserted`].
    async fn insert_if_absent(
        &self,
        code: &ShortCode,
        url: &str,
        created_at: Timestamp,
    ) -> Result<InsertOutcome>;

    /// Atomically increments the click counter and returns the updated link.
    /// Returns `None` if the code does not exist.
    async fn increment_clicks(&self, code: &ShortCode) -> Result<Option<LinkRecord>>;
}
