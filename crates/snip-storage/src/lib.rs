pub mod memory;
pub mod sqlite;

pub use memory::InMemoryRepository;
pub use sqlite::{SqliteRepository, SqliteSettings};
pub use snip_core::error::StorageError;
pub use snip_core::repository::{InsertOutcome, LinkRecord, ReadRepository, Repository};
