//! Resolution and stats services.
//!
//! [`RedirectorService`] resolves a short code to its destination and counts
//! the visit as part of the same store call. [`StatsService`] is the
//! read-only view used for reporting.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use snip_core::{Repository, ShortCode};
//! use snip_redirector::RedirectorService;
//! use snip_storage::InMemoryRepository;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repository = Arc::new(InMemoryRepository::new());
//! let code = ShortCode::new("abc123")?;
//! repository
//!     .insert_if_absent(&code, "https://example.com", jiff::Timestamp::now())
//!     .await?;
//!
//! let service = RedirectorService::new(repository);
//! if let Some(url) = service.resolve(&code).await? {
//!     println!("Redirect to: {}", url);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod redirector;
pub mod service;
pub mod stats;

pub use error::{RedirectorError, Result};
pub use redirector::Redirector;
pub use service::RedirectorService;
pub use stats::{StatsReader, StatsService};
