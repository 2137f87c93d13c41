//! Core types and traits for the snip URL shortener.
//!
//! This crate provides the shared vocabulary used by the shortener,
//! redirector, storage and gateway crates: short codes, link records,
//! repository contracts and the error types that cross crate boundaries.

pub mod clock;
pub mod error;
pub mod repository;
pub mod shortcode;
pub mod shortener;
pub mod stats;

pub use clock::{Clock, SystemClock};
pub use error::{CoreError, ShortenerError, StorageError};
pub use repository::{InsertOutcome, LinkRecord, ReadRepository, Repository};
pub use shortcode::ShortCode;
pub use shortener::{ShortenedUrl, Shortener};
pub use stats::LinkStats;
