//! URL shortener service implementation.
//!
//! This crate turns a raw URL into a stored link: it validates the input,
//! draws candidate codes from a [`Generator`](snip_generator::Generator) and
//! retries on collision until the repository accepts one. Core types are
//! re-exported from `snip_core`.

pub mod service;

pub use service::{ShortenerService, ShortenerSettings, DEFAULT_MAX_ATTEMPTS};
pub use snip_core::{ShortenedUrl, Shortener, ShortenerError};
