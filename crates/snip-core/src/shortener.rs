use crate::shortcode::ShortCode;
use async_trait::async_trait;
use serde::Serialize;

type Result<T> = std::result::Result<T, crate::error::ShortenerError>;

/// A newly allocated short code together with its public URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortenedUrl {
    pub code: ShortCode,
    pub short_url: String,
}

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Creates a shortened URL for `raw_url` and returns the allocated code.
    ///
    /// Fails with `InvalidUrl` when the input is empty or lacks an
    /// `http://`/`https://` prefix, and with `Exhausted` when no free code
    /// could be found within the configured attempt budget.
    async fn shorten(&self, raw_url: &str) -> Result<ShortenedUrl>;
}
