use serde::{Deserialize, Serialize};
use snip_core::ShortenedUrl;

#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub code: String,
    pub short_url: String,
}

impl From<ShortenedUrl> for ShortenResponse {
    fn from(shortened: ShortenedUrl) -> Self {
        Self {
            code: shortened.code.to_string(),
            short_url: shortened.short_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
