use crate::repository::LinkRecord;
use crate::shortcode::ShortCode;
use jiff::Timestamp;
use serde::Serialize;

/// Read-only projection of a link, as reported by the stats endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkStats {
    pub code: ShortCode,
    pub url: String,
    pub clicks: u64,
    /// Serialized as ISO-8601 UTC, e.g. `2024-01-01T12:00:00Z`.
    pub created_at: Timestamp,
}

impl From<LinkRecord> for LinkStats {
    fn from(record: LinkRecord) -> Self {
        Self {
            code: record.code,
            url: record.url,
            clicks: record.clicks,
            created_at: record.created_at,
        }
    }
}
