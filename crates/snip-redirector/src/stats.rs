use std::sync::Arc;

use crate::Result;
use async_trait::async_trait;
use snip_core::{LinkStats, ReadRepository, ShortCode};
use tracing::trace;

#[async_trait]
pub trait StatsReader: Send + Sync + 'static {
    /// Returns the current stats of a link, or `None` for an unknown code.
    async fn get_stats(&self, code: &ShortCode) -> Result<Option<LinkStats>>;
}

/// Read-only stats projection over a repository. Never mutates a link.
#[derive(Debug)]
pub struct StatsService<R> {
    repository: Arc<R>,
}

impl<R: ReadRepository> StatsService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: ReadRepository> StatsReader for StatsService<R> {
    async fn get_stats(&self, code: &ShortCode) -> Result<Option<LinkStats>> {
        trace!(code = %code, "reading link stats");
        Ok(self.repository.get(code).await?.map(LinkStats::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RedirectorService;
    use jiff::Timestamp;
    use snip_core::Repository;
    use snip_storage::InMemoryRepository;

    fn code(s: &str) -> ShortCode {
        ShortCode::new_unchecked(s)
    }

    #[tokio::test]
    async fn stats_for_existing_code() {
        let repo = Arc::new(InMemoryRepository::new());
        let created_at: Timestamp = "2024-01-01T12:00:00Z".parse().unwrap();
        repo.insert_if_absent(&code("abc123"), "https://example.com", created_at)
            .await
            .unwrap();
        let stats = StatsService::new(repo);

        let got = stats.get_stats(&code("abc123")).await.unwrap().unwrap();

        assert_eq!(got.code.as_str(), "abc123");
        assert_eq!(got.url, "https://example.com");
        assert_eq!(got.clicks, 0);
        assert_eq!(got.created_at, created_at);
    }

    #[tokio::test]
    async fn repeated_reads_do_not_change_clicks() {
        let repo = Arc::new(InMemoryRepository::new());
        repo.insert_if_absent(&code("abc123"), "https://example.com", Timestamp::now())
            .await
            .unwrap();
        let stats = StatsService::new(repo);

        let first = stats.get_stats(&code("abc123")).await.unwrap().unwrap();
        let second = stats.get_stats(&code("abc123")).await.unwrap().unwrap();

        assert_eq!(first.clicks, second.clicks);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn stats_reflect_resolutions() {
        let repo = Arc::new(InMemoryRepository::new());
        repo.insert_if_absent(&code("abc123"), "https://example.com", Timestamp::now())
            .await
            .unwrap();
        let redirector = RedirectorService::new(Arc::clone(&repo));
        let stats = StatsService::new(repo);

        let before = stats.get_stats(&code("abc123")).await.unwrap().unwrap().clicks;
        for _ in 0..3 {
            redirector.resolve(&code("abc123")).await.unwrap();
        }
        let after = stats.get_stats(&code("abc123")).await.unwrap().unwrap().clicks;

        assert_eq!(after, before + 3);
    }

    #[tokio::test]
    async fn stats_for_unknown_code() {
        let repo = Arc::new(InMemoryRepository::new());
        let stats = StatsService::new(Arc::clone(&repo));

        assert!(stats.get_stats(&code("unknownCode")).await.unwrap().is_none());
        assert!(repo.is_empty());
    }
}
