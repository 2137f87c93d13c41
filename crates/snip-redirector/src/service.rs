use std::sync::Arc;

use crate::redirector::Redirector;
use async_trait::async_trait;
use snip_core::{Repository, ShortCode};
use tracing::{debug, trace};

/// Service for handling URL redirects.
///
/// The lookup and the click increment are one repository call
/// ([`Repository::increment_clicks`]), so every resolution reported to the
/// caller has already been counted.
#[derive(Debug)]
pub struct RedirectorService<R> {
    repository: Arc<R>,
}

impl<R> Clone for RedirectorService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: Repository> RedirectorService<R> {
    /// Creates a new RedirectorService over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Resolves a short code to its original URL.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(url))` - The stored URL, unmodified; the click is counted
    /// * `Ok(None)` - If the code doesn't exist
    /// * `Err(e)` - If there was an error accessing the repository
    pub async fn resolve(&self, code: &ShortCode) -> crate::Result<Option<String>> {
        Redirector::resolve(self, code).await
    }
}

#[async_trait]
impl<R: Repository> Redirector for RedirectorService<R> {
    async fn resolve(&self, code: &ShortCode) -> crate::Result<Option<String>> {
        trace!(code = %code, "resolving short code");

        match self.repository.increment_clicks(code).await? {
            Some(record) => {
                debug!(
                    code = %code,
                    url = %record.url,
                    clicks = record.clicks,
                    "resolved short code"
                );
                Ok(Some(record.url))
            }
            None => {
                trace!(code = %code, "short code not found");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;
    use snip_core::ReadRepository;
    use snip_storage::InMemoryRepository;

    fn code(s: &str) -> ShortCode {
        ShortCode::new_unchecked(s)
    }

    async fn setup_with_link(
        code: &ShortCode,
        url: &str,
    ) -> (RedirectorService<InMemoryRepository>, Arc<InMemoryRepository>) {
        let repo = Arc::new(InMemoryRepository::new());
        repo.insert_if_absent(code, url, Timestamp::now())
            .await
            .unwrap();
        (RedirectorService::new(Arc::clone(&repo)), repo)
    }

    #[tokio::test]
    async fn resolve_existing_code() {
        let c = code("abc123");
        let (service, repo) = setup_with_link(&c, "https://example.com/very/long").await;

        let url = service.resolve(&c).await.unwrap();

        assert_eq!(url.as_deref(), Some("https://example.com/very/long"));
        assert_eq!(repo.get(&c).await.unwrap().unwrap().clicks, 1);
    }

    #[tokio::test]
    async fn resolve_returns_url_unmodified() {
        let c = code("odd");
        let raw = "https://example.com/a b?q=ü#frag";
        let (service, _) = setup_with_link(&c, raw).await;

        assert_eq!(service.resolve(&c).await.unwrap().as_deref(), Some(raw));
    }

    #[tokio::test]
    async fn resolve_nonexistent_code() {
        let repo = Arc::new(InMemoryRepository::new());
        let service = RedirectorService::new(Arc::clone(&repo));

        let result = service.resolve(&code("unknownCode")).await.unwrap();

        assert!(result.is_none());
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn every_resolution_counts_once() {
        let c = code("counted");
        let (service, repo) = setup_with_link(&c, "https://example.com").await;

        for _ in 0..5 {
            service.resolve(&c).await.unwrap();
        }

        assert_eq!(repo.get(&c).await.unwrap().unwrap().clicks, 5);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_resolutions_are_all_counted() {
        let c = code("hot");
        let (service, repo) = setup_with_link(&c, "https://example.com").await;

        let mut handles = vec![];
        for _ in 0..64 {
            let service = service.clone();
            let c = c.clone();
            handles.push(tokio::spawn(async move {
                service.resolve(&c).await.unwrap().unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(repo.get(&c).await.unwrap().unwrap().clicks, 64);
    }
}
