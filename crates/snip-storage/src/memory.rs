use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use jiff::Timestamp;
use snip_core::repository::{InsertOutcome, LinkRecord, ReadRepository, Repository, Result};
use snip_core::shortcode::ShortCode;

/// In-memory implementation of the Repository trait using DashMap.
///
/// DashMap provides better concurrency than RwLock<HashMap> because it
/// uses sharded locks, allowing concurrent reads and writes to different
/// buckets without blocking. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    storage: DashMap<String, LinkRecord>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get(&self, code: &ShortCode) -> Result<Option<LinkRecord>> {
        Ok(self
            .storage
            .get(code.as_str())
            .map(|entry| entry.value().clone()))
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert_if_absent(
        &self,
        code: &ShortCode,
        url: &str,
        created_at: Timestamp,
    ) -> Result<InsertOutcome> {
        // The entry guard holds the shard lock across the check and the write.
        match self.storage.entry(code.as_str().to_owned()) {
            Entry::Occupied(_) => Ok(InsertOutcome::AlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(LinkRecord::new(code.clone(), url, created_at));
                Ok(InsertOutcome::Inserted)
            }
        }
    }

    async fn increment_clicks(&self, code: &ShortCode) -> Result<Option<LinkRecord>> {
        let Some(mut entry) = self.storage.get_mut(code.as_str()) else {
            return Ok(None);
        };

        entry.clicks += 1;
        Ok(Some(entry.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn code(s: &str) -> ShortCode {
        ShortCode::new_unchecked(s)
    }

    fn created_at() -> Timestamp {
        "2024-01-01T12:00:00Z".parse().unwrap()
    }

    #[tokio::test]
    async fn insert_and_get() {
        let repo = InMemoryRepository::new();

        let outcome = repo
            .insert_if_absent(&code("abc123"), "https://example.com", created_at())
            .await
            .unwrap();
        assert_eq!(outcome, InsertOutcome::Inserted);

        let record = repo.get(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(record.code.as_str(), "abc123");
        assert_eq!(record.url, "https://example.com");
        assert_eq!(record.clicks, 0);
        assert_eq!(record.created_at, created_at());
    }

    #[tokio::test]
    async fn get_nonexistent() {
        let repo = InMemoryRepository::new();

        assert!(repo.get(&code("nope")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn insert_existing_code_keeps_original() {
        let repo = InMemoryRepository::new();

        repo.insert_if_absent(&code("abc123"), "https://one.example", created_at())
            .await
            .unwrap();
        let outcome = repo
            .insert_if_absent(&code("abc123"), "https://two.example", created_at())
            .await
            .unwrap();

        assert_eq!(outcome, InsertOutcome::AlreadyExists);
        let record = repo.get(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(record.url, "https://one.example");
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn increment_clicks_returns_updated_record() {
        let repo = InMemoryRepository::new();
        repo.insert_if_absent(&code("abc123"), "https://example.com", created_at())
            .await
            .unwrap();

        let first = repo.increment_clicks(&code("abc123")).await.unwrap().unwrap();
        let second = repo.increment_clicks(&code("abc123")).await.unwrap().unwrap();

        assert_eq!(first.clicks, 1);
        assert_eq!(second.clicks, 2);
        assert_eq!(second.url, "https://example.com");
    }

    #[tokio::test]
    async fn increment_nonexistent_does_not_create() {
        let repo = InMemoryRepository::new();

        assert!(repo.increment_clicks(&code("nope")).await.unwrap().is_none());
        assert!(repo.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_inserts_of_same_code_have_one_winner() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut handles = vec![];

        for i in 0..32u64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.insert_if_absent(
                    &code("contended"),
                    &format!("https://example{}.com", i),
                    created_at(),
                )
                .await
                .unwrap()
            }));
        }

        let mut inserted = 0;
        for handle in handles {
            if handle.await.unwrap() == InsertOutcome::Inserted {
                inserted += 1;
            }
        }

        assert_eq!(inserted, 1);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_increments_are_not_lost() {
        let repo = Arc::new(InMemoryRepository::new());
        repo.insert_if_absent(&code("hot"), "https://example.com", created_at())
            .await
            .unwrap();

        let mut handles = vec![];
        for _ in 0..100 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.increment_clicks(&code("hot")).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let record = repo.get(&code("hot")).await.unwrap().unwrap();
        assert_eq!(record.clicks, 100);
    }
}
