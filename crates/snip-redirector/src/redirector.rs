use crate::Result;
use async_trait::async_trait;
use snip_core::ShortCode;

#[async_trait]
pub trait Redirector: Send + Sync + 'static {
    /// Resolves a short code to its destination URL, counting the visit.
    /// Returns `None` if the code does not exist; nothing is mutated then.
    async fn resolve(&self, code: &ShortCode) -> Result<Option<String>>;
}
