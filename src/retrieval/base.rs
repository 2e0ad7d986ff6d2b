

use async_trait::async_trait;
use std::sync::Arc;

use super::models::RetrievedDocument;
use crate::core::error::Result;

/// Nearest-neighbour search over an externally maintained index.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Up to `top_k` documents, best first.
    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<RetrievedDocument>>;

    fn name(&self) -> &str;
}

#[async_trait]
impl Retriever for Arc<dyn Retriever> {
    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<RetrievedDocument>> {
        (**self).search(query, top_k).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
