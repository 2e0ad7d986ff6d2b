

pub mod base;
pub mod cache;
pub mod models;

pub use base::Retriever;
pub use cache::{CacheStats, CachedRetriever};
pub use models::RetrievedDocument;
