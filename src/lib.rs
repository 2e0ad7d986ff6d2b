

pub mod answer;
pub mod core;
pub mod llm;
pub mod pipeline;
pub mod retrieval;
pub mod rewrite;
pub mod utils;

pub use utils::safe_truncate;


pub use answer::{AnswerGenerator, AnswerStream};
pub use core::config::MedragConfig;
pub use core::error::{MedragError, Result};
pub use llm::{LlmProvider, LlmProviderFactory};
pub use pipeline::MedicalQaPipeline;
pub use retrieval::{CachedRetriever, RetrievedDocument, Retriever};
pub use rewrite::{QueryRewriter, RewriteOutcome, normalize_query, validate_rewrite};


pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";


pub const DEFAULT_LLM_MODEL: &str = "qwen2.5:0.5b";
