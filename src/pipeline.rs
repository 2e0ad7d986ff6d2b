//! The question-answering flow: rewrite, let the caller confirm or edit the
//! rewrite, retrieve, then stream an answer.

use std::sync::Arc;
use tracing::{debug, info};

use crate::answer::{AnswerGenerator, AnswerStream};
use crate::core::config::MedragConfig;
use crate::core::error::{MedragError, Result};
use crate::llm::factory::LlmProviderFactory;
use crate::retrieval::base::Retriever;
use crate::retrieval::cache::CachedRetriever;
use crate::retrieval::models::RetrievedDocument;
use crate::rewrite::models::RewriteOutcome;
use crate::rewrite::processor::QueryRewriter;
use crate::utils::safe_truncate;

pub struct MedicalQaPipeline {
    rewriter: QueryRewriter,
    retriever: Arc<dyn Retriever>,
    answerer: AnswerGenerator,
    top_k: usize,
}

impl MedicalQaPipeline {
    pub fn new(
        rewriter: QueryRewriter,
        retriever: Arc<dyn Retriever>,
        answerer: AnswerGenerator,
        top_k: usize,
    ) -> Self {
        Self {
            rewriter,
            retriever,
            answerer,
            top_k,
        }
    }

    /// Wires the configured LLM provider into both stages and puts a result
    /// cache in front of `retriever` unless `retrieval_cache_size` is 0.
    /// A provider that cannot be built leaves both stages without generation.
    pub fn from_config(config: &MedragConfig, retriever: Arc<dyn Retriever>) -> Result<Self> {
        config.validate()?;
        let llm = LlmProviderFactory::try_from_config(config);

        let retriever: Arc<dyn Retriever> = if config.retrieval_cache_size > 0 {
            Arc::new(CachedRetriever::new(
                retriever,
                config.retrieval_cache_size,
                config.retrieval_cache_ttl,
            ))
        } else {
            retriever
        };

        info!(
            "Pipeline ready: llm={}, retriever={}, top_k={}",
            llm.as_ref()
                .map(|p| format!("{} ({})", p.provider_name(), p.model_name()))
                .unwrap_or_else(|| "none".to_string()),
            retriever.name(),
            config.top_k
        );

        Ok(Self::new(
            QueryRewriter::from_config(config, llm.clone()),
            retriever,
            AnswerGenerator::from_config(config, llm),
            config.top_k,
        ))
    }

    pub async fn prepare(&self, raw_query: &str) -> RewriteOutcome {
        self.rewriter.rewrite_detailed(raw_query).await
    }

    pub async fn retrieve(&self, confirmed_query: &str) -> Result<Vec<RetrievedDocument>> {
        let query = confirmed_query.trim();
        if query.is_empty() {
            return Err(MedragError::Validation("query is empty".to_string()));
        }

        let documents = self.retriever.search(query, self.top_k).await?;
        debug!(
            "Retrieved {} documents for '{}'",
            documents.len(),
            safe_truncate(query, 60)
        );
        Ok(documents)
    }

    pub async fn answer(&self, confirmed_query: &str, documents: &[RetrievedDocument]) -> AnswerStream {
        self.answerer.stream(confirmed_query, documents).await
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }
}
