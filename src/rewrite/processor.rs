

use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::keywords::extract_medical_keywords;
use super::models::{RejectionReason, RewriteDecision, RewriteOutcome, RewriteSource};
use super::normalizer::normalize_query;
use super::prompt::{build_rewrite_prompt, clean_candidate, SYSTEM_PROMPT};
use super::validator::validate_rewrite;
use crate::core::config::MedragConfig;
use crate::llm::providers::base::{GenerationOptions, LlmProvider};
use crate::utils::safe_truncate;

/// Turns a raw medical question into a retrieval query.
///
/// A model rewrite is used only when it passes every validator check. Every
/// other path, including provider errors and panics, ends in the rule-based
/// rewrite, so callers always get a non-empty query and never an error.
pub struct QueryRewriter {
    llm_provider: Option<Arc<dyn LlmProvider>>,
    enabled: bool,
    options: GenerationOptions,
}

impl QueryRewriter {
    pub fn new(
        llm_provider: Option<Arc<dyn LlmProvider>>,
        enabled: bool,
        max_tokens: u32,
        temperature: f64,
    ) -> Self {
        Self {
            llm_provider,
            enabled,
            options: GenerationOptions::new(max_tokens, temperature),
        }
    }

    
    pub fn rule_based() -> Self {
        Self {
            llm_provider: None,
            enabled: false,
            options: GenerationOptions::default(),
        }
    }

    pub fn from_config(config: &MedragConfig, llm_provider: Option<Arc<dyn LlmProvider>>) -> Self {
        Self::new(
            llm_provider,
            config.rewrite_enabled,
            config.rewrite_max_tokens,
            config.rewrite_temperature,
        )
    }

    pub fn is_generation_available(&self) -> bool {
        self.enabled && self.llm_provider.is_some()
    }

    
    pub async fn rewrite(&self, query: &str) -> String {
        self.rewrite_detailed(query).await.rewritten
    }

    pub async fn rewrite_detailed(&self, query: &str) -> RewriteOutcome {
        let (rewritten, source, rejection) = match self.attempt_model_rewrite(query).await {
            RewriteDecision::Accepted(rewritten) => {
                info!("Model rewrite accepted: '{}'", safe_truncate(&rewritten, 80));
                (rewritten, RewriteSource::Model, None)
            }
            RewriteDecision::Rejected(reason) => {
                match &reason {
                    RejectionReason::GenerationUnavailable => {
                        debug!("No generative rewrite available, using rules");
                    }
                    other => warn!("Model rewrite rejected ({}), using rules", other.detail()),
                }
                (normalize_query(query), RewriteSource::RuleFallback, Some(reason))
            }
        };

        debug_assert!(!rewritten.is_empty(), "rewrite must never be empty");
        let keywords = extract_medical_keywords(&rewritten);

        RewriteOutcome {
            original: query.to_string(),
            rewritten,
            source,
            rejection,
            keywords,
        }
    }

    async fn attempt_model_rewrite(&self, query: &str) -> RewriteDecision {
        let llm = match &self.llm_provider {
            Some(llm) if self.enabled => llm,
            _ => return RewriteDecision::Rejected(RejectionReason::GenerationUnavailable),
        };

        let prompt = build_rewrite_prompt(query);
        debug!("Requesting rewrite from {} ({})", llm.provider_name(), llm.model_name());

        let generation = AssertUnwindSafe(llm.generate(SYSTEM_PROMPT, &prompt, &self.options))
            .catch_unwind()
            .await;

        let raw = match generation {
            Ok(Ok((raw, _metadata))) => raw,
            Ok(Err(e)) => {
                return RewriteDecision::Rejected(RejectionReason::GenerationFailure {
                    message: e.to_string(),
                });
            }
            Err(_) => {
                return RewriteDecision::Rejected(RejectionReason::GenerationFailure {
                    message: "provider panicked".to_string(),
                });
            }
        };

        let candidate = clean_candidate(&raw);
        debug!("Rewrite candidate: '{}'", safe_truncate(&candidate, 80));
        validate_rewrite(query, &candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::providers::base::{LlmMetadata, LlmProviderError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const NASAL_QUERY: &str = "鼻子堵了，该吃什么药？";

    enum Behavior {
        Reply(&'static str),
        Fail,
        Panic,
    }

    struct ScriptedProvider {
        behavior: Behavior,
        calls: AtomicUsize,
    }

    impl ScriptedProvider {
        fn arc(behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                behavior,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        async fn generate(
            &self,
            _system_prompt: &str,
            user_prompt: &str,
            options: &GenerationOptions,
        ) -> Result<(String, LlmMetadata), LlmProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert!(user_prompt.contains("优化："));
            assert_eq!(options.max_tokens, Some(128));
            match self.behavior {
                Behavior::Reply(text) => Ok((text.to_string(), LlmMetadata::default())),
                Behavior::Fail => Err(LlmProviderError::Provider("out of memory".to_string())),
                Behavior::Panic => panic!("tokenizer exploded"),
            }
        }

        fn provider_name(&self) -> &str {
            "scripted"
        }

        fn model_name(&self) -> &str {
            "scripted-1"
        }
    }

    fn rewriter(provider: Arc<ScriptedProvider>) -> QueryRewriter {
        QueryRewriter::new(Some(provider), true, 128, 0.1)
    }

    #[tokio::test]
    async fn test_accepted_model_rewrite() {
        let provider = ScriptedProvider::arc(Behavior::Reply("优化：鼻塞 药物治疗\n解释：保留了用药"));
        let outcome = rewriter(provider.clone()).rewrite_detailed(NASAL_QUERY).await;
        assert_eq!(outcome.rewritten, "鼻塞 药物治疗");
        assert_eq!(outcome.source, RewriteSource::Model);
        assert!(outcome.rejection.is_none());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concept_loss_falls_back_to_rules() {
        let provider = ScriptedProvider::arc(Behavior::Reply("鼻塞"));
        let outcome = rewriter(provider).rewrite_detailed(NASAL_QUERY).await;
        assert_eq!(outcome.rewritten, "药物治疗 鼻塞");
        assert_eq!(outcome.source, RewriteSource::RuleFallback);
        assert!(matches!(outcome.rejection, Some(RejectionReason::ConceptLoss { .. })));
    }

    #[tokio::test]
    async fn test_provider_error_falls_back() {
        let outcome = rewriter(ScriptedProvider::arc(Behavior::Fail))
            .rewrite_detailed(NASAL_QUERY)
            .await;
        assert_eq!(outcome.rewritten, "药物治疗 鼻塞");
        assert!(matches!(
            outcome.rejection,
            Some(RejectionReason::GenerationFailure { ref message }) if message.contains("out of memory")
        ));
    }

    #[tokio::test]
    async fn test_provider_panic_falls_back() {
        let outcome = rewriter(ScriptedProvider::arc(Behavior::Panic)).rewrite("头疼怎么办").await;
        assert_eq!(outcome, "治疗 头痛");
    }

    #[tokio::test]
    async fn test_disabled_rewriting_skips_provider() {
        let provider = ScriptedProvider::arc(Behavior::Reply("鼻塞 药物治疗"));
        let rewriter = QueryRewriter::new(Some(provider.clone()), false, 128, 0.1);
        assert!(!rewriter.is_generation_available());
        let outcome = rewriter.rewrite_detailed(NASAL_QUERY).await;
        assert_eq!(outcome.rejection, Some(RejectionReason::GenerationUnavailable));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unbuildable_provider_still_rewrites() {
        let mut config = MedragConfig::default();
        config.llm_provider = "openai".to_string();
        let provider = crate::llm::factory::LlmProviderFactory::try_from_config(&config);
        let rewriter = QueryRewriter::from_config(&config, provider);
        assert!(!rewriter.is_generation_available());
        let outcome = rewriter.rewrite_detailed(NASAL_QUERY).await;
        assert_eq!(outcome.rewritten, "药物治疗 鼻塞");
        assert_eq!(outcome.rejection, Some(RejectionReason::GenerationUnavailable));
    }

    #[tokio::test]
    async fn test_rule_based_cold_scenario() {
        let outcome = QueryRewriter::rule_based()
            .rewrite_detailed("我感冒了，流鼻涕，鼻子不通气，应该吃什么药？")
            .await;
        assert_eq!(outcome.rewritten, "鼻塞 药物治疗 鼻溢 上呼吸道感染 诊断");
        assert_eq!(outcome.keywords, vec!["上呼吸道感染", "诊断"]);
        assert_eq!(outcome.source, RewriteSource::RuleFallback);
    }

    #[tokio::test]
    async fn test_never_empty_for_any_provider_behavior() {
        let queries = ["", " ", "？？", NASAL_QUERY, "视力模糊", "DNA"];
        let behaviors: [fn() -> Behavior; 6] = [
            || Behavior::Reply(""),
            || Behavior::Reply("\n\n"),
            || Behavior::Reply("医生建议"),
            || Behavior::Reply("鼻塞 药物治疗"),
            || Behavior::Fail,
            || Behavior::Panic,
        ];
        for query in queries {
            assert!(!QueryRewriter::rule_based().rewrite(query).await.is_empty());
            for make in behaviors {
                let rewritten = rewriter(ScriptedProvider::arc(make())).rewrite(query).await;
                assert!(!rewritten.is_empty(), "empty rewrite for {query:?}");
            }
        }
    }
}
