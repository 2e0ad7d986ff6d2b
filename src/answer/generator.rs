

use futures::stream::{self, BoxStream, StreamExt};
use std::sync::Arc;
use tracing::{debug, warn};

use super::context::{build_answer_prompt, build_context, ANSWER_SYSTEM_PROMPT, MIN_CONTEXT_CHARS};
use crate::core::config::MedragConfig;
use crate::llm::providers::base::{GenerationOptions, LlmProvider, TextStream};
use crate::retrieval::models::RetrievedDocument;
use crate::utils::char_len;

pub const NO_DOCUMENTS_NOTICE: &str = "⚠️ 未找到相关文献来回答您的问题。";
pub const NO_GENERATOR_NOTICE: &str = "❌ 生成组件未加载。";
pub const SHORT_CONTEXT_NOTICE: &str =
    "⚠️ 检索到的文档内容过短，无法生成有效答案。请尝试更具体的问题。";
pub const RETRY_HINT: &str = "\n💡 建议：请检查模型状态或重新启动应用。";

/// Answer text as it is produced. Errors are already rendered as text.
pub type AnswerStream = BoxStream<'static, String>;

pub struct AnswerGenerator {
    llm: Option<Arc<dyn LlmProvider>>,
    options: GenerationOptions,
}

impl AnswerGenerator {
    pub fn new(llm: Option<Arc<dyn LlmProvider>>, max_tokens: u32, temperature: f64) -> Self {
        Self {
            llm,
            options: GenerationOptions::new(max_tokens, temperature),
        }
    }

    pub fn from_config(config: &MedragConfig, llm: Option<Arc<dyn LlmProvider>>) -> Self {
        Self::new(llm, config.answer_max_tokens, config.answer_temperature)
    }

    pub async fn stream(&self, query: &str, documents: &[RetrievedDocument]) -> AnswerStream {
        if documents.is_empty() {
            return notice(NO_DOCUMENTS_NOTICE);
        }

        let Some(llm) = &self.llm else {
            return notice(NO_GENERATOR_NOTICE);
        };

        let context = build_context(documents);
        if char_len(context.trim()) < MIN_CONTEXT_CHARS {
            debug!("Context too short ({} chars) for an answer", char_len(context.trim()));
            return notice(SHORT_CONTEXT_NOTICE);
        }

        let prompt = build_answer_prompt(&context, query);
        match llm.generate_stream(ANSWER_SYSTEM_PROMPT, &prompt, &self.options).await {
            Ok(fragments) => render_fragments(fragments),
            Err(e) => {
                warn!("Answer generation failed to start: {}", e);
                stream::iter(vec![format!("生成错误: {e}"), RETRY_HINT.to_string()]).boxed()
            }
        }
    }

    /// Whole answer as one string.
    pub async fn answer(&self, query: &str, documents: &[RetrievedDocument]) -> String {
        self.stream(query, documents).await.collect::<Vec<_>>().await.concat()
    }
}

fn notice(text: &str) -> AnswerStream {
    stream::once(futures::future::ready(text.to_string())).boxed()
}

/// Drops blank fragments; the first provider error ends the answer with a hint.
fn render_fragments(fragments: TextStream) -> AnswerStream {
    stream::unfold(Some(fragments), |state| async move {
        let mut fragments = state?;
        loop {
            match fragments.next().await {
                Some(Ok(fragment)) if fragment.trim().is_empty() => continue,
                Some(Ok(fragment)) => return Some((vec![fragment], Some(fragments))),
                Some(Err(e)) => {
                    warn!("Answer stream interrupted: {}", e);
                    return Some((vec![format!("生成错误: {e}"), RETRY_HINT.to_string()], None));
                }
                None => return None,
            }
        }
    })
    .flat_map(stream::iter)
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::providers::base::{LlmMetadata, LlmProviderError};
    use async_trait::async_trait;

    struct FragmentProvider {
        fragments: Vec<Result<&'static str, &'static str>>,
    }

    #[async_trait]
    impl LlmProvider for FragmentProvider {
        async fn generate(
            &self,
            _system_prompt: &str,
            _user_prompt: &str,
            _options: &GenerationOptions,
        ) -> Result<(String, LlmMetadata), LlmProviderError> {
            Err(LlmProviderError::Internal("streaming only".to_string()))
        }

        async fn generate_stream(
            &self,
            _system_prompt: &str,
            user_prompt: &str,
            options: &GenerationOptions,
        ) -> Result<TextStream, LlmProviderError> {
            assert!(user_prompt.contains("用户问题：鼻塞 药物治疗"));
            assert_eq!(options.max_tokens, Some(150));
            let items: Vec<Result<String, LlmProviderError>> = self
                .fragments
                .iter()
                .map(|f| match f {
                    Ok(text) => Ok(text.to_string()),
                    Err(msg) => Err(LlmProviderError::Stream(msg.to_string())),
                })
                .collect();
            Ok(stream::iter(items).boxed())
        }

        fn provider_name(&self) -> &str {
            "fragments"
        }

        fn model_name(&self) -> &str {
            "fragments-1"
        }
    }

    fn documents() -> Vec<RetrievedDocument> {
        vec![
            RetrievedDocument::new("pmid-1", 0.82)
                .with_title("急性鼻炎的药物治疗")
                .with_content("急性鼻炎常表现为鼻塞和鼻溢。".repeat(10)),
        ]
    }

    fn generator(fragments: Vec<Result<&'static str, &'static str>>) -> AnswerGenerator {
        AnswerGenerator::new(Some(Arc::new(FragmentProvider { fragments })), 150, 0.3)
    }

    #[tokio::test]
    async fn test_streams_fragments_skipping_blanks() {
        let generator = generator(vec![Ok("可使用"), Ok("  "), Ok("减充血剂"), Ok("。")]);
        let fragments: Vec<String> = generator
            .stream("鼻塞 药物治疗", &documents())
            .await
            .collect()
            .await;
        assert_eq!(fragments, vec!["可使用", "减充血剂", "。"]);
    }

    #[tokio::test]
    async fn test_mid_stream_error_ends_with_hint() {
        let generator = generator(vec![Ok("可使用"), Err("connection reset"), Ok("不会出现")]);
        let answer = generator.answer("鼻塞 药物治疗", &documents()).await;
        assert!(answer.starts_with("可使用生成错误: Stream error: connection reset"));
        assert!(answer.ends_with(RETRY_HINT));
        assert!(!answer.contains("不会出现"));
    }

    #[tokio::test]
    async fn test_notices() {
        let generator = generator(vec![Ok("x")]);
        assert_eq!(generator.answer("鼻塞", &[]).await, NO_DOCUMENTS_NOTICE);

        let short = vec![RetrievedDocument::new("p", 0.5).with_content("太短")];
        assert_eq!(generator.answer("鼻塞", &short).await, SHORT_CONTEXT_NOTICE);

        let unloaded = AnswerGenerator::new(None, 150, 0.3);
        assert_eq!(unloaded.answer("鼻塞", &documents()).await, NO_GENERATOR_NOTICE);
    }
}
