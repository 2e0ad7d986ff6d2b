

pub mod base;
pub mod fallback;
pub mod ollama;
pub mod openai;
mod stream;

pub use base::{GenerationOptions, LlmMetadata, LlmProvider, LlmProviderError, TextStream};
pub use fallback::LlmProviderWithFallback;
pub use ollama::OllamaProvider;
pub use openai::OpenAiCompatibleProvider;
