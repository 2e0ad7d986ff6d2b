

pub mod factory;
pub mod providers;

pub use factory::LlmProviderFactory;
pub use providers::{
    GenerationOptions, LlmMetadata, LlmProvider, LlmProviderError, LlmProviderWithFallback,
    OllamaProvider, OpenAiCompatibleProvider, TextStream,
};
