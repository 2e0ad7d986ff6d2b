

use std::sync::Arc;
use tracing::warn;

use super::providers::base::LlmProvider;
use super::providers::fallback::LlmProviderWithFallback;
use super::providers::ollama::OllamaProvider;
use super::providers::openai::OpenAiCompatibleProvider;
use crate::core::config::MedragConfig;
use crate::core::error::{MedragError, Result};
use crate::DEFAULT_OLLAMA_URL;


pub struct LlmProviderFactory;

impl LlmProviderFactory {
    
    pub fn create(
        provider: &str,
        model: &str,
        api_key: Option<&str>,
        base_url: Option<&str>,
        temperature: f64,
        timeout_secs: u64,
    ) -> Result<Arc<dyn LlmProvider>> {
        match provider {
            "ollama" => Ok(Arc::new(OllamaProvider::new(
                base_url.unwrap_or(DEFAULT_OLLAMA_URL),
                model,
                temperature,
                timeout_secs,
            )?)),
            "openai" => {
                let base_url = base_url.ok_or_else(|| {
                    MedragError::Config("openai provider requires llm_base_url".to_string())
                })?;
                Ok(Arc::new(OpenAiCompatibleProvider::new(
                    base_url,
                    api_key.unwrap_or_default(),
                    model,
                    temperature,
                    timeout_secs,
                )?))
            }
            _ => Err(MedragError::Config(format!(
                "Unknown provider: {provider}. Supported: ollama, openai"
            ))),
        }
    }

    
    #[must_use]
    pub fn create_with_fallback(
        primary: Arc<dyn LlmProvider>,
        fallback_enabled: bool,
        fallback_url: Option<&str>,
        fallback_model: &str,
        fallback_temperature: f64,
    ) -> LlmProviderWithFallback {
        LlmProviderWithFallback::new(
            primary,
            fallback_enabled,
            fallback_url.map(String::from),
            Some(fallback_model.to_string()),
            fallback_temperature,
        )
    }

    /// Like [`Self::from_config`], but a provider that cannot be built means
    /// running without generation rather than failing.
    pub fn try_from_config(config: &MedragConfig) -> Option<Arc<dyn LlmProvider>> {
        match Self::from_config(config) {
            Ok(provider) => Some(provider),
            Err(e) => {
                warn!("No LLM provider ({}), continuing without generation", e);
                None
            }
        }
    }

    /// Primary provider from config, wrapped with the local fallback when enabled.
    pub fn from_config(config: &MedragConfig) -> Result<Arc<dyn LlmProvider>> {
        let primary = Self::create(
            &config.llm_provider,
            &config.llm_model,
            config.llm_api_key.as_deref(),
            config.llm_base_url.as_deref(),
            config.answer_temperature,
            config.timeout,
        )?;

        if !config.llm_fallback_enabled {
            return Ok(primary);
        }

        Ok(Arc::new(Self::create_with_fallback(
            primary,
            true,
            Some(&config.llm_fallback_url),
            &config.llm_fallback_model,
            config.answer_temperature,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_ollama_provider() {
        let provider = LlmProviderFactory::create("ollama", "qwen2.5:0.5b", None, None, 0.3, 5).unwrap();
        assert_eq!(provider.provider_name(), "ollama");
        assert_eq!(provider.model_name(), "qwen2.5:0.5b");
    }

    #[test]
    fn test_create_openai_requires_base_url() {
        let result = LlmProviderFactory::create("openai", "gpt-mini", Some("key"), None, 0.3, 5);
        assert!(matches!(result, Err(MedragError::Config(_))));

        let provider = LlmProviderFactory::create(
            "openai",
            "gpt-mini",
            Some("key"),
            Some("https://api.example.com"),
            0.3,
            5,
        )
        .unwrap();
        assert_eq!(provider.provider_name(), "openai");
    }

    #[test]
    fn test_unknown_provider_is_config_error() {
        let result = LlmProviderFactory::create("unknown", "model", None, None, 0.5, 5);
        assert!(matches!(result, Err(MedragError::Config(_))));
    }

    #[test]
    fn test_from_config_wraps_with_fallback() {
        let config = MedragConfig::default();
        let provider = LlmProviderFactory::from_config(&config).unwrap();
        assert_eq!(provider.provider_name(), "ollama");

        let mut config = MedragConfig::default();
        config.llm_fallback_enabled = false;
        let provider = LlmProviderFactory::from_config(&config).unwrap();
        assert_eq!(provider.model_name(), config.llm_model);
    }

    #[test]
    fn test_unbuildable_provider_degrades_to_none() {
        let mut config = MedragConfig::default();
        config.llm_provider = "openai".to_string();
        config.llm_base_url = None;
        assert!(config.validate().is_ok());
        assert!(LlmProviderFactory::from_config(&config).is_err());
        assert!(LlmProviderFactory::try_from_config(&config).is_none());
        assert!(LlmProviderFactory::try_from_config(&MedragConfig::default()).is_some());
    }
}
