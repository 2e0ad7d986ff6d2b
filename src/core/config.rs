

use serde::{Deserialize, Serialize};

use super::error::{MedragError, Result};
use crate::{DEFAULT_LLM_MODEL, DEFAULT_OLLAMA_URL};

const KNOWN_PROVIDERS: &[&str] = &["ollama", "openai"];


#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MedragConfig {
    
    pub rewrite_enabled: bool,
    pub rewrite_temperature: f64,
    pub rewrite_max_tokens: u32,

    
    pub answer_temperature: f64,
    pub answer_max_tokens: u32,

    
    pub top_k: usize,
    pub retrieval_cache_size: usize,
    pub retrieval_cache_ttl: u64,

    
    pub llm_provider: String,
    pub llm_model: String,
    pub llm_api_key: Option<String>,
    pub llm_base_url: Option<String>,
    pub timeout: u64,

    
    pub llm_fallback_enabled: bool,
    pub llm_fallback_url: String,
    pub llm_fallback_model: String,
}

impl MedragConfig {
    pub fn new() -> Self {
        Self {
            rewrite_enabled: true,
            rewrite_temperature: 0.1,
            rewrite_max_tokens: 128,

            answer_temperature: 0.3,
            answer_max_tokens: 150,

            top_k: 3,
            retrieval_cache_size: 256,
            retrieval_cache_ttl: 300,

            llm_provider: "ollama".to_string(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            llm_api_key: None,
            llm_base_url: None,
            timeout: 60,

            llm_fallback_enabled: true,
            llm_fallback_url: DEFAULT_OLLAMA_URL.to_string(),
            llm_fallback_model: DEFAULT_LLM_MODEL.to_string(),
        }
    }

    /// Layers defaults, an optional config file and `MEDRAG_*` variables.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&Self::new())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix("MEDRAG").try_parsing(true))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("rewrite_temperature", self.rewrite_temperature),
            ("answer_temperature", self.answer_temperature),
        ] {
            if !(0.0..=2.0).contains(&value) {
                return Err(MedragError::Config(format!(
                    "{name} must be within [0, 2], got {value}"
                )));
            }
        }
        if self.rewrite_max_tokens == 0 || self.answer_max_tokens == 0 {
            return Err(MedragError::Config("token budgets must be non-zero".to_string()));
        }
        if self.top_k == 0 {
            return Err(MedragError::Config("top_k must be non-zero".to_string()));
        }
        if !KNOWN_PROVIDERS.contains(&self.llm_provider.as_str()) {
            return Err(MedragError::Config(format!(
                "unknown llm_provider '{}', supported: {}",
                self.llm_provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }
        Ok(())
    }
}

impl Default for MedragConfig {
    fn default() -> Self {
        Self::new()
    }
}
