use serde::{Deserialize, Serialize};

use crate::common::ProcessingMode;

pub const DEFAULT_HF_URL: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_CHAT_URL: &str = "https://api.openai.com/v1";

pub const DEFAULT_EXPLAIN_MODEL: &str = "google/flan-t5-large";
pub const DEFAULT_SUMMARIZE_MODEL: &str = "sshleifer/distilbart-cnn-12-6";

/// Output bounds and decoding strategy for a single model call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub max_length: u32,
    pub min_length: u32,
    pub do_sample: bool,
}

impl GenerationParams {
    pub fn new(max_length: u32, min_length: u32, do_sample: bool) -> Self {
        Self {
            max_length,
            min_length,
            do_sample,
        }
    }

    pub fn for_mode(mode: ProcessingMode) -> Self {
        match mode {
            ProcessingMode::Explain => Self::new(200, 50, false),
            ProcessingMode::Summarize => Self::new(130, 30, false),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelBackend {
    #[default]
    HuggingFace,
    ChatCompletions,
}

impl std::fmt::Display for ModelBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelBackend::HuggingFace => write!(f, "hugging-face"),
            ModelBackend::ChatCompletions => write!(f, "chat-completions"),
        }
    }
}

impl From<&str> for ModelBackend {
    fn from(s: &str) -> Self {
        match s.to_lowercase().replace('_', "-").as_str() {
            "chat-completions" | "chat" | "openai" => ModelBackend::ChatCompletions,
            _ => ModelBackend::HuggingFace,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ModelConfig {
    pub backend: ModelBackend,
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
}

impl ModelConfig {
    pub fn new(backend: ModelBackend, url: Option<String>, api_key: Option<String>, model: Option<String>) -> Self {
        Self {
            backend,
            url,
            api_key,
            model,
        }
    }

    pub fn api_key_env_var(&self) -> &'static str {
        match self.backend {
            ModelBackend::HuggingFace => "HF_API_TOKEN",
            ModelBackend::ChatCompletions => "OPENAI_API_KEY",
        }
    }

    /// Fills a missing API key from the backend's environment variable.
    pub fn with_env_api_key(mut self) -> Self {
        if self.api_key.is_none() {
            self.api_key = std::env::var(self.api_key_env_var())
                .ok()
                .filter(|key| !key.trim().is_empty());
        }
        self
    }

    pub fn url_for_backend(&self) -> String {
        let default = match self.backend {
            ModelBackend::HuggingFace => DEFAULT_HF_URL,
            ModelBackend::ChatCompletions => DEFAULT_CHAT_URL,
        };
        self.url
            .as_deref()
            .unwrap_or(default)
            .trim_end_matches('/')
            .to_string()
    }

    pub fn model_for(&self, mode: ProcessingMode) -> String {
        if let Some(model) = &self.model {
            return model.clone();
        }
        match mode {
            ProcessingMode::Explain => DEFAULT_EXPLAIN_MODEL.to_string(),
            ProcessingMode::Summarize => DEFAULT_SUMMARIZE_MODEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_bounds_per_mode() {
        assert_eq!(GenerationParams::for_mode(ProcessingMode::Explain), GenerationParams::new(200, 50, false));
        assert_eq!(GenerationParams::for_mode(ProcessingMode::Summarize), GenerationParams::new(130, 30, false));
    }

    #[test]
    fn test_model_defaults() {
        let config = ModelConfig::default();
        assert_eq!(config.model_for(ProcessingMode::Explain), DEFAULT_EXPLAIN_MODEL);
        assert_eq!(config.model_for(ProcessingMode::Summarize), DEFAULT_SUMMARIZE_MODEL);
        assert_eq!(config.url_for_backend(), DEFAULT_HF_URL);
    }

    #[test]
    fn test_url_trailing_slash_is_trimmed() {
        let config = ModelConfig::new(ModelBackend::ChatCompletions, Some("http://localhost:8080/v1/".to_string()), None, None);
        assert_eq!(config.url_for_backend(), "http://localhost:8080/v1");
    }

    #[test]
    fn test_explicit_api_key_wins_over_env() {
        let config = ModelConfig::new(ModelBackend::HuggingFace, None, Some("explicit".to_string()), None)
            .with_env_api_key();
        assert_eq!(config.api_key.as_deref(), Some("explicit"));
        assert_eq!(config.api_key_env_var(), "HF_API_TOKEN");
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!(ModelBackend::from("chat_completions"), ModelBackend::ChatCompletions);
        assert_eq!(ModelBackend::from("hugging-face"), ModelBackend::HuggingFace);
    }
}
