mod chat_completions;
mod hf_inference;
mod types;

pub use chat_completions::ChatCompletionsGenerator;
pub use hf_inference::HfInferenceGenerator;
pub use types::{GenerationParams, ModelBackend, ModelConfig};

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::common::ProcessingMode;

/// A pretrained sequence-to-sequence model: one prompt in, one string out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String>;
}

/// Builds the generator once at startup; callers share it behind the `Arc`.
pub fn create_generator(config: &ModelConfig, mode: ProcessingMode) -> Result<Arc<dyn TextGenerator>> {
    let model = config.model_for(mode);
    log::info!("Using {} backend with model {}", config.backend, model);

    let generator: Arc<dyn TextGenerator> = match config.backend {
        ModelBackend::HuggingFace => Arc::new(HfInferenceGenerator::new(
            config.url_for_backend(),
            model,
            config.api_key.clone(),
        )?),
        ModelBackend::ChatCompletions => Arc::new(ChatCompletionsGenerator::new(
            config.url_for_backend(),
            model,
            config.api_key.clone(),
        )?),
    };
    Ok(generator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_generator_per_backend() {
        let hf = create_generator(&ModelConfig::default(), ProcessingMode::Explain).unwrap();
        assert_eq!(hf.name(), "hugging-face");

        let config = ModelConfig::new(ModelBackend::ChatCompletions, None, None, Some("gpt-4o-mini".to_string()));
        let chat = create_generator(&config, ProcessingMode::Summarize).unwrap();
        assert_eq!(chat.name(), "chat-completions");
    }

    #[test]
    fn test_create_generator_rejects_bad_key() {
        let config = ModelConfig::new(ModelBackend::HuggingFace, None, Some("bad\nkey".to_string()), None);
        assert!(create_generator(&config, ProcessingMode::Explain).is_err());
    }
}
