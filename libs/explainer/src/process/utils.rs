use std::num::NonZeroUsize;
use std::sync::Arc;

use super::chunk::chunk_text;
use super::types::{ProcessError, ProcessorConfig, EXPLAIN_PROMPT_PREFIX};
use crate::common::ProcessingMode;
use crate::text2text::TextGenerator;

pub fn build_prompt(mode: ProcessingMode, chunk: &str) -> String {
    match mode {
        ProcessingMode::Explain => format!("{}{}", EXPLAIN_PROMPT_PREFIX, chunk),
        ProcessingMode::Summarize => chunk.to_string(),
    }
}

/// Runs the model over fixed-size chunks of a text and joins the results.
#[derive(Clone)]
pub struct TextProcessor {
    generator: Arc<dyn TextGenerator>,
    config: ProcessorConfig,
}

impl TextProcessor {
    pub fn new(generator: Arc<dyn TextGenerator>, config: ProcessorConfig) -> Self {
        Self { generator, config }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    pub async fn try_process(&self, text: &str) -> Result<String, ProcessError> {
        let chunk_size = NonZeroUsize::new(self.config.chunk_size).ok_or(ProcessError::InvalidChunkSize)?;
        let chunks = chunk_text(text, chunk_size);
        log::debug!(
            "Processing {} chars in {} chunk(s) with {}",
            text.chars().count(),
            chunks.len(),
            self.generator.name()
        );

        let mut outputs = Vec::with_capacity(chunks.len());
        for (chunk_index, chunk) in chunks.into_iter().enumerate() {
            let prompt = build_prompt(self.config.mode, chunk);
            let output = self
                .generator
                .generate(&prompt, &self.config.generation)
                .await
                .map_err(|source| ProcessError::Inference { chunk_index, source })?;
            outputs.push(output);
        }

        Ok(outputs.join("\n\n"))
    }

    /// Like [`TextProcessor::try_process`], but any failure becomes the mode's fallback text.
    pub async fn process(&self, text: &str) -> String {
        match self.try_process(text).await {
            Ok(output) => output,
            Err(e) => {
                log::error!("An error occurred while processing text ({}): {}", self.config.mode, e);
                self.config.mode.fallback_text().to_string()
            }
        }
    }
}
