use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::common::ProcessingMode;
use crate::text2text::GenerationParams;

pub const DEFAULT_CHUNK_SIZE: usize = 1000;
pub const EXPLAIN_PROMPT_PREFIX: &str = "Please provide a detailed and clear explanation of the following text:\n\n";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProcessorConfig {
    pub mode: ProcessingMode,
    pub chunk_size: usize,
    pub generation: GenerationParams,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self::for_mode(ProcessingMode::default())
    }
}

impl ProcessorConfig {
    pub fn new(mode: ProcessingMode, chunk_size: usize, generation: GenerationParams) -> Self {
        Self {
            mode,
            chunk_size,
            generation,
        }
    }

    pub fn for_mode(mode: ProcessingMode) -> Self {
        Self::new(mode, DEFAULT_CHUNK_SIZE, GenerationParams::for_mode(mode))
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }
}

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("chunk size must be greater than zero")]
    InvalidChunkSize,

    #[error("inference failed on chunk {chunk_index}: {source}")]
    Inference {
        chunk_index: usize,
        #[source]
        source: anyhow::Error,
    },
}
