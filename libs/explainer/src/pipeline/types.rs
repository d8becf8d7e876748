use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::common::ProcessingMode;
use crate::extract::{ExtractConfig, ExtractError};
use crate::process::ProcessorConfig;

pub const NO_TEXT_EXTRACTED: &str = "No text extracted from the image.";
pub const NO_FILE_SELECTED: &str = "No file selected.";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub extract: ExtractConfig,
    pub processor: ProcessorConfig,
    pub verify_extension: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::for_mode(ProcessingMode::default())
    }
}

impl PipelineConfig {
    pub fn new(extract: ExtractConfig, processor: ProcessorConfig, verify_extension: bool) -> Self {
        Self {
            extract,
            processor,
            verify_extension,
        }
    }

    pub fn for_mode(mode: ProcessingMode) -> Self {
        Self::new(ExtractConfig::for_mode(mode), ProcessorConfig::for_mode(mode), true)
    }

    pub fn mode(&self) -> ProcessingMode {
        self.processor.mode
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no file selected")]
    NoFileSelected,

    #[error("unsupported image format: {0:?}")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

impl PipelineError {
    /// Message shown to the user; the specific extraction cause stays in the log.
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::NoFileSelected => NO_FILE_SELECTED.to_string(),
            PipelineError::UnsupportedFormat(_) => {
                "Unsupported file type. Choose a .jpg, .jpeg, .png, .bmp or .tiff image.".to_string()
            }
            PipelineError::Extract(_) => NO_TEXT_EXTRACTED.to_string(),
        }
    }

    /// Warnings need no fix from the user beyond choosing a file.
    pub fn is_warning(&self) -> bool {
        matches!(self, PipelineError::NoFileSelected)
    }

    pub fn reason(&self) -> &'static str {
        match self {
            PipelineError::NoFileSelected => "no-file-selected",
            PipelineError::UnsupportedFormat(_) => "unsupported-format",
            PipelineError::Extract(e) => e.reason(),
        }
    }
}
