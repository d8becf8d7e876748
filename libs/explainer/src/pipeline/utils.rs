use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use super::types::{PipelineConfig, PipelineError};
use crate::common::{get_current_timestamp_str, PipelineOutput};
use crate::extract::{extract_image_text, extract_image_text_from_bytes, ExtractError};
use crate::image2text::OcrEngine;
use crate::process::TextProcessor;
use crate::text2text::TextGenerator;
use crate::upload::verify_upload_path;

/// Extraction followed by generation, with both collaborators fixed at construction.
pub struct Pipeline {
    config: PipelineConfig,
    ocr_engine: Arc<dyn OcrEngine>,
    processor: TextProcessor,
}

impl Pipeline {
    pub fn new(config: PipelineConfig, ocr_engine: Arc<dyn OcrEngine>, generator: Arc<dyn TextGenerator>) -> Self {
        let processor = TextProcessor::new(generator, config.processor.clone());
        Self {
            config,
            ocr_engine,
            processor,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Entry point for a file chooser that may come back empty.
    pub async fn run_selected(&self, selection: Option<&Path>) -> Result<PipelineOutput, PipelineError> {
        match selection {
            Some(path) => self.run(path).await,
            None => {
                log::warn!("No file selected");
                Err(PipelineError::NoFileSelected)
            }
        }
    }

    pub async fn run(&self, path: &Path) -> Result<PipelineOutput, PipelineError> {
        if self.config.verify_extension {
            verify_upload_path(path)?;
        }

        let start = Instant::now();
        log::info!("Processing started: {}", path.display());

        let owned_path: PathBuf = path.to_path_buf();
        let config = self.config.extract.clone();
        let engine = self.ocr_engine.clone();
        let extracted = tokio::task::spawn_blocking(move || extract_image_text(&owned_path, &config, engine.as_ref()))
            .await
            .map_err(|e| ExtractError::Ocr(anyhow::anyhow!("OCR task failed: {}", e)))
            .and_then(|res| res);

        let result = self
            .finish(extracted, Some(path.display().to_string()))
            .await;
        log::info!("Processing finished in {:?}", start.elapsed());
        result
    }

    /// Same flow for an encoded image held in memory.
    pub async fn run_bytes(&self, bytes: Vec<u8>) -> Result<PipelineOutput, PipelineError> {
        let start = Instant::now();
        log::info!("Processing started: {} uploaded bytes", bytes.len());

        let config = self.config.extract.clone();
        let engine = self.ocr_engine.clone();
        let extracted = tokio::task::spawn_blocking(move || extract_image_text_from_bytes(&bytes, &config, engine.as_ref()))
            .await
            .map_err(|e| ExtractError::Ocr(anyhow::anyhow!("OCR task failed: {}", e)))
            .and_then(|res| res);

        let result = self.finish(extracted, None).await;
        log::info!("Processing finished in {:?}", start.elapsed());
        result
    }

    async fn finish(
        &self,
        extracted: Result<String, ExtractError>,
        image_path: Option<String>,
    ) -> Result<PipelineOutput, PipelineError> {
        let text = match extracted {
            Ok(text) => text,
            Err(e) => {
                log::error!("An error occurred while extracting text: {}", e);
                return Err(e.into());
            }
        };
        log::debug!("Extracted Text: {}", text);

        let output = self.processor.process(&text).await;
        log::debug!("{}: {}", self.config.mode().output_label(), output);

        Ok(PipelineOutput::new(
            get_current_timestamp_str(),
            image_path,
            self.config.mode(),
            text,
            output,
        ))
    }
}
