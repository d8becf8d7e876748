use anyhow::Result;
use image::DynamicImage;
use rusty_tesseract::{Args, Image};
use std::collections::HashMap;

use super::types::OcrConfig;
use super::OcrEngine;

/// OCR through the `tesseract` executable.
#[derive(Clone, Debug, Default)]
pub struct TesseractEngine;

impl TesseractEngine {
    pub fn new() -> Self {
        Self
    }

    fn args(config: &OcrConfig) -> Args {
        Args {
            lang: config.lang.clone(),
            config_variables: HashMap::new(),
            dpi: config.dpi.map(|dpi| dpi as i32),
            psm: Some(config.psm.unwrap_or(OcrConfig::get_default_psm()) as i32),
            oem: Some(config.oem.unwrap_or(OcrConfig::get_default_oem()) as i32),
        }
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn recognize(&self, image: &DynamicImage, config: &OcrConfig) -> Result<String> {
        let ocr_image = Image::from_dynamic_image(image)
            .map_err(|e| anyhow::anyhow!("Failed to hand image to tesseract: {}", e))?;

        let args = Self::args(config);
        rusty_tesseract::image_to_string(&ocr_image, &args)
            .map_err(|e| anyhow::anyhow!("Tesseract failed: {}", e))
    }
}
