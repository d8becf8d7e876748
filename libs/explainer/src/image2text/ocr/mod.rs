mod ocr_tesseract;
pub use ocr_tesseract::TesseractEngine;

mod types;
pub use types::OcrConfig;

use anyhow::Result;
use image::DynamicImage;

/// Turns a loaded image into plain text.
pub trait OcrEngine: Send + Sync {
    fn name(&self) -> &str;

    fn recognize(&self, image: &DynamicImage, config: &OcrConfig) -> Result<String>;
}

pub fn process_ocr(engine: &dyn OcrEngine, img: &DynamicImage, config: &OcrConfig) -> Result<String> {
    log::debug!(
        "Running OCR with {} on {}x{} image",
        engine.name(),
        img.width(),
        img.height()
    );
    engine.recognize(img, config)
}
