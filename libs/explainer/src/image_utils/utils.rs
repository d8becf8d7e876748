use anyhow::Result;
use image::{DynamicImage, ImageReader};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Cursor, Seek};

use crate::common::ProcessingMode;

/// Contrast normalization applied before OCR.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreprocessConfig {
    pub grayscale: bool,
    pub invert: bool,
}

impl PreprocessConfig {
    pub fn new(grayscale: bool, invert: bool) -> Self {
        Self { grayscale, invert }
    }

    pub fn for_mode(mode: ProcessingMode) -> Self {
        match mode {
            ProcessingMode::Explain => Self::new(true, true),
            ProcessingMode::Summarize => Self::default(),
        }
    }
}

/// Decodes an image, guessing the format from its content rather than the file name.
pub fn decode_image<R: BufRead + Seek>(reader: R) -> Result<DynamicImage> {
    let image = ImageReader::new(reader)
        .with_guessed_format()?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image data: {}", e))?;
    Ok(image)
}

pub fn load_image_from_bytes(bytes: &[u8]) -> Result<DynamicImage> {
    decode_image(Cursor::new(bytes))
}

/// Grayscale first, then invert.
pub fn preprocess(image: DynamicImage, config: &PreprocessConfig) -> DynamicImage {
    let mut image = if config.grayscale {
        DynamicImage::ImageLuma8(image.to_luma8())
    } else {
        image
    };

    if config.invert {
        image.invert();
    }

    image
}
