use image::DynamicImage;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::types::{ExtractConfig, ExtractError};
use crate::image2text::{process_ocr, OcrEngine};
use crate::image_utils::{decode_image, load_image_from_bytes, preprocess};

fn recognize(image: DynamicImage, config: &ExtractConfig, engine: &dyn OcrEngine) -> Result<String, ExtractError> {
    let image = preprocess(image, &config.preprocess);

    log::info!("Performing OCR on the image");
    let text = process_ocr(engine, &image, &config.ocr_config).map_err(ExtractError::Ocr)?;

    if text.trim().is_empty() {
        return Err(ExtractError::NoText);
    }
    Ok(text)
}

pub fn extract_image_text(path: &Path, config: &ExtractConfig, engine: &dyn OcrEngine) -> Result<String, ExtractError> {
    log::info!("Opening image file: {}", path.display());

    let file = File::open(path).map_err(|e| ExtractError::from_io(path.to_path_buf(), e))?;
    if file
        .metadata()
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
    {
        return Err(ExtractError::ImageDecode(anyhow::anyhow!(
            "{} is a directory",
            path.display()
        )));
    }

    let image = decode_image(BufReader::new(file)).map_err(ExtractError::ImageDecode)?;
    recognize(image, config, engine)
}

pub fn extract_image_text_from_bytes(bytes: &[u8], config: &ExtractConfig, engine: &dyn OcrEngine) -> Result<String, ExtractError> {
    log::info!("Decoding {} bytes of image data", bytes.len());
    let image = load_image_from_bytes(bytes).map_err(ExtractError::ImageDecode)?;
    recognize(image, config, engine)
}

/// Returns `None` on any failure; the reason only goes to the log.
pub fn extract_text(path: &Path, config: &ExtractConfig, engine: &dyn OcrEngine) -> Option<String> {
    match extract_image_text(path, config, engine) {
        Ok(text) => Some(text),
        Err(e) => {
            log::error!("An error occurred while extracting text: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image2text::OcrConfig;
    use crate::image_utils::PreprocessConfig;
    use anyhow::Result;
    use image::{GrayImage, Luma};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Reports the mean brightness so tests can see which preprocessing ran.
    struct BrightnessEngine {
        calls: AtomicUsize,
        seen: Mutex<Vec<u8>>,
    }

    impl BrightnessEngine {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl OcrEngine for BrightnessEngine {
        fn name(&self) -> &str {
            "brightness"
        }

        fn recognize(&self, image: &DynamicImage, _config: &OcrConfig) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let pixel = image.to_luma8().get_pixel(0, 0)[0];
            self.seen.lock().unwrap().push(pixel);
            Ok(format!("pixel {}", pixel))
        }
    }

    struct FixedEngine(&'static str);

    impl OcrEngine for FixedEngine {
        fn name(&self) -> &str {
            "fixed"
        }

        fn recognize(&self, _image: &DynamicImage, _config: &OcrConfig) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingEngine;

    impl OcrEngine for FailingEngine {
        fn name(&self) -> &str {
            "failing"
        }

        fn recognize(&self, _image: &DynamicImage, _config: &OcrConfig) -> Result<String> {
            anyhow::bail!("engine exploded")
        }
    }

    fn write_png(dir: &tempfile::TempDir, name: &str, value: u8) -> std::path::PathBuf {
        let path = dir.path().join(name);
        GrayImage::from_pixel(8, 8, Luma([value])).save(&path).unwrap();
        path
    }

    #[test]
    fn test_missing_file_is_file_not_found() {
        let engine = BrightnessEngine::new();
        let err = extract_image_text(Path::new("/definitely/not/here.png"), &ExtractConfig::default(), &engine)
            .unwrap_err();
        assert!(matches!(err, ExtractError::FileNotFound(_)));
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_extract_text_returns_none_on_failure() {
        let engine = BrightnessEngine::new();
        assert!(extract_text(Path::new("/definitely/not/here.png"), &ExtractConfig::default(), &engine).is_none());
    }

    #[test]
    fn test_preprocess_inverts_before_ocr() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(&dir, "white.png", 250);
        let engine = BrightnessEngine::new();

        let config = ExtractConfig::new(OcrConfig::default(), PreprocessConfig::new(true, true));
        let text = extract_image_text(&path, &config, &engine).unwrap();
        assert_eq!(text, "pixel 5");

        let plain = extract_image_text(&path, &ExtractConfig::default(), &engine).unwrap();
        assert_eq!(plain, "pixel 250");
    }

    #[test]
    fn test_blank_text_is_no_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(&dir, "blank.png", 255);

        let err = extract_image_text(&path, &ExtractConfig::default(), &FixedEngine(" \n\u{c}")).unwrap_err();
        assert!(matches!(err, ExtractError::NoText));
    }

    #[test]
    fn test_ocr_failure_is_typed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(&dir, "img.png", 0);

        let err = extract_image_text(&path, &ExtractConfig::default(), &FailingEngine).unwrap_err();
        assert_eq!(err.reason(), "ocr-error");
    }

    #[test]
    fn test_not_an_image_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.png");
        std::fs::write(&path, b"plain text pretending to be a png").unwrap();

        let err = extract_image_text(&path, &ExtractConfig::default(), &FixedEngine("x")).unwrap_err();
        assert!(matches!(err, ExtractError::ImageDecode(_)));
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = extract_image_text(dir.path(), &ExtractConfig::default(), &FixedEngine("x")).unwrap_err();
        assert!(matches!(err, ExtractError::ImageDecode(_) | ExtractError::Io { .. }));
    }

    #[test]
    fn test_repeated_extraction_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(&dir, "same.png", 128);
        let engine = BrightnessEngine::new();
        let config = ExtractConfig::for_mode(crate::common::ProcessingMode::Explain);

        let first = extract_image_text(&path, &config, &engine).unwrap();
        let second = extract_image_text(&path, &config, &engine).unwrap();
        assert_eq!(first, second);
        assert_eq!(engine.calls.load(Ordering::SeqCst), 2);
    }
}
