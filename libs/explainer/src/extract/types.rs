use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::common::ProcessingMode;
use crate::image2text::OcrConfig;
use crate::image_utils::PreprocessConfig;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractConfig {
    pub ocr_config: OcrConfig,
    pub preprocess: PreprocessConfig,
}

impl ExtractConfig {
    pub fn new(ocr_config: OcrConfig, preprocess: PreprocessConfig) -> Self {
        Self {
            ocr_config,
            preprocess,
        }
    }

    pub fn for_mode(mode: ProcessingMode) -> Self {
        Self::new(OcrConfig::default(), PreprocessConfig::for_mode(mode))
    }
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("the file {} does not exist", .0.display())]
    FileNotFound(PathBuf),

    #[error("permission denied for the file {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image: {0}")]
    ImageDecode(#[source] anyhow::Error),

    #[error("OCR failed: {0}")]
    Ocr(#[source] anyhow::Error),

    #[error("no text found in the image")]
    NoText,
}

impl ExtractError {
    pub fn from_io(path: PathBuf, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => ExtractError::FileNotFound(path),
            std::io::ErrorKind::PermissionDenied => ExtractError::PermissionDenied(path),
            _ => ExtractError::Io { path, source },
        }
    }

    /// Stable machine-readable tag.
    pub fn reason(&self) -> &'static str {
        match self {
            ExtractError::FileNotFound(_) => "file-not-found",
            ExtractError::PermissionDenied(_) => "permission-denied",
            ExtractError::Io { .. } => "io-error",
            ExtractError::ImageDecode(_) => "image-decode-error",
            ExtractError::Ocr(_) => "ocr-error",
            ExtractError::NoText => "no-text",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_from_io_classifies_kind() {
        let path = PathBuf::from("/tmp/x.png");
        assert!(matches!(
            ExtractError::from_io(path.clone(), Error::from(ErrorKind::NotFound)),
            ExtractError::FileNotFound(_)
        ));
        assert!(matches!(
            ExtractError::from_io(path.clone(), Error::from(ErrorKind::PermissionDenied)),
            ExtractError::PermissionDenied(_)
        ));
        let other = ExtractError::from_io(path, Error::from(ErrorKind::Interrupted));
        assert_eq!(other.reason(), "io-error");
    }

    #[test]
    fn test_display_names_the_path() {
        let err = ExtractError::FileNotFound(PathBuf::from("missing.png"));
        assert_eq!(err.to_string(), "the file missing.png does not exist");
    }
}
