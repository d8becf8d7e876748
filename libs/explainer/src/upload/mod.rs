use std::path::Path;

use crate::pipeline::PipelineError;

/// Extensions offered by the file picker.
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "bmp", "tiff", "tif"];

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(std::ffi::OsStr::to_str)
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

pub fn verify_upload_path(path: &Path) -> Result<(), PipelineError> {
    if is_supported_image(path) {
        Ok(())
    } else {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        Err(PipelineError::UnsupportedFormat(extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions() {
        for name in ["a.jpg", "a.JPEG", "b.png", "c.bmp", "d.tiff", "e.TIF"] {
            assert!(is_supported_image(Path::new(name)), "{}", name);
        }
    }

    #[test]
    fn test_unsupported_extensions() {
        for name in ["a.gif", "b.mp4", "noext", "c.png.txt"] {
            assert!(!is_supported_image(Path::new(name)), "{}", name);
        }
        assert!(matches!(
            verify_upload_path(Path::new("clip.mp4")),
            Err(PipelineError::UnsupportedFormat(ext)) if ext == "mp4"
        ));
    }
}
