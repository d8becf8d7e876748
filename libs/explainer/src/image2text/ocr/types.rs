use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OcrConfig {
    pub lang: String,
    pub dpi: Option<u32>, // dots per inch
    pub psm: Option<u32>, // Page segmentation mode
    pub oem: Option<u32>, // OCR Engine Mode
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            lang: OcrConfig::get_default_lang(),
            dpi: None,
            psm: None,
            oem: None,
        }
    }
}

impl OcrConfig {
    pub fn new(lang: Option<String>, dpi: Option<u32>, psm: Option<u32>, oem: Option<u32>) -> Self {
        Self {
            lang: lang.unwrap_or_else(OcrConfig::get_default_lang),
            dpi,
            psm,
            oem,
        }
    }

    pub fn get_default_lang() -> String {
        "eng".to_string()
    }

    // Tesseract's own defaults: fully automatic segmentation, default engine.
    pub fn get_default_psm() -> u32 {
        3
    }

    pub fn get_default_oem() -> u32 {
        3
    }
}
