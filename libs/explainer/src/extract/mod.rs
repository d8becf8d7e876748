mod types;
mod utils;

pub use types::{ExtractConfig, ExtractError};
pub use utils::{extract_image_text, extract_image_text_from_bytes, extract_text};
