mod utils;

pub use utils::load_image_from_bytes;
pub use utils::decode_image;
pub use utils::preprocess;
pub use utils::PreprocessConfig;
