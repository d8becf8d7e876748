mod types;
mod utils;

pub use types::{PipelineConfig, PipelineError, NO_FILE_SELECTED, NO_TEXT_EXTRACTED};
pub use utils::Pipeline;
