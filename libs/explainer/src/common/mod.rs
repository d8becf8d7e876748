mod types;
mod utils;

pub use types::{PipelineOutput, ProcessingMode};
pub use utils::{decode_base64, get_current_timestamp_str};
