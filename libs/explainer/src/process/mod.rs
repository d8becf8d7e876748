mod chunk;
mod types;
mod utils;

pub use chunk::chunk_text;
pub use types::{ProcessError, ProcessorConfig, DEFAULT_CHUNK_SIZE, EXPLAIN_PROMPT_PREFIX};
pub use utils::{build_prompt, TextProcessor};
