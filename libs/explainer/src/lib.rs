pub mod common;
pub mod extract;
pub mod image2text;
pub mod image_utils;
pub mod logger;
pub mod pipeline;
pub mod process;
pub mod text2text;
pub mod upload;
