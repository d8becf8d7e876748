use anyhow::Result;
use base64::{engine::general_purpose::STANDARD, Engine as _};

pub fn get_current_timestamp_str() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Decodes plain base64 or a `data:<mime>;base64,<payload>` URL.
pub fn decode_base64(data: &str) -> Result<Vec<u8>> {
    let payload = match data.split_once(',') {
        Some((header, payload)) if header.starts_with("data:") => payload,
        _ => data,
    };

    STANDARD
        .decode(payload.trim())
        .map_err(|e| anyhow::anyhow!("Failed to decode base64 data: {}", e))
}
