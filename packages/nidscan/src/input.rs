//! Converts uploaded image payloads into recognizer input.
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use nidscan_ocr::OcrInput;

use crate::error::InputError;

/// Decodes a base64 image, accepting either the bare payload or a
/// `data:<mime>;base64,<payload>` URL as produced by browser file readers.
/// Whitespace inside the payload (line-wrapped base64) is ignored.
pub fn decode_base64_image(encoded: &str) -> Result<OcrInput, InputError> {
    let encoded = encoded.trim();
    let payload = match encoded.strip_prefix("data:") {
        Some(rest) => {
            let (meta, payload) = rest
                .split_once(',')
                .ok_or_else(|| InputError::DataUrl("missing ',' separator".into()))?;
            if !meta.ends_with(";base64") {
                return Err(InputError::DataUrl(format!("not base64 encoded: data:{meta}")));
            }
            payload
        }
        None => encoded,
    };

    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(InputError::Empty);
    }
    let bytes = STANDARD.decode(compact.as_bytes())?;
    if bytes.is_empty() {
        return Err(InputError::Empty);
    }
    Ok(OcrInput::Bytes(bytes))
}

/// Wraps raw image bytes, rejecting an empty upload.
pub fn image_from_bytes(bytes: Vec<u8>) -> Result<OcrInput, InputError> {
    if bytes.is_empty() {
        return Err(InputError::Empty);
    }
    Ok(OcrInput::Bytes(bytes))
}
