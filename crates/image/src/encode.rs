//! Upload payload encoding.
//!
//! The image service accepts two conventions: source images arrive as a full
//! `data:` URL, watermark assets as bare base64 with no prefix.

use crate::detect::mime_for;
use crate::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Encode bytes as `data:<mime>;base64,<payload>`, sniffing the MIME type.
pub fn to_data_url(data: &[u8]) -> String {
    format!("data:{};base64,{}", mime_for(data), STANDARD.encode(data))
}

/// Encode bytes as bare standard base64.
pub fn to_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Return the base64 portion of a payload, dropping a `data:...,` prefix if present.
pub fn strip_data_url_prefix(payload: &str) -> &str {
    match payload.strip_prefix("data:") {
        Some(rest) => rest.split_once(',').map_or(rest, |(_, b64)| b64),
        None => payload,
    }
}

/// Decode either payload convention back to bytes.
pub fn decode_payload(payload: &str) -> Result<Vec<u8>> {
    Ok(STANDARD.decode(strip_data_url_prefix(payload))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_data_url_carries_mime() {
        let url = to_data_url(&PNG_HEADER);
        assert!(url.starts_with("data:image/png;base64,"));
        assert_eq!(decode_payload(&url).unwrap(), PNG_HEADER);
    }

    #[test]
    fn test_data_url_unknown_type() {
        let url = to_data_url(b"plain text");
        assert!(url.starts_with("data:application/octet-stream;base64,"));
    }

    #[test]
    fn test_bare_base64_has_no_prefix() {
        let b64 = to_base64(&PNG_HEADER);
        assert!(!b64.starts_with("data:"));
        assert!(!b64.contains(','));
        assert_eq!(b64, strip_data_url_prefix(&to_data_url(&PNG_HEADER)));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(to_base64(&[]), "");
        assert_eq!(to_data_url(&[]), "data:application/octet-stream;base64,");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_payload("***").is_err());
    }
}
