// src/readme/decode.rs
// =============================================================================
// The Decoder stage: ReadmePayload -> markdown text.
//
// The API sends file content as standard base64, wrapped with newlines every
// 60 characters. We strip the whitespace, decode the whole thing into bytes,
// and only then read those bytes as UTF-8. Decoding all bytes at once is what
// keeps multi-byte characters (emoji, accents) intact.
// =============================================================================

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use tracing::warn;

use crate::error::ReadmeError;
use crate::github::ReadmePayload;

// Standard alphabet, but as lenient as a browser's atob(): padding is
// optional and unused trailing bits are ignored
const FORGIVING: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

pub fn decode_payload(payload: &ReadmePayload) -> Result<String, ReadmeError> {
    let content = match payload.content.as_deref() {
        Some(content) if !content.trim().is_empty() => content,
        _ => return Err(ReadmeError::EmptyContent),
    };

    if let Some(encoding) = payload.encoding.as_deref() {
        if encoding != "base64" {
            warn!(encoding, "unexpected README encoding, trying base64 anyway");
        }
    }

    let compact: String = content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = FORGIVING.decode(compact.as_bytes())?;

    // Invalid sequences become U+FFFD rather than failing the whole README
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why not decode character by character?
//    - UTF-8 uses 1 to 4 bytes per character
//    - Base64 groups bytes in threes, so a character can straddle two groups
//    - Decoding to a Vec<u8> first and converting once avoids splitting them
//
// 2. What is `Engine as _`?
//    - `decode` is a trait method, so the trait must be in scope
//    - `as _` imports the trait without binding its name
//
// 3. What does from_utf8_lossy return?
//    - A Cow<str>: borrowed if the bytes were valid, owned if anything had to
//      be replaced. into_owned() gives us a String either way.
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;

    fn payload(content: Option<&str>) -> ReadmePayload {
        ReadmePayload {
            content: content.map(str::to_string),
            encoding: Some("base64".to_string()),
        }
    }

    #[test]
    fn test_missing_content() {
        assert_eq!(decode_payload(&payload(None)), Err(ReadmeError::EmptyContent));
        assert_eq!(decode_payload(&payload(Some(""))), Err(ReadmeError::EmptyContent));
        assert_eq!(decode_payload(&payload(Some("\n"))), Err(ReadmeError::EmptyContent));
    }

    #[test]
    fn test_multibyte_text_survives() {
        let original = "# Café ☕\n\nDéjà vu 🚀🦀 — naïve 日本語\n";
        let encoded = STANDARD.encode(original.as_bytes());
        assert_eq!(decode_payload(&payload(Some(&encoded))).unwrap(), original);
    }

    #[test]
    fn test_line_wrapped_content() {
        // GitHub wraps base64 at 60 columns; split right through a multi-byte char
        let original = "ü🦀".repeat(20);
        let encoded = STANDARD.encode(original.as_bytes());
        let wrapped: String = encoded
            .as_bytes()
            .chunks(7)
            .map(|chunk| format!("{}\n", std::str::from_utf8(chunk).unwrap()))
            .collect();
        assert_eq!(decode_payload(&payload(Some(&wrapped))).unwrap(), original);
    }

    #[test]
    fn test_unpadded_and_loose_trailing_bits() {
        // "hi" is "aGk=" with padding
        assert_eq!(decode_payload(&payload(Some("aGk"))).unwrap(), "hi");
        // last symbol carries a stray low bit ("aGl" instead of "aGk")
        assert_eq!(decode_payload(&payload(Some("aGl="))).unwrap(), "hi");
    }

    #[test]
    fn test_invalid_base64() {
        let result = decode_payload(&payload(Some("not*base64!")));
        assert!(matches!(result, Err(ReadmeError::Decode(_))));
    }
}
