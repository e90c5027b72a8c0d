//! Input decoding using chardetng and `encoding_rs`.
//!
//! Exports from spreadsheet tools arrive in whatever code page the source
//! machine used. Everything is decoded to UTF-8 text before parsing.

use std::borrow::Cow;

use chardetng::EncodingDetector;
use simdutf8::basic::from_utf8;

/// Check if the given bytes are valid UTF-8.
pub fn is_utf8(data: &[u8]) -> bool {
    from_utf8(data).is_ok()
}

/// Check if the data starts with a UTF-8 BOM (EF BB BF).
pub fn has_utf8_bom(data: &[u8]) -> bool {
    data.starts_with(&[0xEF, 0xBB, 0xBF])
}

/// Skip the UTF-8 BOM if present and return the remaining data.
pub fn skip_bom(data: &[u8]) -> &[u8] {
    if has_utf8_bom(data) { &data[3..] } else { data }
}

/// Decoded input text plus the encoding it was read as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedInput<'a> {
    /// UTF-8 text without BOM.
    pub text: Cow<'a, str>,
    /// Name of the source encoding.
    pub encoding: &'static str,
}

impl DecodedInput<'_> {
    /// Returns true if the input had to be transcoded.
    pub fn was_transcoded(&self) -> bool {
        matches!(self.text, Cow::Owned(_))
    }
}

/// Decode raw input bytes to UTF-8 text.
///
/// - UTF-16 LE/BE with BOM is decoded directly
/// - valid UTF-8 (with or without BOM) is borrowed as-is
/// - UTF-8 with a few stray bytes is kept as UTF-8 and the invalid
///   sequences are dropped
/// - anything else is guessed with chardetng and transcoded; undecodable
///   sequences become U+FFFD
pub fn decode_input(data: &[u8]) -> DecodedInput<'_> {
    // UTF-16 BOMs first, chardetng doesn't handle these well
    if data.starts_with(&[0xFF, 0xFE]) {
        let (decoded, _) = encoding_rs::UTF_16LE.decode_with_bom_removal(data);
        return owned(decoded, encoding_rs::UTF_16LE.name());
    }
    if data.starts_with(&[0xFE, 0xFF]) {
        let (decoded, _) = encoding_rs::UTF_16BE.decode_with_bom_removal(data);
        return owned(decoded, encoding_rs::UTF_16BE.name());
    }

    let body = skip_bom(data);
    if let Ok(text) = from_utf8(body) {
        return DecodedInput {
            text: Cow::Borrowed(text),
            encoding: encoding_rs::UTF_8.name(),
        };
    }

    if let Some(text) = decode_utf8_ignoring_invalid(body) {
        tracing::debug!("dropped invalid UTF-8 sequences");
        return DecodedInput {
            text: Cow::Owned(text),
            encoding: encoding_rs::UTF_8.name(),
        };
    }

    let mut detector = EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);
    tracing::debug!(encoding = encoding.name(), "transcoding input");

    let (decoded, _, _) = encoding.decode(body);
    owned(decoded, encoding.name())
}

/// Decode `data` as UTF-8, dropping invalid sequences, when the data is
/// mostly UTF-8: it holds at least one valid multi-byte character and no
/// more invalid bytes than multi-byte characters.
fn decode_utf8_ignoring_invalid(data: &[u8]) -> Option<String> {
    let mut multibyte = 0usize;
    let mut invalid = 0usize;
    for chunk in data.utf8_chunks() {
        multibyte += chunk.valid().chars().filter(|c| !c.is_ascii()).count();
        invalid += chunk.invalid().len();
    }
    if multibyte == 0 || invalid > multibyte {
        return None;
    }

    let mut text = String::with_capacity(data.len());
    for chunk in data.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    Some(text)
}

fn owned(decoded: Cow<'_, str>, encoding: &'static str) -> DecodedInput<'static> {
    DecodedInput {
        text: Cow::Owned(decoded.into_owned()),
        encoding,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_utf8() {
        assert!(is_utf8(b"name,email"));
        assert!(is_utf8("İsim,E-posta".as_bytes()));
        assert!(!is_utf8(&[0xFF, 0xFE]));
    }

    #[test]
    fn test_utf8_bom_stripped() {
        let data = [0xEF, 0xBB, 0xBF, b'a', b',', b'b'];
        let decoded = decode_input(&data);

        assert_eq!(decoded.text, "a,b");
        assert!(!decoded.was_transcoded());
    }

    #[test]
    fn test_utf16_le() {
        let data: &[u8] = &[0xFF, 0xFE, b'H', 0x00, b'i', 0x00];
        let decoded = decode_input(data);

        assert_eq!(decoded.text, "Hi");
        assert!(decoded.was_transcoded());
    }

    #[test]
    fn test_stray_byte_in_utf8_dropped() {
        let data = b"name\nAy\xC5\x9Fe\nZed\xFF\n";
        let decoded = decode_input(data);

        assert_eq!(decoded.text, "name\nAyşe\nZed\n");
        assert_eq!(decoded.encoding, "UTF-8");
    }

    #[test]
    fn test_single_byte_without_utf8_goes_to_detector() {
        assert_eq!(decode_utf8_ignoring_invalid(b"Ay\xFEe"), None);
        assert_eq!(decode_utf8_ignoring_invalid(b"plain ascii"), None);
    }

    #[test]
    fn test_windows1251_transcoded() {
        // "Привет" in Windows-1251
        let data: &[u8] = &[0xCF, 0xF0, 0xE8, 0xE2, 0xE5, 0xF2];
        let decoded = decode_input(data);

        assert!(decoded.was_transcoded());
        assert!(is_utf8(decoded.text.as_bytes()));
    }
}
