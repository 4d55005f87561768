//! Hex text decoding.

use crate::error::DecodeError;

/// Decode a string of hex digit pairs into bytes.
///
/// Whitespace is ignored anywhere in the input, digits may be either case,
/// and `:` / `-` separators (as in `aa:bb:cc` or `aa-bb-cc`) are accepted.
/// A single leading `0x` prefix is stripped.
///
/// # Example
///
/// ```
/// use framedecode::codec::decode_hex;
///
/// assert_eq!(decode_hex("08 00").unwrap(), vec![0x08, 0x00]);
/// assert_eq!(decode_hex("aa:BB:cc").unwrap(), vec![0xaa, 0xbb, 0xcc]);
/// assert!(decode_hex("AB CD E").is_err());
/// ```
pub fn decode_hex(text: &str) -> Result<Vec<u8>, DecodeError> {
    let trimmed = text.trim_start();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    let cleaned: String = body
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && *c != ':' && *c != '-')
        .collect();

    hex::decode(&cleaned).map_err(|e| DecodeError::MalformedHex {
        reason: match e {
            hex::FromHexError::OddLength => {
                format!("odd number of hex digits ({})", cleaned.len())
            }
            hex::FromHexError::InvalidHexCharacter { c, index } => {
                format!("invalid character {c:?} at digit {index}")
            }
            other => other.to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_plain() {
        assert_eq!(
            decode_hex("ffffffffffff").unwrap(),
            vec![0xff, 0xff, 0xff, 0xff, 0xff, 0xff]
        );
    }

    #[test]
    fn test_decode_whitespace_and_case() {
        let bytes = decode_hex("  08 00\n45\tAb\r\n").unwrap();
        assert_eq!(bytes, vec![0x08, 0x00, 0x45, 0xab]);
    }

    #[test]
    fn test_decode_separators_and_prefix() {
        assert_eq!(decode_hex("0x0800").unwrap(), vec![0x08, 0x00]);
        assert_eq!(
            decode_hex("de-ad-be-ef").unwrap(),
            vec![0xde, 0xad, 0xbe, 0xef]
        );
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode_hex("").unwrap(), Vec::<u8>::new());
        assert_eq!(decode_hex("   ").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_odd_length_is_malformed() {
        let err = decode_hex("AB CD E").unwrap_err();
        match err {
            DecodeError::MalformedHex { reason } => assert!(reason.contains("odd")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_character_is_malformed() {
        let err = decode_hex("0g").unwrap_err();
        match err {
            DecodeError::MalformedHex { reason } => assert!(reason.contains("'g'")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
