//! Transport encoding for SignalVault
//!
//! Reversible binary-to-text encoding used when an archive has to cross a
//! text-only channel (operator logs). Standard base64; encode and decode
//! are exact inverses for every byte sequence.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::warn;

use crate::error::{VaultError, VaultResult};

/// Zip local-file-header signature, `PK\x03\x04`
const ARCHIVE_SIGNATURE: &[u8] = &[0x50, 0x4b, 0x03, 0x04];

/// Encode raw archive bytes as text
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode text back to raw bytes.
///
/// Whitespace (including newlines from copy-pasted log output) is stripped
/// before decoding. Input that is not valid base64 is rejected with
/// `MalformedEncoding`, distinct from any I/O error.
///
/// If the decoded bytes do not start with the zip signature a warning is
/// logged, but decoding still succeeds: the signature check is a soft
/// sanity check only.
pub fn decode(text: &str) -> VaultResult<Vec<u8>> {
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();

    let bytes = STANDARD
        .decode(cleaned.as_bytes())
        .map_err(|e| VaultError::MalformedEncoding(e.to_string()))?;

    if !looks_like_archive(&bytes) {
        warn!("Decoded data does not start with a zip signature; this may not be a backup archive");
    }

    Ok(bytes)
}

/// Soft check: do these bytes start like a zip archive?
pub fn looks_like_archive(bytes: &[u8]) -> bool {
    bytes.starts_with(ARCHIVE_SIGNATURE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let cases: Vec<Vec<u8>> = vec![
            vec![],
            vec![0],
            vec![0xff; 3],
            b"PK\x03\x04some zip bytes".to_vec(),
            (0..=255u8).collect(),
        ];
        for bytes in cases {
            assert_eq!(decode(&encode(&bytes)).unwrap(), bytes);
        }
    }

    #[test]
    fn test_encode_is_deterministic() {
        let bytes = b"deterministic";
        assert_eq!(encode(bytes), encode(bytes));
    }

    #[test]
    fn test_decode_strips_whitespace() {
        let encoded = encode(b"hello world");
        let wrapped = format!("{}\n  {}\n", &encoded[..4], &encoded[4..]);
        assert_eq!(decode(&wrapped).unwrap(), b"hello world");
    }

    #[test]
    fn test_decode_rejects_invalid_input() {
        let result = decode("not!valid!base64!!!");
        assert!(matches!(result, Err(VaultError::MalformedEncoding(_))));
    }

    #[test]
    fn test_decode_empty_input_is_empty_bytes() {
        // encode([]) is the empty string; the round-trip law holds for it.
        assert_eq!(decode("  \n ").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_archive_signature_detection() {
        assert!(looks_like_archive(b"PK\x03\x04rest"));
        assert!(!looks_like_archive(b"plain text"));
        assert!(!looks_like_archive(b""));
    }
}
