//! Compression and token encoding of rendered markup.
//!
//! The remote rendering service accepts diagrams as URL path segments
//! produced by a two-stage transform:
//!
//! 1. zlib-compress the markup bytes, then strip the 2-byte stream header
//!    and the 4-byte adler32 trailer, keeping only the raw DEFLATE payload.
//!    This framing removal is a fixed protocol contract with the service,
//!    not standard zlib output.
//! 2. Re-encode the payload with a 6-bit custom alphabet: groups of 3 bytes
//!    become 4 symbols, the final group zero-padded (padding symbols are
//!    kept; the remote decoder tolerates them). The symbol ordering is
//!    digits, uppercase, lowercase, `-`, `_` — not standard base64.

use std::io::{self, Write};

use flate2::{Compression, write::ZlibEncoder};
use log::trace;
use thiserror::Error;

use crate::error::TrellisError;

/// Length of the zlib stream header stripped from the compressor output.
const STREAM_HEADER_LEN: usize = 2;

/// Length of the adler32 integrity trailer stripped from the compressor output.
const INTEGRITY_TRAILER_LEN: usize = 4;

/// The 6-bit symbol alphabet in value order 0..=63.
const ALPHABET: &[u8; 64] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-_";

/// Failure of the underlying compression step.
///
/// Fatal to the pipeline call; surfaced to the caller and never retried.
#[derive(Debug, Error)]
#[error("Compression failed: {0}")]
pub struct CompressionError(#[from] io::Error);

/// Defensive error for the byte-to-symbol stage.
///
/// The symbol mapping is total over all byte values, so this is unreachable
/// when encoding; it is produced only when decoding a malformed token.
#[derive(Debug, Error)]
#[error("Invalid encoded stream: {0}")]
pub struct EncodingError(pub(crate) String);

/// Compress markup bytes and strip the zlib container framing.
///
/// Returns the raw DEFLATE payload expected by the remote service. The
/// exact offsets (2 bytes front, 4 bytes back) are pinned by a unit test.
///
/// # Errors
///
/// Returns [`TrellisError::Compression`] if the compressor faults, and a
/// defensive [`TrellisError::Encoding`] if the stream is too short to carry
/// the framing (unreachable for non-empty input).
pub fn compress_markup(markup: &str) -> Result<Vec<u8>, TrellisError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(markup.as_bytes())
        .map_err(CompressionError)?;
    let stream = encoder.finish().map_err(CompressionError)?;

    if stream.len() < STREAM_HEADER_LEN + INTEGRITY_TRAILER_LEN {
        return Err(EncodingError(format!(
            "compressed stream of {} bytes cannot carry zlib framing",
            stream.len()
        ))
        .into());
    }

    trace!(
        stream_len = stream.len(),
        payload_len = stream.len() - STREAM_HEADER_LEN - INTEGRITY_TRAILER_LEN;
        "Stripped zlib framing"
    );

    Ok(stream[STREAM_HEADER_LEN..stream.len() - INTEGRITY_TRAILER_LEN].to_vec())
}

/// Encode a raw payload with the 6-bit custom alphabet.
///
/// Groups of 3 input bytes become 4 output symbols; the final group is
/// zero-padded and the zero-derived symbols are retained. For input bytes
/// `b1,b2,b3` the four 6-bit values are `b1>>2`,
/// `((b1&0x3)<<4)|(b2>>4)`, `((b2&0xF)<<2)|(b3>>6)`, `b3&0x3F`.
pub fn encode_token(payload: &[u8]) -> String {
    let mut token = String::with_capacity(payload.len().div_ceil(3) * 4);
    for chunk in payload.chunks(3) {
        let b1 = chunk[0];
        let b2 = chunk.get(1).copied().unwrap_or(0);
        let b3 = chunk.get(2).copied().unwrap_or(0);

        for value in [
            b1 >> 2,
            ((b1 & 0x3) << 4) | (b2 >> 4),
            ((b2 & 0xF) << 2) | (b3 >> 6),
            b3 & 0x3F,
        ] {
            token.push(ALPHABET[usize::from(value)] as char);
        }
    }
    token
}

/// Compress markup and encode the payload into a URL-safe token.
///
/// This is the full Compressor/Encoder stage: either a complete token is
/// produced or an error, never partial output.
///
/// # Errors
///
/// Propagates the errors of [`compress_markup`].
pub fn encode(markup: &str) -> Result<String, TrellisError> {
    let payload = compress_markup(markup)?;
    Ok(encode_token(&payload))
}

/// Decode a token back into the raw compressed payload.
///
/// This mirrors the decoder on the remote service side and exists for
/// round-trip verification; the pipeline itself never decodes.
///
/// # Errors
///
/// Returns [`EncodingError`] for symbols outside the alphabet or a token
/// length that is not a multiple of 4.
pub fn decode_token(token: &str) -> Result<Vec<u8>, EncodingError> {
    fn symbol_value(symbol: u8) -> Result<u8, EncodingError> {
        match symbol {
            b'0'..=b'9' => Ok(symbol - b'0'),
            b'A'..=b'Z' => Ok(symbol - b'A' + 10),
            b'a'..=b'z' => Ok(symbol - b'a' + 36),
            b'-' => Ok(62),
            b'_' => Ok(63),
            other => Err(EncodingError(format!(
                "symbol {:?} is outside the token alphabet",
                other as char
            ))),
        }
    }

    let bytes = token.as_bytes();
    if bytes.len() % 4 != 0 {
        return Err(EncodingError(format!(
            "token length {} is not a multiple of 4",
            bytes.len()
        )));
    }

    let mut payload = Vec::with_capacity(bytes.len() / 4 * 3);
    for chunk in bytes.chunks_exact(4) {
        let v1 = symbol_value(chunk[0])?;
        let v2 = symbol_value(chunk[1])?;
        let v3 = symbol_value(chunk[2])?;
        let v4 = symbol_value(chunk[3])?;

        payload.push((v1 << 2) | (v2 >> 4));
        payload.push((v2 << 4) | (v3 >> 2));
        payload.push((v3 << 6) | v4);
    }
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use flate2::read::DeflateDecoder;

    use super::*;

    #[test]
    fn framing_strip_offsets_are_exact() {
        let markup = "@startuml\n@enduml";

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(markup.as_bytes()).unwrap();
        let full_stream = encoder.finish().unwrap();

        let payload = compress_markup(markup).unwrap();

        // Exactly the 2-byte header and 4-byte trailer are removed.
        assert_eq!(payload.len(), full_stream.len() - 6);
        assert_eq!(payload[..], full_stream[2..full_stream.len() - 4]);
        // zlib streams with the default window start with 0x78.
        assert_eq!(full_stream[0], 0x78);
    }

    #[test]
    fn stripped_payload_is_raw_deflate() {
        let markup = "@startuml\nentity User {\n  *id : int\n}\n\n@enduml";
        let payload = compress_markup(markup).unwrap();

        let mut inflated = String::new();
        DeflateDecoder::new(&payload[..])
            .read_to_string(&mut inflated)
            .expect("payload should inflate as raw DEFLATE");
        assert_eq!(inflated, markup);
    }

    #[test]
    fn alphabet_ordering_is_pinned() {
        // Value 0 -> '0', 9 -> '9', 10 -> 'A', 35 -> 'Z', 36 -> 'a',
        // 61 -> 'z', 62 -> '-', 63 -> '_'.
        assert_eq!(ALPHABET[0], b'0');
        assert_eq!(ALPHABET[9], b'9');
        assert_eq!(ALPHABET[10], b'A');
        assert_eq!(ALPHABET[35], b'Z');
        assert_eq!(ALPHABET[36], b'a');
        assert_eq!(ALPHABET[61], b'z');
        assert_eq!(ALPHABET[62], b'-');
        assert_eq!(ALPHABET[63], b'_');
    }

    #[test]
    fn bit_packing_matches_reference_groups() {
        // 0b00000100 0b00100000 0b11000001 splits into 1, 2, 3, 1.
        assert_eq!(encode_token(&[0x04, 0x20, 0xC1]), "1231");
        // All-ones bytes hit the top of the alphabet.
        assert_eq!(encode_token(&[0xFF, 0xFF, 0xFF]), "____");
        assert_eq!(encode_token(&[0x00, 0x00, 0x00]), "0000");
    }

    #[test]
    fn final_group_is_zero_padded_and_kept() {
        // One input byte still emits four symbols.
        assert_eq!(encode_token(&[0xFF]).len(), 4);
        assert_eq!(encode_token(&[0xFF]), "_m00");
        // Two input bytes likewise.
        assert_eq!(encode_token(&[0xFF, 0xFF]), "__y0");
    }

    #[test]
    fn empty_payload_encodes_to_empty_token() {
        assert_eq!(encode_token(&[]), "");
    }

    #[test]
    fn decode_inverts_encode_on_aligned_input() {
        let payload: Vec<u8> = (0..=255).collect();
        // 256 bytes is not a multiple of 3; pad to alignment for exactness.
        let aligned = &payload[..255];
        assert_eq!(decode_token(&encode_token(aligned)).unwrap(), aligned);
    }

    #[test]
    fn decode_rejects_foreign_symbols() {
        assert!(decode_token("ab+d").is_err());
        assert!(decode_token("abc").is_err());
    }

    #[test]
    fn encode_is_deterministic() {
        let markup = "@startuml\nentity User {\n  name : string\n}\n\n@enduml";
        assert_eq!(encode(markup).unwrap(), encode(markup).unwrap());
    }

    #[test]
    fn encode_distinguishes_same_length_inputs() {
        let first = encode("@startuml\nentity Aa {\n}\n\n@enduml").unwrap();
        let second = encode("@startuml\nentity Ab {\n}\n\n@enduml").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn short_markup_still_produces_a_token() {
        let token = encode("@startuml\n@enduml").unwrap();
        assert!(!token.is_empty());
        assert!(
            token
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        );
    }
}
