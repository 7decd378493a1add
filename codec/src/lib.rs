//! Token codec — converts between a token identifier and its scannable
//! payload representation.
//!
//! Payload format: `seal_` + base32(identifier bytes) + base32(checksum).
//!
//! Checksum: first 5 bytes of Blake2b-256(identifier bytes), encoded as 8
//! base32 characters. Base32 alphabet: `13456789abcdefghijkmnopqrstuwxyz`
//! (Nano-style, avoids ambiguous chars). The codec is pure: turning pixels
//! into the payload string is the image decoder's job, not ours.

pub mod artifact;
pub mod error;

pub use artifact::Artifact;
pub use error::CodecError;

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use veriseal_types::TokenId;

/// Base32 alphabet (32 chars, avoids visually ambiguous 0/O, 2/Z, l/I, v).
const BASE32_ALPHABET: &[u8; 32] = b"13456789abcdefghijkmnopqrstuwxyz";

/// Reverse lookup table: ASCII byte → 5-bit value (0xFF = invalid).
const BASE32_DECODE: [u8; 128] = {
    let mut table = [0xFFu8; 128];
    let alpha = BASE32_ALPHABET;
    let mut i = 0;
    while i < 32 {
        table[alpha[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Prefix for all scannable payloads.
const PREFIX: &str = "seal_";
/// Number of base32 characters for the checksum (40 bits → 40/5 = 8).
const CHECKSUM_CHARS: usize = 8;
/// Checksum length in bytes before encoding.
const CHECKSUM_BYTES: usize = 5;

fn blake2b_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b::<U32>::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Encode a byte slice as base32 using the Veriseal alphabet.
fn encode_base32(bytes: &[u8]) -> String {
    let total_bits = bytes.len() * 8;
    let num_chars = total_bits.div_ceil(5);
    let mut result = String::with_capacity(num_chars);

    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;

    for &byte in bytes {
        buffer = (buffer << 8) | byte as u64;
        bits_in_buffer += 8;
        while bits_in_buffer >= 5 {
            bits_in_buffer -= 5;
            let idx = ((buffer >> bits_in_buffer) & 0x1F) as usize;
            result.push(BASE32_ALPHABET[idx] as char);
        }
    }
    // Remaining bits (padded with zeros on the right).
    if bits_in_buffer > 0 {
        let idx = ((buffer << (5 - bits_in_buffer)) & 0x1F) as usize;
        result.push(BASE32_ALPHABET[idx] as char);
    }

    result
}

/// Decode a base32 string of arbitrary length into bytes.
///
/// Yields `floor(5 * chars / 8)` bytes. Returns `None` on invalid
/// characters or non-zero padding bits (which can never come from
/// `encode_base32`).
fn decode_base32(s: &str) -> Option<Vec<u8>> {
    let num_bytes = s.len() * 5 / 8;
    let mut result = Vec::with_capacity(num_bytes);

    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0u32;

    for c in s.bytes() {
        if c >= 128 {
            return None;
        }
        let val = BASE32_DECODE[c as usize];
        if val == 0xFF {
            return None;
        }
        buffer = (buffer << 5) | val as u64;
        bits_in_buffer += 5;
        if bits_in_buffer >= 8 {
            bits_in_buffer -= 8;
            result.push((buffer >> bits_in_buffer) as u8);
        }
    }

    // Leftover bits are right-padding from encoding and must be zero.
    if bits_in_buffer > 0 && (buffer & ((1 << bits_in_buffer) - 1)) != 0 {
        return None;
    }

    Some(result)
}

/// Encode a token identifier into its scannable artifact.
///
/// Deterministic and total for any valid `TokenId`.
pub fn encode(id: &TokenId) -> Artifact {
    let body = encode_base32(id.as_bytes());
    let checksum = blake2b_256(id.as_bytes());
    let checksum_encoded = encode_base32(&checksum[..CHECKSUM_BYTES]);
    let payload = format!("{}{}{}", PREFIX, body, checksum_encoded);
    Artifact::new(id.clone(), payload)
}

/// Decode a scanned payload string back into the token identifier.
///
/// Validates prefix, length, alphabet, and checksum. Any single corrupted
/// character is caught by the checksum.
pub fn decode_payload(payload: &str) -> Result<TokenId, CodecError> {
    let encoded = payload
        .strip_prefix(PREFIX)
        .ok_or(CodecError::MissingPrefix)?;
    if encoded.len() <= CHECKSUM_CHARS {
        return Err(CodecError::TruncatedPayload(payload.len()));
    }

    let split = encoded.len() - CHECKSUM_CHARS;
    let body = &encoded[..split];
    let checksum_part = &encoded[split..];

    let id_bytes = decode_base32(body).ok_or(CodecError::InvalidEncoding)?;
    let checksum_bytes = decode_base32(checksum_part).ok_or(CodecError::InvalidEncoding)?;

    let expected = blake2b_256(&id_bytes);
    if checksum_bytes != expected[..CHECKSUM_BYTES] {
        return Err(CodecError::ChecksumMismatch);
    }

    let raw = String::from_utf8(id_bytes).map_err(|_| CodecError::InvalidEncoding)?;
    TokenId::parse(raw).map_err(|_| CodecError::InvalidEncoding)
}

/// Validate that a payload string is well-formed with a correct checksum.
pub fn validate_payload(payload: &str) -> bool {
    decode_payload(payload).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> TokenId {
        TokenId::parse(s).unwrap()
    }

    #[test]
    fn encode_decode_roundtrip() {
        let token = id("550e8400-e29b-41d4-a716-446655440000");
        let artifact = encode(&token);
        assert!(artifact.payload().starts_with("seal_"));
        let decoded = decode_payload(artifact.payload()).unwrap();
        assert_eq!(decoded, token);
    }

    #[test]
    fn encode_is_deterministic() {
        let token = id("batch-7-unit-00042");
        assert_eq!(encode(&token).payload(), encode(&token).payload());
    }

    #[test]
    fn missing_prefix_rejected() {
        let artifact = encode(&id("abc-123"));
        let stripped = artifact.payload().trim_start_matches("seal_");
        assert!(matches!(
            decode_payload(stripped),
            Err(CodecError::MissingPrefix)
        ));
    }

    #[test]
    fn corrupted_character_rejected() {
        let artifact = encode(&id("550e8400-e29b-41d4-a716-446655440000"));
        // Flip one body character to a different alphabet character.
        let pos = PREFIX.len() + 2;
        let bad: String = artifact
            .payload()
            .chars()
            .enumerate()
            .map(|(i, c)| {
                if i == pos {
                    if c == '3' {
                        '4'
                    } else {
                        '3'
                    }
                } else {
                    c
                }
            })
            .collect();
        assert!(decode_payload(&bad).is_err());
    }

    #[test]
    fn truncated_payload_rejected() {
        assert!(matches!(
            decode_payload("seal_134"),
            Err(CodecError::TruncatedPayload(_))
        ));
        assert!(decode_payload("seal_").is_err());
    }

    #[test]
    fn invalid_alphabet_rejected() {
        // '0' and 'v' are not in the alphabet.
        assert!(decode_payload("seal_000000000vvvvvvvvv").is_err());
    }

    #[test]
    fn different_ids_different_payloads() {
        let a = encode(&id("unit-a"));
        let b = encode(&id("unit-b"));
        assert_ne!(a.payload(), b.payload());
    }
}
