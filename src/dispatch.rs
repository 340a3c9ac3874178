//! Algorithm dispatch for text encryption.
//!
//! Routes a text, an algorithm name and a key string to the matching
//! primitive and exchanges binary ciphertext as standard base64.

use crate::crypto::{ChaCha20, KEY_LEN, NONCE_LEN, caesar};
use crate::error::{CryptoError, Result};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;
use zeroize::Zeroizing;

/// Shift used when a Caesar key does not start with a non-zero integer.
pub const DEFAULT_CAESAR_SHIFT: i64 = 3;

/// Nonce used by the text dispatch for ChaCha20.
///
/// Every text encrypted under the same key shares this nonce, so two
/// ciphertexts under one key leak the XOR of their plaintexts. Use
/// [`NonceGuard`](crate::crypto::NonceGuard) when that matters.
pub const FIXED_NONCE: [u8; NONCE_LEN] = [1u8; NONCE_LEN];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    ChaCha20,
    Caesar,
    /// Plain base64 encoding. Provides no secrecy.
    Base64,
}

impl Algorithm {
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::ChaCha20 => "chacha20",
            Algorithm::Caesar => "caesar",
            Algorithm::Base64 => "base64",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "chacha20" => Ok(Algorithm::ChaCha20),
            "caesar" => Ok(Algorithm::Caesar),
            "base64" => Ok(Algorithm::Base64),
            other => Err(CryptoError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// Turns a key string into ChaCha20 key bytes.
///
/// The string is padded with `'0'` to 32 characters and cut to its first
/// 32 characters, then UTF-8 encoded. Non-ASCII keys therefore encode to
/// more than 32 bytes and are rejected.
pub fn chacha_key_from_str(key: &str) -> Result<Zeroizing<Vec<u8>>> {
    let padded: Zeroizing<String> = Zeroizing::new(
        key.chars()
            .chain(std::iter::repeat('0'))
            .take(KEY_LEN)
            .collect(),
    );
    let bytes = Zeroizing::new(padded.as_bytes().to_vec());
    if bytes.len() != KEY_LEN {
        return Err(CryptoError::InvalidKeyLength {
            expected: KEY_LEN,
            actual: bytes.len(),
        });
    }
    Ok(bytes)
}

/// Reads a Caesar shift from the leading integer of `key`.
///
/// Leading whitespace and a sign are accepted and trailing garbage is
/// ignored (`"5abc"` is 5). Anything without leading digits, a zero shift
/// or a value that does not fit in `i64` falls back to
/// [`DEFAULT_CAESAR_SHIFT`].
pub fn parse_shift(key: &str) -> i64 {
    let s = key.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    // overflowing digit runs take the default too, not a value reduced mod 26
    let magnitude = match digits[..end].parse::<i64>() {
        Ok(v) if v != 0 => v,
        _ => return DEFAULT_CAESAR_SHIFT,
    };
    if negative { -magnitude } else { magnitude }
}

fn require_key(algorithm: Algorithm, key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CryptoError::MissingKey(algorithm.name()));
    }
    Ok(())
}

/// Encrypts `text` with the named algorithm.
///
/// # Errors
///
/// - [`CryptoError::UnsupportedAlgorithm`] for an unknown name
/// - [`CryptoError::MissingKey`] for ChaCha20 with an empty key
/// - [`CryptoError::InvalidKeyLength`] for a ChaCha20 key that does not
///   encode to 32 bytes
pub fn encrypt_with_algorithm(text: &str, algorithm: &str, key: &str) -> Result<String> {
    encrypt_text(text, algorithm.parse()?, key)
}

/// Inverse of [`encrypt_with_algorithm`].
///
/// # Errors
///
/// As for encryption, plus [`CryptoError::InvalidCiphertext`] if the input
/// is not valid base64 or does not decrypt to UTF-8.
pub fn decrypt_with_algorithm(text: &str, algorithm: &str, key: &str) -> Result<String> {
    decrypt_text(text, algorithm.parse()?, key)
}

pub fn encrypt_text(text: &str, algorithm: Algorithm, key: &str) -> Result<String> {
    debug!(%algorithm, len = text.len(), "encrypting text");
    match algorithm {
        Algorithm::ChaCha20 => {
            require_key(algorithm, key)?;
            let key = chacha_key_from_str(key)?;
            let cipher = ChaCha20::new(&key, &FIXED_NONCE)?;
            Ok(STANDARD.encode(cipher.encrypt(text.as_bytes())))
        }
        Algorithm::Caesar => Ok(caesar::encrypt(text, parse_shift(key))),
        Algorithm::Base64 => Ok(STANDARD.encode(text.as_bytes())),
    }
}

pub fn decrypt_text(text: &str, algorithm: Algorithm, key: &str) -> Result<String> {
    debug!(%algorithm, len = text.len(), "decrypting text");
    match algorithm {
        Algorithm::ChaCha20 => {
            require_key(algorithm, key)?;
            let key = chacha_key_from_str(key)?;
            let cipher = ChaCha20::new(&key, &FIXED_NONCE)?;
            let plaintext = cipher.decrypt(&decode_base64(text)?);
            utf8(plaintext)
        }
        Algorithm::Caesar => Ok(caesar::decrypt(text, parse_shift(key))),
        Algorithm::Base64 => utf8(decode_base64(text)?),
    }
}

fn decode_base64(text: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(text.trim())
        .map_err(|e| CryptoError::InvalidCiphertext(e.to_string()))
}

fn utf8(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|_| CryptoError::InvalidCiphertext("not valid UTF-8".into()))
}
