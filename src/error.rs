//! Error types for the cryptographic primitives.

use thiserror::Error;

/// Result type alias used throughout the library.
pub type Result<T> = std::result::Result<T, CryptoError>;

/// Every failure the primitives can report.
///
/// All variants are local validation failures: none of them is transient,
/// so callers should surface them rather than retry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("invalid nonce length: expected {expected} bytes, got {actual}")]
    InvalidNonceLength { expected: usize, actual: usize },

    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("select at least one character class")]
    EmptyCharset,

    #[error("OS random generator unavailable")]
    RngUnavailable,

    /// The algorithm needs a key and none was supplied.
    #[error("a key is required for {0}")]
    MissingKey(&'static str),

    /// Input to a decryption could not be decoded.
    #[error("invalid key or corrupted data: {0}")]
    InvalidCiphertext(String),

    #[error("nonce already used with this key")]
    NonceReuse,
}
