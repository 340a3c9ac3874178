//! Natively implemented cryptographic primitives.
//!
//! Provides the ChaCha20 stream cipher, the Caesar substitution cipher,
//! the secure random source and the nonce reuse guard.

pub mod caesar;
pub mod chacha20;
pub mod nonce;
pub mod random;

pub use chacha20::{ChaCha20, Keystream};
pub use nonce::NonceGuard;
pub use random::{OsRandom, RandomSource};

/// Length of a ChaCha20 key (32 bytes / 256 bits).
pub const KEY_LEN: usize = 32;
/// Length of a ChaCha20 nonce (12 bytes, IETF variant).
pub const NONCE_LEN: usize = 12;
/// Length of one keystream block (64 bytes).
pub const BLOCK_LEN: usize = 64;
