//! ChaCha20 stream cipher (RFC 8439, IETF variant).
//!
//! The state matrix is a `[u32; 16]`:
//! ```text
//! const const const const | key key key key | key key key key | counter nonce nonce nonce
//! ```
//! Encryption and decryption are the same XOR against the keystream.
//! This module performs no authentication and does not track nonces;
//! see [`NonceGuard`](super::NonceGuard) for a reuse-checking wrapper.

use super::{BLOCK_LEN, KEY_LEN, NONCE_LEN};
use crate::error::{CryptoError, Result};
use tracing::trace;
use zeroize::Zeroize;

/// "expand 32-byte k" as little-endian words.
const CONSTANTS: [u32; 4] = [0x6170_7865, 0x3320_646e, 0x7962_2d32, 0x6b20_6574];

const DOUBLE_ROUNDS: usize = 10;

/// One quarter round: four add-rotate-xor steps on words `a`, `b`, `c`, `d`.
#[inline(always)]
pub fn quarter_round(state: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(16);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(12);

    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(8);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(7);
}

fn le_words<const N: usize>(bytes: &[u8]) -> [u32; N] {
    let mut words = [0u32; N];
    for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    words
}

/// A keyed ChaCha20 instance.
///
/// Holds the key and nonce as little-endian words plus the initial block
/// counter. The instance itself is never advanced: every call to
/// [`encrypt`](Self::encrypt) starts again from the initial counter.
pub struct ChaCha20 {
    key: [u32; 8],
    nonce: [u32; 3],
    counter: u32,
}

impl Drop for ChaCha20 {
    fn drop(&mut self) {
        self.key.zeroize();
        self.nonce.zeroize();
    }
}

impl ChaCha20 {
    /// Creates a cipher starting at block counter 0.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeyLength`] unless `key` is 32 bytes and
    /// [`CryptoError::InvalidNonceLength`] unless `nonce` is 12 bytes.
    pub fn new(key: &[u8], nonce: &[u8]) -> Result<Self> {
        Self::with_counter(key, nonce, 0)
    }

    /// Creates a cipher whose first block uses `counter`.
    pub fn with_counter(key: &[u8], nonce: &[u8], counter: u32) -> Result<Self> {
        if key.len() != KEY_LEN {
            return Err(CryptoError::InvalidKeyLength {
                expected: KEY_LEN,
                actual: key.len(),
            });
        }
        if nonce.len() != NONCE_LEN {
            return Err(CryptoError::InvalidNonceLength {
                expected: NONCE_LEN,
                actual: nonce.len(),
            });
        }

        Ok(Self {
            key: le_words(key),
            nonce: le_words(nonce),
            counter,
        })
    }

    /// Initial block counter.
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Computes the 64-byte keystream block for `counter`.
    pub fn block(&self, counter: u32) -> [u8; BLOCK_LEN] {
        let mut state = [0u32; 16];
        state[..4].copy_from_slice(&CONSTANTS);
        state[4..12].copy_from_slice(&self.key);
        state[12] = counter;
        state[13..].copy_from_slice(&self.nonce);

        let mut working = state;
        for _ in 0..DOUBLE_ROUNDS {
            // columns
            quarter_round(&mut working, 0, 4, 8, 12);
            quarter_round(&mut working, 1, 5, 9, 13);
            quarter_round(&mut working, 2, 6, 10, 14);
            quarter_round(&mut working, 3, 7, 11, 15);
            // diagonals
            quarter_round(&mut working, 0, 5, 10, 15);
            quarter_round(&mut working, 1, 6, 11, 12);
            quarter_round(&mut working, 2, 7, 8, 13);
            quarter_round(&mut working, 3, 4, 9, 14);
        }

        for (w, s) in working.iter_mut().zip(&state) {
            *w = w.wrapping_add(*s);
        }

        let mut out = [0u8; BLOCK_LEN];
        for (chunk, word) in out.chunks_exact_mut(4).zip(&working) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }

        state.zeroize();
        working.zeroize();
        out
    }

    /// Returns a keystream cursor positioned at the initial counter.
    pub fn keystream(&self) -> Keystream<'_> {
        Keystream {
            cipher: self,
            counter: self.counter,
            block: [0u8; BLOCK_LEN],
            offset: BLOCK_LEN,
        }
    }

    /// XORs `data` against the keystream. Output length equals input length.
    pub fn encrypt(&self, data: &[u8]) -> Vec<u8> {
        trace!(
            len = data.len(),
            blocks = data.len().div_ceil(BLOCK_LEN),
            "applying chacha20 keystream"
        );
        let mut out = data.to_vec();
        self.keystream().apply(&mut out);
        out
    }

    /// Identical to [`encrypt`](Self::encrypt).
    pub fn decrypt(&self, data: &[u8]) -> Vec<u8> {
        self.encrypt(data)
    }
}

/// Stateful position inside a ChaCha20 keystream.
///
/// Successive [`apply`](Self::apply) calls continue where the previous one
/// stopped, so a large buffer can be processed in chunks of any size and
/// produce the same bytes as a single [`ChaCha20::encrypt`].
pub struct Keystream<'a> {
    cipher: &'a ChaCha20,
    counter: u32,
    block: [u8; BLOCK_LEN],
    offset: usize,
}

impl Keystream<'_> {
    /// XORs the next `buf.len()` keystream bytes into `buf` in place.
    pub fn apply(&mut self, buf: &mut [u8]) {
        for byte in buf.iter_mut() {
            if self.offset == BLOCK_LEN {
                self.block = self.cipher.block(self.counter);
                self.counter = self.counter.wrapping_add(1);
                self.offset = 0;
            }
            *byte ^= self.block[self.offset];
            self.offset += 1;
        }
    }

    /// Counter of the next block that will be generated.
    pub fn next_counter(&self) -> u32 {
        self.counter
    }
}

impl Drop for Keystream<'_> {
    fn drop(&mut self) {
        self.block.zeroize();
    }
}
