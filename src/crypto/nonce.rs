//! Nonce reuse guard for ChaCha20.
//!
//! Encrypting two messages under the same (key, nonce) pair leaks their XOR.
//! [`NonceGuard`] owns a single key and refuses any nonce it has already
//! seen for that key.

use super::{ChaCha20, KEY_LEN, NONCE_LEN, RandomSource};
use crate::error::{CryptoError, Result};
use std::collections::HashSet;
use tracing::debug;
use zeroize::Zeroizing;

pub struct NonceGuard {
    key: Zeroizing<[u8; KEY_LEN]>,
    used: HashSet<[u8; NONCE_LEN]>,
}

impl NonceGuard {
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeyLength`] unless `key` is 32 bytes.
    pub fn new(key: &[u8]) -> Result<Self> {
        let key: [u8; KEY_LEN] = key
            .try_into()
            .map_err(|_| CryptoError::InvalidKeyLength {
                expected: KEY_LEN,
                actual: key.len(),
            })?;
        Ok(Self {
            key: Zeroizing::new(key),
            used: HashSet::new(),
        })
    }

    /// Encrypts `data` under `nonce`, failing with [`CryptoError::NonceReuse`]
    /// if the nonce was used before with this key.
    pub fn seal(&mut self, nonce: &[u8], data: &[u8]) -> Result<Vec<u8>> {
        let cipher = ChaCha20::new(self.key.as_slice(), nonce)?;
        let nonce: [u8; NONCE_LEN] = nonce
            .try_into()
            .map_err(|_| CryptoError::InvalidNonceLength {
                expected: NONCE_LEN,
                actual: nonce.len(),
            })?;

        if !self.used.insert(nonce) {
            debug!("rejecting reused nonce");
            return Err(CryptoError::NonceReuse);
        }
        Ok(cipher.encrypt(data))
    }

    /// Draws a fresh random nonce and encrypts `data` under it.
    pub fn seal_fresh<R: RandomSource>(
        &mut self,
        rng: &mut R,
        data: &[u8],
    ) -> Result<([u8; NONCE_LEN], Vec<u8>)> {
        loop {
            let mut nonce = [0u8; NONCE_LEN];
            rng.fill(&mut nonce)?;
            match self.seal(&nonce, data) {
                Ok(ciphertext) => return Ok((nonce, ciphertext)),
                Err(CryptoError::NonceReuse) => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Decrypts `data`. Decryption does not consume the nonce.
    pub fn open(&self, nonce: &[u8], data: &[u8]) -> Result<Vec<u8>> {
        Ok(ChaCha20::new(self.key.as_slice(), nonce)?.decrypt(data))
    }

    /// Number of nonces consumed so far.
    pub fn used(&self) -> usize {
        self.used.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::OsRandom;
    use crate::crypto::random::testing::Unavailable;

    #[test]
    fn rejects_reused_nonce() {
        let mut guard = NonceGuard::new(&[5u8; 32]).unwrap();
        guard.seal(&[1u8; 12], b"first").unwrap();
        assert_eq!(
            guard.seal(&[1u8; 12], b"second"),
            Err(CryptoError::NonceReuse)
        );
        assert!(guard.seal(&[2u8; 12], b"second").is_ok());
        assert_eq!(guard.used(), 2);
    }

    #[test]
    fn invalid_nonce_is_not_recorded() {
        let mut guard = NonceGuard::new(&[5u8; 32]).unwrap();
        assert!(matches!(
            guard.seal(&[1u8; 8], b"x"),
            Err(CryptoError::InvalidNonceLength { .. })
        ));
        assert_eq!(guard.used(), 0);
    }

    #[test]
    fn fresh_nonces_roundtrip() {
        let mut guard = NonceGuard::new(&[9u8; 32]).unwrap();
        let (n1, c1) = guard.seal_fresh(&mut OsRandom, b"same message").unwrap();
        let (n2, c2) = guard.seal_fresh(&mut OsRandom, b"same message").unwrap();

        assert_ne!(n1, n2);
        assert_ne!(c1, c2);
        assert_eq!(guard.open(&n1, &c1).unwrap(), b"same message");
        assert_eq!(guard.open(&n2, &c2).unwrap(), b"same message");
    }

    #[test]
    fn fresh_nonce_needs_rng() {
        let mut guard = NonceGuard::new(&[9u8; 32]).unwrap();
        assert_eq!(
            guard.seal_fresh(&mut Unavailable, b"x"),
            Err(CryptoError::RngUnavailable)
        );
    }

    #[test]
    fn rejects_short_key() {
        assert!(matches!(
            NonceGuard::new(&[0u8; 16]),
            Err(CryptoError::InvalidKeyLength { actual: 16, .. })
        ));
    }
}
