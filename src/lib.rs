//! Client-side cryptographic primitives.
//!
//! - [`crypto::ChaCha20`]: the ChaCha20 stream cipher
//! - [`crypto::caesar`]: Caesar shift over Latin and Cyrillic letters
//! - [`keygen`]: secure password and passphrase generation
//! - [`strength`]: entropy and strength estimates for candidate keys
//! - [`dispatch`]: text encryption by algorithm name
//!
//! [`CipherDesk`] bundles these behind one context that owns the random
//! source.

pub mod crypto;
pub mod dispatch;
mod error;
pub mod fileio;
pub mod history;
pub mod keygen;
pub mod strength;

pub use crate::crypto::{OsRandom, RandomSource};
pub use crate::dispatch::Algorithm;
pub use crate::error::{CryptoError, Result};
pub use crate::history::{OperationKind, OperationRecord};
pub use crate::keygen::{KeyOptions, PasswordCandidate, Preset};
pub use crate::strength::{StrengthAssessment, StrengthLevel};

use zeroize::Zeroizing;

/// Entry point owning the random source used for key generation.
pub struct CipherDesk<R: RandomSource = OsRandom> {
    rng: R,
}

impl Default for CipherDesk<OsRandom> {
    fn default() -> Self {
        Self::new()
    }
}

impl CipherDesk<OsRandom> {
    pub fn new() -> Self {
        Self { rng: OsRandom }
    }
}

impl<R: RandomSource> CipherDesk<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Encrypts `text` and returns the record describing the operation.
    pub fn encrypt(&self, text: &str, algorithm: Algorithm, key: &str) -> Result<OperationRecord> {
        let output = dispatch::encrypt_text(text, algorithm, key)?;
        Ok(OperationRecord::new(
            OperationKind::Encrypt,
            algorithm,
            text,
            &output,
        ))
    }

    pub fn decrypt(&self, text: &str, algorithm: Algorithm, key: &str) -> Result<OperationRecord> {
        let output = dispatch::decrypt_text(text, algorithm, key)?;
        Ok(OperationRecord::new(
            OperationKind::Decrypt,
            algorithm,
            text,
            &output,
        ))
    }

    pub fn generate_key(&mut self, options: &KeyOptions) -> Result<PasswordCandidate> {
        keygen::generate_secure_key(&mut self.rng, options)
    }

    pub fn generate_passphrase(
        &mut self,
        word_count: usize,
        separator: &str,
        capitalize: bool,
    ) -> Result<Zeroizing<String>> {
        keygen::generate_passphrase(&mut self.rng, word_count, separator, capitalize)
    }

    /// Generates candidates until one reaches `min_level`, giving up after
    /// `attempts` tries and returning the last candidate with its assessment.
    pub fn generate_until(
        &mut self,
        options: &KeyOptions,
        min_level: StrengthLevel,
        attempts: usize,
    ) -> Result<(PasswordCandidate, StrengthAssessment)> {
        let mut best = self.generate_assessed(options)?;
        for _ in 1..attempts {
            if best.1.level >= min_level {
                break;
            }
            best = self.generate_assessed(options)?;
        }
        Ok(best)
    }

    fn generate_assessed(
        &mut self,
        options: &KeyOptions,
    ) -> Result<(PasswordCandidate, StrengthAssessment)> {
        let candidate = self.generate_key(options)?;
        let assessment = strength::assess_key_strength(candidate.as_str());
        Ok((candidate, assessment))
    }

    /// Pure; provided here so callers can stay on one handle.
    pub fn assess(&self, candidate: &str) -> StrengthAssessment {
        strength::assess_key_strength(candidate)
    }
}
