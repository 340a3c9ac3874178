//! Secure password and passphrase generation.
//!
//! Every random decision is drawn from a [`RandomSource`]; if the source
//! fails, generation fails before any output is produced.

mod charset;
mod passphrase;

pub use charset::{AMBIGUOUS, CharClass, CharClassSet, SIMILAR};
pub use passphrase::{
    DEFAULT_SEPARATOR, DEFAULT_WORD_COUNT, WORD_LIST, generate_passphrase,
};

use crate::crypto::RandomSource;
use crate::error::{CryptoError, Result};
use std::fmt;
use tracing::debug;
use zeroize::Zeroizing;

pub const MIN_LENGTH: usize = 4;
pub const MAX_LENGTH: usize = 128;
pub const DEFAULT_LENGTH: usize = 32;

/// Options controlling [`generate_secure_key`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyOptions {
    length: usize,
    classes: CharClassSet,
    exclude_similar: bool,
    exclude_ambiguous: bool,
}

impl Default for KeyOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            classes: CharClassSet::all(),
            exclude_similar: false,
            exclude_ambiguous: false,
        }
    }
}

impl KeyOptions {
    /// `length` is clamped to `[MIN_LENGTH, MAX_LENGTH]`.
    pub fn new(length: usize, classes: CharClassSet) -> Self {
        Self {
            length: length.clamp(MIN_LENGTH, MAX_LENGTH),
            classes,
            ..Self::default()
        }
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length.clamp(MIN_LENGTH, MAX_LENGTH);
        self
    }

    pub fn with_class(mut self, class: CharClass, enabled: bool) -> Self {
        if enabled {
            self.classes.insert(class);
        } else {
            self.classes.remove(class);
        }
        self
    }

    pub fn exclude_similar(mut self, yes: bool) -> Self {
        self.exclude_similar = yes;
        self
    }

    pub fn exclude_ambiguous(mut self, yes: bool) -> Self {
        self.exclude_ambiguous = yes;
        self
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn classes(&self) -> CharClassSet {
        self.classes
    }
}

/// Named option sets offered by the key generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Pin,
    Basic,
    Strong,
    Maximum,
    Memorable,
    Custom,
}

impl Preset {
    pub fn options(self) -> KeyOptions {
        use CharClass::*;
        let (length, classes): (usize, &[CharClass]) = match self {
            Preset::Pin => (6, &[Digits]),
            Preset::Basic => (12, &[Lowercase, Uppercase, Digits]),
            Preset::Strong => (16, &CharClass::ALL),
            Preset::Maximum => (32, &CharClass::ALL),
            Preset::Memorable => (16, &[Lowercase, Uppercase, Digits]),
            Preset::Custom => (20, &CharClass::ALL),
        };
        KeyOptions::new(length, classes.iter().copied().collect())
    }
}

/// A generated password together with the options that produced it.
#[derive(Clone)]
pub struct PasswordCandidate {
    secret: Zeroizing<String>,
    options: KeyOptions,
}

impl fmt::Debug for PasswordCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordCandidate")
            .field("secret", &"<redacted>")
            .field("options", &self.options)
            .finish()
    }
}

impl PasswordCandidate {
    pub fn as_str(&self) -> &str {
        &self.secret
    }

    pub fn options(&self) -> &KeyOptions {
        &self.options
    }

    pub fn into_secret(self) -> Zeroizing<String> {
        self.secret
    }
}

/// Generates a random password.
///
/// One character is drawn from each enabled class first so every class is
/// represented, the remainder comes from the union of all enabled classes,
/// and the result is shuffled so the guaranteed characters do not sit at
/// predictable positions.
///
/// # Errors
///
/// - [`CryptoError::EmptyCharset`] if no class is enabled
/// - [`CryptoError::RngUnavailable`] if the random source fails
pub fn generate_secure_key<R: RandomSource>(
    rng: &mut R,
    options: &KeyOptions,
) -> Result<PasswordCandidate> {
    let required: Vec<Vec<char>> = options
        .classes
        .iter()
        .map(|class| class.charset(options.exclude_similar, options.exclude_ambiguous))
        .filter(|set| !set.is_empty())
        .collect();

    if required.is_empty() {
        return Err(CryptoError::EmptyCharset);
    }

    let combined: Vec<char> = required.iter().flatten().copied().collect();
    let length = options.length;
    debug!(
        length,
        classes = required.len(),
        pool = combined.len(),
        "generating secure key"
    );

    let mut chars = Zeroizing::new(Vec::with_capacity(length));
    for set in required.iter().take(length) {
        chars.push(set[rng.index(set.len())?]);
    }
    while chars.len() < length {
        chars.push(combined[rng.index(combined.len())?]);
    }
    rng.shuffle(chars.as_mut_slice())?;

    Ok(PasswordCandidate {
        secret: Zeroizing::new(chars.iter().collect()),
        options: options.clone(),
    })
}
