use crate::crypto::RandomSource;
use crate::error::Result;
use tracing::debug;
use zeroize::Zeroizing;

pub const DEFAULT_WORD_COUNT: usize = 4;
pub const DEFAULT_SEPARATOR: &str = "-";

/// Fixed word list used for passphrases (24 words, ~4.58 bits each).
pub const WORD_LIST: [&str; 24] = [
    "apple", "banana", "cherry", "dragon", "elephant", "forest", "garden", "harbor", "island",
    "jungle", "kingdom", "lion", "mountain", "notebook", "ocean", "palace", "queen", "river",
    "sunset", "thunder", "universe", "village", "wizard", "yellow",
];

fn capitalized(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Joins `word_count` uniformly drawn words with `separator`.
///
/// # Errors
///
/// Returns [`CryptoError::RngUnavailable`](crate::CryptoError::RngUnavailable)
/// if the random source fails.
pub fn generate_passphrase<R: RandomSource>(
    rng: &mut R,
    word_count: usize,
    separator: &str,
    capitalize: bool,
) -> Result<Zeroizing<String>> {
    debug!(word_count, capitalize, "generating passphrase");

    let mut words = Vec::with_capacity(word_count);
    for _ in 0..word_count {
        let word = WORD_LIST[rng.index(WORD_LIST.len())?];
        words.push(if capitalize {
            capitalized(word)
        } else {
            word.to_string()
        });
    }

    Ok(Zeroizing::new(words.join(separator)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::OsRandom;
    use crate::crypto::random::testing::{Scripted, Unavailable};
    use crate::error::CryptoError;

    #[test]
    fn uses_words_from_list() {
        let phrase = generate_passphrase(&mut OsRandom, 6, " ", false).unwrap();
        let words: Vec<&str> = phrase.split(' ').collect();
        assert_eq!(words.len(), 6);
        assert!(words.iter().all(|w| WORD_LIST.contains(w)));
    }

    #[test]
    fn capitalizes_and_joins() {
        let mut rng = Scripted::new(vec![0, 23, 11]);
        let phrase = generate_passphrase(&mut rng, 3, "-", true).unwrap();
        assert_eq!(phrase.as_str(), "Apple-Yellow-Lion");
    }

    #[test]
    fn zero_words_is_empty() {
        let phrase = generate_passphrase(&mut OsRandom, 0, "-", true).unwrap();
        assert!(phrase.is_empty());
    }

    #[test]
    fn missing_rng_fails() {
        assert_eq!(
            generate_passphrase(&mut Unavailable, 4, "-", true).map(|p| p.to_string()),
            Err(CryptoError::RngUnavailable)
        );
    }
}
