//! Character classes used by the password generator.

use serde::{Deserialize, Serialize};
use std::fmt;

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const SPECIAL: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Characters that are easy to confuse with one another in many fonts.
pub const SIMILAR: &str = "il1o0ILO";
/// Punctuation that tends to break quoting in shells and config files.
pub const AMBIGUOUS: &str = "{}[]()/\\'\"~,;:.<>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharClass {
    Lowercase,
    Uppercase,
    Digits,
    Special,
}

impl CharClass {
    /// All classes in the order their guaranteed characters are drawn.
    pub const ALL: [CharClass; 4] = [
        CharClass::Lowercase,
        CharClass::Uppercase,
        CharClass::Digits,
        CharClass::Special,
    ];

    fn bit(self) -> u8 {
        match self {
            CharClass::Lowercase => 0b0001,
            CharClass::Uppercase => 0b0010,
            CharClass::Digits => 0b0100,
            CharClass::Special => 0b1000,
        }
    }

    fn base(self) -> &'static str {
        match self {
            CharClass::Lowercase => LOWERCASE,
            CharClass::Uppercase => UPPERCASE,
            CharClass::Digits => DIGITS,
            CharClass::Special => SPECIAL,
        }
    }

    /// Characters of this class after applying the exclusion toggles.
    pub fn charset(self, exclude_similar: bool, exclude_ambiguous: bool) -> Vec<char> {
        self.base()
            .chars()
            .filter(|c| !(exclude_similar && SIMILAR.contains(*c)))
            .filter(|c| !(exclude_ambiguous && AMBIGUOUS.contains(*c)))
            .collect()
    }

    /// Whether `c` belongs to this class's full alphabet.
    pub fn contains(self, c: char) -> bool {
        self.base().contains(c)
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CharClass::Lowercase => "lowercase",
            CharClass::Uppercase => "uppercase",
            CharClass::Digits => "digits",
            CharClass::Special => "special",
        };
        f.write_str(name)
    }
}

/// A set of [`CharClass`] values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharClassSet(u8);

impl CharClassSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        CharClass::ALL.into_iter().collect()
    }

    pub fn insert(&mut self, class: CharClass) {
        self.0 |= class.bit();
    }

    pub fn remove(&mut self, class: CharClass) {
        self.0 &= !class.bit();
    }

    pub fn contains(&self, class: CharClass) -> bool {
        self.0 & class.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Enabled classes in [`CharClass::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = CharClass> + '_ {
        CharClass::ALL.into_iter().filter(|c| self.contains(*c))
    }
}

impl FromIterator<CharClass> for CharClassSet {
    fn from_iter<I: IntoIterator<Item = CharClass>>(iter: I) -> Self {
        let mut set = Self::empty();
        for class in iter {
            set.insert(class);
        }
        set
    }
}
