//! Heuristic strength assessment for candidate keys.
//!
//! Entropy here is `length * log2(pool)` over the character pools present
//! in the candidate. It estimates guessing difficulty, not the quality of
//! the process that produced the candidate.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

const LOWER_POOL: u32 = 26;
const UPPER_POOL: u32 = 26;
const DIGIT_POOL: u32 = 10;
const SPECIAL_POOL: u32 = 32;

const GUESSES_PER_SECOND: f64 = 1e9;
const SECONDS_PER_YEAR: f64 = 31_536_000.0;

const SEQUENCES: [&str; 12] = [
    "abc", "bcd", "cde", "def", "123", "234", "345", "456", "567", "678", "789", "890",
];

struct Composition {
    lower: bool,
    upper: bool,
    digit: bool,
    special: bool,
}

impl Composition {
    fn of(candidate: &str) -> Self {
        Self {
            lower: candidate.chars().any(|c| c.is_ascii_lowercase()),
            upper: candidate.chars().any(|c| c.is_ascii_uppercase()),
            digit: candidate.chars().any(|c| c.is_ascii_digit()),
            special: candidate.chars().any(|c| !c.is_ascii_alphanumeric()),
        }
    }

    fn pool_size(&self) -> u32 {
        [
            (self.lower, LOWER_POOL),
            (self.upper, UPPER_POOL),
            (self.digit, DIGIT_POOL),
            (self.special, SPECIAL_POOL),
        ]
        .iter()
        .filter(|(present, _)| *present)
        .map(|(_, size)| size)
        .sum()
    }
}

/// Estimated entropy of `candidate` in bits, rounded to the nearest integer.
pub fn calculate_entropy(candidate: &str) -> u32 {
    let pool = Composition::of(candidate).pool_size();
    if pool == 0 {
        return 0;
    }
    let length = candidate.chars().count() as f64;
    (length * f64::from(pool).log2()).round() as u32
}

/// True for an ascending run such as `abc` or `789`, or any character
/// repeated three times in a row.
fn has_common_pattern(candidate: &str) -> bool {
    let lower = candidate.to_lowercase();
    if SEQUENCES.iter().any(|seq| lower.contains(seq)) {
        return true;
    }
    let chars: Vec<char> = candidate.chars().collect();
    chars.windows(3).any(|w| w[0] == w[1] && w[1] == w[2])
}

/// Rough brute-force time at 10^9 guesses per second, assuming the key is
/// found after searching half the space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrackTime {
    Instant,
    Seconds(u64),
    Minutes(u64),
    Hours(u64),
    Days(u64),
    Years(u64),
    ThousandYears(u64),
    MillionYears(u64),
    BillionsOfYears,
}

impl fmt::Display for CrackTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrackTime::Instant => write!(f, "instantly"),
            CrackTime::Seconds(n) => write!(f, "{n} seconds"),
            CrackTime::Minutes(n) => write!(f, "{n} minutes"),
            CrackTime::Hours(n) => write!(f, "{n} hours"),
            CrackTime::Days(n) => write!(f, "{n} days"),
            CrackTime::Years(n) => write!(f, "{n} years"),
            CrackTime::ThousandYears(n) => write!(f, "{n} thousand years"),
            CrackTime::MillionYears(n) => write!(f, "{n} million years"),
            CrackTime::BillionsOfYears => write!(f, "billions of years"),
        }
    }
}

pub fn estimate_crack_time(entropy_bits: u32) -> CrackTime {
    let seconds = 2f64.powf(f64::from(entropy_bits)) / (2.0 * GUESSES_PER_SECOND);
    let n = |divisor: f64| (seconds / divisor).round() as u64;

    if seconds < 1.0 {
        CrackTime::Instant
    } else if seconds < 60.0 {
        CrackTime::Seconds(n(1.0))
    } else if seconds < 3_600.0 {
        CrackTime::Minutes(n(60.0))
    } else if seconds < 86_400.0 {
        CrackTime::Hours(n(3_600.0))
    } else if seconds < SECONDS_PER_YEAR {
        CrackTime::Days(n(86_400.0))
    } else if seconds < SECONDS_PER_YEAR * 100.0 {
        CrackTime::Years(n(SECONDS_PER_YEAR))
    } else if seconds < SECONDS_PER_YEAR * 1e6 {
        CrackTime::ThousandYears(n(SECONDS_PER_YEAR * 1e3))
    } else if seconds < SECONDS_PER_YEAR * 1e9 {
        CrackTime::MillionYears(n(SECONDS_PER_YEAR * 1e6))
    } else {
        CrackTime::BillionsOfYears
    }
}

/// Strength tier, from no key at all up to excellent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StrengthLevel {
    NoKey = 0,
    Weak = 1,
    Medium = 2,
    Good = 3,
    VeryStrong = 4,
    Excellent = 5,
}

impl StrengthLevel {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            StrengthLevel::NoKey => "no key",
            StrengthLevel::Weak => "weak",
            StrengthLevel::Medium => "medium",
            StrengthLevel::Good => "good",
            StrengthLevel::VeryStrong => "very strong",
            StrengthLevel::Excellent => "excellent",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            StrengthLevel::NoKey => "Enter a key",
            StrengthLevel::Weak => "Unsafe, use a longer key",
            StrengthLevel::Medium => "Minimally acceptable",
            StrengthLevel::Good => "Suitable for most purposes",
            StrengthLevel::VeryStrong => "Strong protection for important data",
            StrengthLevel::Excellent => "Practically unbreakable",
        }
    }
}

impl fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrengthAssessment {
    pub level: StrengthLevel,
    pub score: u8,
    pub entropy_bits: u32,
    /// `None` only for an empty candidate.
    pub crack_time: Option<CrackTime>,
}

impl StrengthAssessment {
    pub fn label(&self) -> &'static str {
        self.level.label()
    }

    pub fn description(&self) -> &'static str {
        self.level.description()
    }
}

/// Flat form: numeric level with its label and description, and the crack
/// time as display text (`null` for an empty candidate).
impl Serialize for StrengthAssessment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("StrengthAssessment", 6)?;
        s.serialize_field("level", &self.level.value())?;
        s.serialize_field("label", self.label())?;
        s.serialize_field("description", self.description())?;
        s.serialize_field("score", &self.score)?;
        s.serialize_field("entropy_bits", &self.entropy_bits)?;
        s.serialize_field("crack_time", &self.crack_time.map(|t| t.to_string()))?;
        s.end()
    }
}

/// Scores `candidate` and maps the score and entropy onto a [`StrengthLevel`].
pub fn assess_key_strength(candidate: &str) -> StrengthAssessment {
    if candidate.is_empty() {
        return StrengthAssessment {
            level: StrengthLevel::NoKey,
            score: 0,
            entropy_bits: 0,
            crack_time: None,
        };
    }

    let entropy = calculate_entropy(candidate);
    let length = candidate.chars().count();
    let composition = Composition::of(candidate);
    let pattern = has_common_pattern(candidate);

    let mut score: i32 = 0;
    for threshold in [8, 12, 16] {
        if length >= threshold {
            score += 20;
        }
    }
    if composition.lower && composition.upper {
        score += 15;
    }
    if composition.digit {
        score += 15;
    }
    if composition.special {
        score += 10;
    }
    if pattern {
        score -= 30;
    }
    let score = score.clamp(0, 100);

    let level = if score >= 80 && entropy >= 80 && !pattern {
        StrengthLevel::Excellent
    } else if score >= 60 && entropy >= 60 {
        StrengthLevel::VeryStrong
    } else if score >= 40 && entropy >= 40 {
        StrengthLevel::Good
    } else if score >= 20 && entropy >= 28 {
        StrengthLevel::Medium
    } else {
        StrengthLevel::Weak
    };

    StrengthAssessment {
        level,
        score: score as u8,
        entropy_bits: entropy,
        crack_time: Some(estimate_crack_time(entropy)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entropy_of_single_pool() {
        assert_eq!(calculate_entropy("aaaa"), 19);
        assert_eq!(calculate_entropy("1234"), 13);
    }

    #[test]
    fn entropy_of_mixed_pools() {
        // 26 + 26 + 10 + 32 = 94, 8 * log2(94) = 52.4
        assert_eq!(calculate_entropy("aB3$aB3$"), 52);
        assert_eq!(calculate_entropy(""), 0);
    }

    #[test]
    fn non_ascii_counts_as_special() {
        // one character from the special pool: log2(32) = 5
        assert_eq!(calculate_entropy("ж"), 5);
    }

    #[test]
    fn empty_candidate_has_no_key() {
        let a = assess_key_strength("");
        assert_eq!(a.level, StrengthLevel::NoKey);
        assert_eq!(a.level.value(), 0);
        assert_eq!(a.label(), "no key");
        assert_eq!(a.score, 0);
        assert_eq!(a.crack_time, None);
    }

    #[test]
    fn short_lowercase_is_weak() {
        let a = assess_key_strength("hello");
        assert_eq!(a.level, StrengthLevel::Weak);
        assert_eq!(a.score, 0);
        assert_eq!(a.crack_time, Some(CrackTime::Instant));
    }

    #[test]
    fn patterns_are_penalized() {
        let plain = assess_key_strength("Xq7!Rm2@Lp9#");
        let sequential = assess_key_strength("Xq7!Rm2@Lp9#abc");
        let repeated = assess_key_strength("Xq7!Rm2@Lp9#zzz");
        // length 12: 40 + 15 + 15 + 10
        assert_eq!(plain.score, 80);
        // length 15: 40 + 15 + 15 + 10 - 30
        assert_eq!(sequential.score, 50);
        assert_eq!(repeated.score, 50);
        assert!(has_common_pattern("ABCx"));
        assert!(has_common_pattern("x890"));
        assert!(!has_common_pattern("acegik"));
    }

    #[test]
    fn long_random_key_is_excellent() {
        let a = assess_key_strength("r9#Kd!2vQx@7Lm$Pz4&");
        assert_eq!(a.level, StrengthLevel::Excellent);
        assert_eq!(a.score, 100);
        assert!(a.entropy_bits >= 80);
        assert_eq!(a.crack_time, Some(CrackTime::BillionsOfYears));
    }

    #[test]
    fn pattern_caps_level_below_excellent() {
        let a = assess_key_strength("r9#Kd!2vQx@7Lm$Pz4&aaaa1Q");
        assert_eq!(a.score, 70);
        assert_eq!(a.level, StrengthLevel::VeryStrong);
    }

    #[test]
    fn medium_and_good_tiers() {
        // 8 chars lower+digit: score 35, entropy 41
        let medium = assess_key_strength("k4m9p2x7");
        assert_eq!(medium.score, 35);
        assert_eq!(medium.level, StrengthLevel::Medium);

        // 12 chars lower+upper+digit: score 70, entropy 71
        let strong = assess_key_strength("k4M9p2X7q1Zw");
        assert_eq!(strong.level, StrengthLevel::VeryStrong);

        // 10 chars lower+upper: score 35, entropy 57
        let mixed = assess_key_strength("kqMwpzXtrQ");
        assert_eq!(mixed.level, StrengthLevel::Medium);

        // 12 chars lower+upper: score 55, entropy 68
        let longer = assess_key_strength("kqMwpzXtrQvN");
        assert_eq!(longer.level, StrengthLevel::Good);
    }

    #[test]
    fn assessment_json_shape() {
        let value = serde_json::to_value(assess_key_strength("Xq7!Rm2@Lp9#")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "level": 4,
                "label": "very strong",
                "description": "Strong protection for important data",
                "score": 80,
                "entropy_bits": 79,
                "crack_time": "10 million years",
            })
        );

        let empty = serde_json::to_value(assess_key_strength("")).unwrap();
        assert_eq!(empty["level"], 0);
        assert_eq!(empty["label"], "no key");
        assert!(empty["crack_time"].is_null());
    }

    #[test]
    fn crack_time_units() {
        assert_eq!(estimate_crack_time(0), CrackTime::Instant);
        // 2^35 / 2e9 = 17.2 s
        assert_eq!(estimate_crack_time(35), CrackTime::Seconds(17));
        // 2^40 / 2e9 = 549.8 s
        assert_eq!(estimate_crack_time(40), CrackTime::Minutes(9));
        // 2^45 / 2e9 = 17592 s
        assert_eq!(estimate_crack_time(45), CrackTime::Hours(5));
        // 2^50 / 2e9 = 562950 s
        assert_eq!(estimate_crack_time(50), CrackTime::Days(7));
        // 2^60 / 2e9 = 5.76e8 s = 18.3 y
        assert_eq!(estimate_crack_time(60), CrackTime::Years(18));
        assert_eq!(estimate_crack_time(200), CrackTime::BillionsOfYears);
        assert_eq!(CrackTime::Minutes(9).to_string(), "9 minutes");
    }
}
