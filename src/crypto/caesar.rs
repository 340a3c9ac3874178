//! Caesar shift cipher over the Latin and Russian Cyrillic alphabets.

const LATIN_LEN: i64 = 26;

/// Russian alphabet in collation order, including Ё.
const CYRILLIC_UPPER: [char; 33] = [
    'А', 'Б', 'В', 'Г', 'Д', 'Е', 'Ё', 'Ж', 'З', 'И', 'Й', 'К', 'Л', 'М', 'Н', 'О', 'П', 'Р', 'С',
    'Т', 'У', 'Ф', 'Х', 'Ц', 'Ч', 'Ш', 'Щ', 'Ъ', 'Ы', 'Ь', 'Э', 'Ю', 'Я',
];
const CYRILLIC_LOWER: [char; 33] = [
    'а', 'б', 'в', 'г', 'д', 'е', 'ё', 'ж', 'з', 'и', 'й', 'к', 'л', 'м', 'н', 'о', 'п', 'р', 'с',
    'т', 'у', 'ф', 'х', 'ц', 'ч', 'ш', 'щ', 'ъ', 'ы', 'ь', 'э', 'ю', 'я',
];

fn normalize(shift: i64, modulus: i64) -> usize {
    // rem_euclid is ((shift % m) + m) % m without the intermediate overflow
    shift.rem_euclid(modulus) as usize
}

fn rotate_in(alphabet: &[char; 33], c: char, shift: usize) -> Option<char> {
    let pos = alphabet.iter().position(|&a| a == c)?;
    Some(alphabet[(pos + shift) % alphabet.len()])
}

/// Shifts every Latin and Cyrillic letter forward by `shift`, preserving case.
/// Other characters are copied unchanged.
pub fn encrypt(text: &str, shift: i64) -> String {
    let latin = normalize(shift, LATIN_LEN) as u8;
    let cyrillic = normalize(shift, CYRILLIC_UPPER.len() as i64);

    text.chars()
        .map(|c| {
            if c.is_ascii_uppercase() {
                ((c as u8 - b'A' + latin) % 26 + b'A') as char
            } else if c.is_ascii_lowercase() {
                ((c as u8 - b'a' + latin) % 26 + b'a') as char
            } else {
                rotate_in(&CYRILLIC_UPPER, c, cyrillic)
                    .or_else(|| rotate_in(&CYRILLIC_LOWER, c, cyrillic))
                    .unwrap_or(c)
            }
        })
        .collect()
}

/// Inverse of [`encrypt`].
pub fn decrypt(text: &str, shift: i64) -> String {
    // reduce before negating so i64::MIN cannot overflow;
    // 26 * 33 keeps the residue for both alphabets
    encrypt(text, -(shift % (LATIN_LEN * CYRILLIC_UPPER.len() as i64)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifts_latin_letters() {
        assert_eq!(encrypt("ABC", 3), "DEF");
        assert_eq!(decrypt("DEF", 3), "ABC");
        assert_eq!(encrypt("xyz", 3), "abc");
        assert_eq!(encrypt("Hello", 13), "Uryyb");
    }

    #[test]
    fn negative_and_large_shifts_normalize() {
        assert_eq!(encrypt("DEF", -3), "ABC");
        assert_eq!(encrypt("ABC", 29), "DEF");
        assert_eq!(encrypt("ABC", -29), "XYZ");
    }

    #[test]
    fn non_letters_pass_through() {
        for shift in [-40, -1, 0, 1, 7, 26, 100] {
            assert_eq!(encrypt("123 !? \n\t-_", shift), "123 !? \n\t-_");
        }
    }

    #[test]
    fn shifts_cyrillic_within_33_letters() {
        assert_eq!(encrypt("АБВ", 1), "БВГ");
        assert_eq!(encrypt("Е", 1), "Ё");
        assert_eq!(encrypt("я", 1), "а");
        assert_eq!(encrypt("Я", 2), "Б");
    }

    #[test]
    fn roundtrip_mixed_text() {
        let text = "Привет, World! Ёжик 2024";
        for shift in [-100, -33, -26, -1, 0, 1, 3, 25, 32, 57, i64::MAX, i64::MIN] {
            assert_eq!(decrypt(&encrypt(text, shift), shift), text, "shift {shift}");
        }
    }
}
