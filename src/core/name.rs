//! Surname and given-name blocks (positions 1-3 and 4-6).

use super::normalize::normalize;

fn is_vowel(c: char) -> bool {
    matches!(c, 'A' | 'E' | 'I' | 'O' | 'U')
}

/// Split a normalized string into (consonants, vowels), each in order of appearance.
fn split_letters(normalized: &str) -> (Vec<char>, Vec<char>) {
    normalized.chars().partition(|&c| !is_vowel(c))
}

/// Consonants, then vowels, then `X` padding, truncated to three letters.
fn fill_block(consonants: &[char], vowels: &[char]) -> String {
    consonants
        .iter()
        .chain(vowels)
        .copied()
        .chain(std::iter::repeat('X'))
        .take(3)
        .collect()
}

/// Three-letter surname block.
///
/// ```
/// use codice_fiscale::surname_code;
///
/// assert_eq!(surname_code("Rossi"), "RSS");
/// assert_eq!(surname_code("Bo"), "BOX");
/// assert_eq!(surname_code("De Luca"), "DLC");
/// ```
pub fn surname_code(surname: &str) -> String {
    let (consonants, vowels) = split_letters(&normalize(surname));
    fill_block(&consonants, &vowels)
}

/// Three-letter given-name block.
///
/// With four or more consonants the 2nd one is skipped (1st, 3rd, 4th);
/// otherwise the surname rule applies.
///
/// ```
/// use codice_fiscale::name_code;
///
/// assert_eq!(name_code("Goffredo"), "GFR");
/// assert_eq!(name_code("Maria"), "MRA");
/// ```
pub fn name_code(name: &str) -> String {
    let (consonants, vowels) = split_letters(&normalize(name));
    if consonants.len() >= 4 {
        [consonants[0], consonants[2], consonants[3]].iter().collect()
    } else {
        fill_block(&consonants, &vowels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surname_three_consonants_ignores_vowels() {
        assert_eq!(surname_code("Rossi"), "RSS");
        assert_eq!(surname_code("Bianchi"), "BNC");
        assert_eq!(surname_code("Strozzi"), "STR");
        assert_eq!(surname_code("Esposito"), "SPS");
    }

    #[test]
    fn surname_short_uses_vowels_then_padding() {
        assert_eq!(surname_code("Bo"), "BOX");
        assert_eq!(surname_code("Fo"), "FOX");
        assert_eq!(surname_code("Neri"), "NRE");
        assert_eq!(surname_code("Ai"), "AIX");
        assert_eq!(surname_code("Oe"), "OEX");
        assert_eq!(surname_code("U"), "UXX");
    }

    #[test]
    fn surname_empty_is_all_padding() {
        assert_eq!(surname_code(""), "XXX");
        assert_eq!(surname_code("'-"), "XXX");
    }

    #[test]
    fn surname_compound_and_accented() {
        assert_eq!(surname_code("De Luca"), "DLC");
        assert_eq!(surname_code("D'Àngelo"), "DNG");
        assert_eq!(surname_code("della valle"), "DLL");
    }

    #[test]
    fn name_four_consonants_skips_second() {
        assert_eq!(name_code("Goffredo"), "GFR");
        assert_eq!(name_code("Giuseppe"), "GPP");
        assert_eq!(name_code("Francesco"), "FNC");
        assert_eq!(name_code("Alessandro"), "LSN");
        assert_eq!(name_code("Mario Rosa"), "MRS");
    }

    #[test]
    fn name_three_consonants_takes_all() {
        assert_eq!(name_code("Carlo"), "CRL");
        assert_eq!(name_code("Carla"), "CRL");
        assert_eq!(name_code("Marco"), "MRC");
    }

    #[test]
    fn name_fallback_rule() {
        assert_eq!(name_code("Maria"), "MRA");
        assert_eq!(name_code("Mario"), "MRA");
        assert_eq!(name_code("Luca"), "LCU");
        assert_eq!(name_code("Anna"), "NNA");
        assert_eq!(name_code("Al"), "LAX");
        assert_eq!(name_code("Ia"), "IAX");
    }

    #[test]
    fn name_compound_counts_all_consonants() {
        // M, R, G, R, Z -> 1st, 3rd, 4th
        assert_eq!(name_code("Maria Grazia"), "MGR");
    }
}
