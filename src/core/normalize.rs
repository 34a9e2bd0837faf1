//! Name normalization shared by the surname/name encoders and the place registry.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Reduce a surname or given name to the letters `A-Z`.
///
/// Accents are stripped (NFD decomposition, combining marks dropped), a few
/// Latin letters without a decomposition are transliterated, everything is
/// upper-cased and any remaining non-letter (spaces, apostrophes, hyphens,
/// digits) is removed. Compound names therefore collapse into one token.
///
/// ```
/// use codice_fiscale::normalize;
///
/// assert_eq!(normalize("D'Àngelo"), "DANGELO");
/// assert_eq!(normalize("  De   la Cruz "), "DELACRUZ");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.nfd().filter(|c| !is_combining_mark(*c)) {
        match transliterate(c) {
            Some(s) => out.push_str(s),
            None => out.extend(c.to_uppercase().filter(char::is_ascii_uppercase)),
        }
    }
    out
}

/// Letters that NFD leaves untouched.
fn transliterate(c: char) -> Option<&'static str> {
    Some(match c {
        'ß' => "SS",
        'Æ' | 'æ' => "AE",
        'Œ' | 'œ' => "OE",
        'Ø' | 'ø' => "O",
        'Ł' | 'ł' => "L",
        'Đ' | 'đ' => "D",
        'Þ' | 'þ' => "TH",
        _ => return None,
    })
}

/// Clean user-typed fiscal code input: uppercase, ASCII alphanumerics only.
///
/// Importers and forms apply this before lookup; strict parsing never does.
///
/// ```
/// use codice_fiscale::clean_code;
///
/// assert_eq!(clean_code(" rss mra-80a01 h501u "), "RSSMRA80A01H501U");
/// ```
pub fn clean_code(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}
