//! Control character (position 16).

use super::error::CodeError;

/// Values for characters at odd 1-based positions, indexed by `0-9` then `A-Z`.
static ODD_VALUES: [u8; 36] = [
    1, 0, 5, 7, 9, 13, 15, 17, 19, 21, // 0-9
    1, 0, 5, 7, 9, 13, 15, 17, 19, 21, // A-J
    2, 4, 18, 20, 11, 3, 6, 8, 12, 14, // K-T
    16, 10, 22, 25, 24, 23, // U-Z
];

fn odd_value(c: u8) -> Option<u32> {
    let idx = match c {
        b'0'..=b'9' => c - b'0',
        b'A'..=b'Z' => c - b'A' + 10,
        _ => return None,
    };
    Some(u32::from(ODD_VALUES[usize::from(idx)]))
}

fn even_value(c: u8) -> Option<u32> {
    match c {
        b'0'..=b'9' => Some(u32::from(c - b'0')),
        b'A'..=b'Z' => Some(u32::from(c - b'A')),
        _ => None,
    }
}

/// Checksum over the first 15 bytes, already known to be `[A-Z0-9]`.
pub(crate) fn control_char(code: &[u8]) -> char {
    let sum: u32 = code
        .iter()
        .take(15)
        .enumerate()
        .map(|(i, &c)| {
            // position i+1 is odd when i is even
            let value = if i % 2 == 0 { odd_value(c) } else { even_value(c) };
            value.unwrap_or(0)
        })
        .sum();
    char::from(b'A' + (sum % 26) as u8)
}

/// Compute the control character for a 15-character prefix.
///
/// ```
/// use codice_fiscale::checksum;
///
/// assert_eq!(checksum("RSSMRA80A01H501"), Ok('U'));
/// ```
pub fn checksum(prefix: &str) -> Result<char, CodeError> {
    let len = prefix.chars().count();
    if len != 15 {
        return Err(CodeError::InvalidLength { found: len });
    }
    if let Some((pos, found)) = prefix
        .chars()
        .enumerate()
        .find(|(_, c)| !(c.is_ascii_uppercase() || c.is_ascii_digit()))
    {
        return Err(CodeError::InvalidCharset {
            position: pos + 1,
            found,
        });
    }
    Ok(control_char(prefix.as_bytes()))
}
