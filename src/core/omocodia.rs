//! Omocodia: digit-to-letter substitution used to tell apart colliding codes.
//!
//! When two people would receive the same code, the tax office replaces the
//! digits from right to left with letters and recomputes the checksum. A
//! valid code may therefore carry letters where digits are expected.

use super::checksum::control_char;

/// Replacement letters for the digits 0..=9.
pub static OMOCODE_LETTERS: [u8; 10] = *b"LMNPQRSTUV";

/// Zero-based digit positions in substitution order (rightmost first).
pub static OMOCODE_POSITIONS: [usize; 7] = [14, 13, 12, 10, 9, 7, 6];

/// Maximum substitution level.
pub const MAX_OMOCODE_LEVEL: u8 = 7;

/// Digit value of a character in a digit position, accepting substitution letters.
pub(crate) fn digit_value(c: u8, allow_letters: bool) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        _ if allow_letters => OMOCODE_LETTERS
            .iter()
            .position(|&l| l == c)
            .map(|d| d as u8),
        _ => None,
    }
}

/// Number of digit positions holding a substitution letter.
pub(crate) fn level(code: &[u8; 16]) -> u8 {
    OMOCODE_POSITIONS
        .iter()
        .filter(|&&pos| code[pos].is_ascii_uppercase())
        .count() as u8
}

/// Replace every substitution letter with its digit and recompute the checksum.
pub(crate) fn restore(code: &[u8; 16]) -> [u8; 16] {
    let mut out = *code;
    for &pos in &OMOCODE_POSITIONS {
        if let Some(d) = digit_value(out[pos], true) {
            out[pos] = b'0' + d;
        }
    }
    seal(&mut out);
    out
}

/// Substitute the first `level` positions of a restored code and recompute the checksum.
pub(crate) fn substitute(base: &[u8; 16], level: u8) -> [u8; 16] {
    let mut out = *base;
    for &pos in OMOCODE_POSITIONS.iter().take(usize::from(level)) {
        if out[pos].is_ascii_digit() {
            out[pos] = OMOCODE_LETTERS[usize::from(out[pos] - b'0')];
        }
    }
    seal(&mut out);
    out
}

fn seal(code: &mut [u8; 16]) {
    code[15] = control_char(&code[..]) as u8;
}
