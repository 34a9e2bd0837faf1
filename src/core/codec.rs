//! Encoding an identity and decoding a code back into its parts.

use chrono::NaiveDate;

use super::checksum::control_char;
use super::date::{decode_date, encode_date};
use super::error::{CodeError, Field};
use super::name::{name_code, surname_code};
use super::normalize::normalize;
use super::omocodia::{self, digit_value};
use super::place::{Place, PlaceCode, PlaceResolver};
use super::types::{DecodedCode, FiscalCode, Identity, Sex};
use super::validation::ValidationOptions;

/// Zero-based positions that must hold a letter.
const LETTER_POSITIONS: [usize; 9] = [0, 1, 2, 3, 4, 5, 8, 11, 15];

/// A code whose structure has been checked but whose checksum has not.
pub(crate) struct Structure {
    pub bytes: [u8; 16],
    pub birth_date: NaiveDate,
    pub sex: Sex,
    pub place_code: PlaceCode,
}

impl Structure {
    pub fn expected_checksum(&self) -> char {
        control_char(&self.bytes)
    }

    pub fn found_checksum(&self) -> char {
        char::from(self.bytes[15])
    }

    pub fn into_decoded(self) -> DecodedCode {
        let code = FiscalCode::from_bytes(self.bytes);
        DecodedCode {
            surname_block: code.surname_block().to_string(),
            name_block: code.name_block().to_string(),
            birth_date: self.birth_date,
            sex: self.sex,
            place_code: self.place_code,
            omocode_level: omocodia::level(&self.bytes),
            code,
        }
    }
}

/// Length, charset, per-position class, month and day checks.
///
/// Stops at the first failure; every error returned here is structural.
pub(crate) fn check_structure(
    input: &str,
    options: &ValidationOptions,
) -> Result<Structure, CodeError> {
    let len = input.chars().count();
    if len != 16 {
        return Err(CodeError::InvalidLength { found: len });
    }
    if let Some((pos, found)) = input
        .chars()
        .enumerate()
        .find(|(_, c)| !(c.is_ascii_uppercase() || c.is_ascii_digit()))
    {
        return Err(CodeError::InvalidCharset {
            position: pos + 1,
            found,
        });
    }

    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(input.as_bytes());

    for &pos in &LETTER_POSITIONS {
        if !bytes[pos].is_ascii_uppercase() {
            return Err(charset_error(&bytes, pos));
        }
    }
    let digit = |pos: usize| {
        digit_value(bytes[pos], options.allow_omocodia).ok_or_else(|| charset_error(&bytes, pos))
    };

    let yy = digit(6)? * 10 + digit(7)?;
    let raw_day = digit(9)? * 10 + digit(10)?;
    let (birth_date, sex) = decode_date(yy, char::from(bytes[8]), raw_day, options.century)?;

    let place = format!(
        "{}{}{}{}",
        char::from(bytes[11]),
        digit(12)?,
        digit(13)?,
        digit(14)?
    );
    let place_code = PlaceCode::parse(&place).ok_or(CodeError::UnknownPlaceCode(place))?;

    Ok(Structure {
        bytes,
        birth_date,
        sex,
        place_code,
    })
}

fn charset_error(bytes: &[u8; 16], pos: usize) -> CodeError {
    CodeError::InvalidCharset {
        position: pos + 1,
        found: char::from(bytes[pos]),
    }
}

/// Decode a code into its parts after checking structure and checksum.
///
/// ```
/// use codice_fiscale::{Sex, ValidationOptions, decode};
///
/// let decoded = decode("RSSMRA80A01H501U", &ValidationOptions::default()).unwrap();
/// assert_eq!(decoded.sex, Sex::Male);
/// assert_eq!(decoded.place_code.as_str(), "H501");
/// assert_eq!(decoded.birth_date.to_string(), "1980-01-01");
/// ```
pub fn decode(input: &str, options: &ValidationOptions) -> Result<DecodedCode, CodeError> {
    let structure = check_structure(input, options)?;
    let expected = structure.expected_checksum();
    let found = structure.found_checksum();
    if expected != found {
        return Err(CodeError::InvalidChecksum { expected, found });
    }
    Ok(structure.into_decoded())
}

/// Look up the birth place record of a decoded code.
pub fn decode_place<R>(decoded: &DecodedCode, resolver: &R) -> Result<Place, CodeError>
where
    R: PlaceResolver + ?Sized,
{
    resolver
        .resolve_code(&decoded.place_code)
        .ok_or_else(|| CodeError::UnknownPlaceCode(decoded.place_code.to_string()))
}

/// Block for a name field, or `MissingRequiredField` if absent or without letters.
pub(crate) fn required_block(
    value: Option<&str>,
    field: Field,
    block: fn(&str) -> String,
) -> Result<String, CodeError> {
    match value {
        Some(v) if !normalize(v).is_empty() => Ok(block(v)),
        _ => Err(CodeError::MissingRequiredField(field)),
    }
}

/// Derive the fiscal code of a complete identity.
///
/// Fails with [`CodeError::MissingRequiredField`] when a field is absent (or a
/// name has no letters left after normalization) and with
/// [`CodeError::UnresolvedPlace`] when the resolver does not know the birth
/// place.
pub fn encode<R>(identity: &Identity, resolver: &R) -> Result<FiscalCode, CodeError>
where
    R: PlaceResolver + ?Sized,
{
    let surname = required_block(identity.surname.as_deref(), Field::Surname, surname_code)?;
    let name = required_block(identity.name.as_deref(), Field::Name, name_code)?;
    let sex = identity
        .sex
        .ok_or(CodeError::MissingRequiredField(Field::Sex))?;
    let birth_date = identity
        .birth_date
        .ok_or(CodeError::MissingRequiredField(Field::BirthDate))?;
    let place = identity
        .birth_place
        .as_ref()
        .ok_or(CodeError::MissingRequiredField(Field::BirthPlace))?;
    let place_code = resolver
        .resolve_place(place)
        .ok_or_else(|| CodeError::UnresolvedPlace(place.to_string()))?;

    let prefix = format!(
        "{surname}{name}{}{place_code}",
        encode_date(birth_date, sex)
    );
    // every block has a fixed width, so the prefix is always 15 ASCII bytes
    let mut bytes = [0u8; 16];
    bytes[..15].copy_from_slice(prefix.as_bytes());
    bytes[15] = control_char(&bytes) as u8;

    tracing::debug!(place = %place_code, "derived fiscal code");
    Ok(FiscalCode::from_bytes(bytes))
}
