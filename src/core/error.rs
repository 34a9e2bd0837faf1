use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::Sex;

/// Identity field a check depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Surname,
    Name,
    Sex,
    BirthDate,
    BirthPlace,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Surname => "surname",
            Self::Name => "name",
            Self::Sex => "sex",
            Self::BirthDate => "birth date",
            Self::BirthPlace => "birth place",
        })
    }
}

/// Errors produced while encoding, decoding or validating a fiscal code.
///
/// The first four variants are structural: once one of them occurs no other
/// check on the code is meaningful. Everything else can be collected
/// together when an identity is validated against a code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CodeError {
    /// The code is not exactly 16 characters long.
    #[error("fiscal code must be 16 characters, got {found}")]
    InvalidLength { found: usize },

    /// A character is outside `[A-Z0-9]` or of the wrong class for its position.
    #[error("invalid character '{found}' at position {position}")]
    InvalidCharset { position: usize, found: char },

    /// Position 9 is not one of the twelve month letters.
    #[error("invalid month letter '{0}'")]
    InvalidMonthCode(char),

    /// Positions 10-11 do not form a day of month (with or without +40).
    #[error("invalid day code {0:02}")]
    InvalidDayCode(u8),

    /// The control character does not match positions 1-15.
    #[error("checksum mismatch: expected '{expected}', found '{found}'")]
    InvalidChecksum { expected: char, found: char },

    /// Positions 1-3 differ from the block derived from the surname.
    #[error("surname block mismatch: expected {expected}, found {found}")]
    SurnameMismatch { expected: String, found: String },

    /// Positions 4-6 differ from the block derived from the given name.
    #[error("name block mismatch: expected {expected}, found {found}")]
    NameMismatch { expected: String, found: String },

    /// The stored year, month or day differs from the birth date.
    #[error("birth date mismatch: expected {expected}, found {found}")]
    DateMismatch { expected: NaiveDate, found: NaiveDate },

    /// The day code says the other sex.
    #[error("sex mismatch: expected {expected}, found {found}")]
    SexMismatch { expected: Sex, found: Sex },

    /// Positions 12-15 hold a different cadastral code.
    #[error("birth place mismatch: expected {expected}, found {found}")]
    PlaceMismatch { expected: String, found: String },

    /// The birth place could not be mapped to a cadastral code.
    #[error("cannot resolve birth place '{0}'")]
    UnresolvedPlace(String),

    /// The cadastral code in the fiscal code is not in the registry.
    #[error("unknown place code '{0}'")]
    UnknownPlaceCode(String),

    /// A field needed for encoding, or listed as required, is absent.
    #[error("missing required field: {0}")]
    MissingRequiredField(Field),
}

impl CodeError {
    /// Whether this error makes every further check on the code meaningless.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::InvalidLength { .. }
                | Self::InvalidCharset { .. }
                | Self::InvalidMonthCode(_)
                | Self::InvalidDayCode(_)
        )
    }

    /// The identity field this error is about, if any.
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::SurnameMismatch { .. } => Some(Field::Surname),
            Self::NameMismatch { .. } => Some(Field::Name),
            Self::DateMismatch { .. } => Some(Field::BirthDate),
            Self::SexMismatch { .. } => Some(Field::Sex),
            Self::PlaceMismatch { .. } | Self::UnresolvedPlace(_) => Some(Field::BirthPlace),
            Self::MissingRequiredField(field) => Some(*field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_classification() {
        assert!(CodeError::InvalidLength { found: 3 }.is_structural());
        assert!(CodeError::InvalidMonthCode('F').is_structural());
        assert!(CodeError::InvalidDayCode(32).is_structural());
        assert!(
            !CodeError::InvalidChecksum {
                expected: 'U',
                found: 'X'
            }
            .is_structural()
        );
        assert!(!CodeError::UnknownPlaceCode("Z999".into()).is_structural());
    }

    #[test]
    fn field_of_mismatch() {
        let err = CodeError::SurnameMismatch {
            expected: "RSS".into(),
            found: "BNC".into(),
        };
        assert_eq!(err.field(), Some(Field::Surname));
        assert_eq!(
            CodeError::MissingRequiredField(Field::BirthDate).field(),
            Some(Field::BirthDate)
        );
        assert_eq!(CodeError::InvalidDayCode(0).field(), None);
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            CodeError::InvalidDayCode(7).to_string(),
            "invalid day code 07"
        );
        assert_eq!(
            CodeError::MissingRequiredField(Field::BirthPlace).to_string(),
            "missing required field: birth place"
        );
    }
}
