use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::codec;
use super::error::CodeError;
use super::omocodia::{self, MAX_OMOCODE_LEVEL};
use super::place::PlaceCode;
use super::validation::ValidationOptions;

/// Sex as recorded in the fiscal code (day +40 for female).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Male => "M",
            Self::Female => "F",
        })
    }
}

/// Where a person was born, as known to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BirthPlace {
    /// Italian municipality by name, optionally narrowed by province abbreviation.
    Municipality {
        name: String,
        province: Option<String>,
    },
    /// Cadastral code already known to the caller.
    Code(PlaceCode),
    /// Born abroad; `country` is an ISO 3166-1 alpha-2 code or an Italian country name.
    Abroad { country: String },
}

impl BirthPlace {
    pub fn municipality(name: impl Into<String>) -> Self {
        Self::Municipality {
            name: name.into(),
            province: None,
        }
    }

    pub fn municipality_in(name: impl Into<String>, province: impl Into<String>) -> Self {
        Self::Municipality {
            name: name.into(),
            province: Some(province.into()),
        }
    }

    pub fn abroad(country: impl Into<String>) -> Self {
        Self::Abroad {
            country: country.into(),
        }
    }
}

impl fmt::Display for BirthPlace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Municipality {
                name,
                province: Some(province),
            } => write!(f, "{name} ({province})"),
            Self::Municipality { name, .. } => f.write_str(name),
            Self::Code(code) => write!(f, "{code}"),
            Self::Abroad { country } => write!(f, "{country} (abroad)"),
        }
    }
}

/// Personal data a fiscal code is derived from.
///
/// Every field is optional: encoding needs all of them, validation checks
/// only the ones present (unless
/// [`ValidationOptions::required`] says otherwise).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub surname: Option<String>,
    pub name: Option<String>,
    pub sex: Option<Sex>,
    pub birth_date: Option<NaiveDate>,
    pub birth_place: Option<BirthPlace>,
}

impl Identity {
    /// Identity with every field set.
    pub fn new(
        surname: impl Into<String>,
        name: impl Into<String>,
        sex: Sex,
        birth_date: NaiveDate,
        birth_place: BirthPlace,
    ) -> Self {
        Self {
            surname: Some(surname.into()),
            name: Some(name.into()),
            sex: Some(sex),
            birth_date: Some(birth_date),
            birth_place: Some(birth_place),
        }
    }
}

/// A structurally valid 16-character fiscal code with a correct checksum.
///
/// Obtained from [`encode`](crate::encode) or by parsing; parsing applies
/// the default [`ValidationOptions`] (omocodia accepted).
///
/// ```
/// use codice_fiscale::FiscalCode;
///
/// let code: FiscalCode = "RSSMRA80A01H501U".parse().unwrap();
/// assert_eq!(code.surname_block(), "RSS");
/// assert!("RSSMRA80A01H501X".parse::<FiscalCode>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FiscalCode(String);

impl FiscalCode {
    /// Parse with explicit options. Returns the first error found.
    pub fn parse_with(input: &str, options: &ValidationOptions) -> Result<Self, CodeError> {
        codec::decode(input, options).map(|decoded| decoded.code)
    }

    /// Bytes must be 16 ASCII characters with a matching checksum.
    pub(crate) fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes.iter().map(|&b| char::from(b)).collect())
    }

    pub(crate) fn to_bytes(&self) -> [u8; 16] {
        let mut out = [0u8; 16];
        out.copy_from_slice(self.0.as_bytes());
        out
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Positions 1-3.
    pub fn surname_block(&self) -> &str {
        &self.0[..3]
    }

    /// Positions 4-6.
    pub fn name_block(&self) -> &str {
        &self.0[3..6]
    }

    /// Positions 7-11 as written (may contain substitution letters).
    pub fn date_block(&self) -> &str {
        &self.0[6..11]
    }

    /// Positions 12-15 as written (may contain substitution letters).
    pub fn place_block(&self) -> &str {
        &self.0[11..15]
    }

    /// Position 16.
    pub fn control_char(&self) -> char {
        char::from(self.0.as_bytes()[15])
    }

    /// Number of digit positions replaced by omocodia letters (0..=7).
    pub fn omocode_level(&self) -> u8 {
        omocodia::level(&self.to_bytes())
    }

    /// The code with every omocodia letter turned back into its digit.
    pub fn base(&self) -> Self {
        Self::from_bytes(omocodia::restore(&self.to_bytes()))
    }

    /// The omocode variant at `level` (clamped to 7), derived from [`base`](Self::base).
    ///
    /// ```
    /// use codice_fiscale::FiscalCode;
    ///
    /// let code: FiscalCode = "RSSMRA80A01H501U".parse().unwrap();
    /// let variant = code.omocode(1);
    /// assert_eq!(&variant.as_str()[..15], "RSSMRA80A01H50M");
    /// assert_eq!(variant.base(), code);
    /// ```
    pub fn omocode(&self, level: u8) -> Self {
        let base = omocodia::restore(&self.to_bytes());
        Self::from_bytes(omocodia::substitute(&base, level.min(MAX_OMOCODE_LEVEL)))
    }

    /// Whether two codes identify the same base code (ignoring omocodia).
    pub fn same_person(&self, other: &Self) -> bool {
        self.base() == other.base()
    }
}

impl fmt::Display for FiscalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FiscalCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for FiscalCode {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, &ValidationOptions::default())
    }
}

impl TryFrom<String> for FiscalCode {
    type Error = CodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FiscalCode> for String {
    fn from(code: FiscalCode) -> Self {
        code.0
    }
}

/// Everything that can be read back out of a fiscal code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedCode {
    pub code: FiscalCode,
    pub surname_block: String,
    pub name_block: String,
    /// Full birth date, century inferred by the [`CenturyPolicy`](crate::CenturyPolicy) in use.
    pub birth_date: NaiveDate,
    pub sex: Sex,
    /// Place code with omocodia letters restored to digits.
    pub place_code: PlaceCode,
    pub omocode_level: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks() {
        let code: FiscalCode = "BNCMRA85H55F205Q".parse().unwrap();
        assert_eq!(code.surname_block(), "BNC");
        assert_eq!(code.name_block(), "MRA");
        assert_eq!(code.date_block(), "85H55");
        assert_eq!(code.place_block(), "F205");
        assert_eq!(code.control_char(), 'Q');
        assert_eq!(code.omocode_level(), 0);
    }

    #[test]
    fn omocode_variants_share_base() {
        let code: FiscalCode = "RSSMRA80A01H501U".parse().unwrap();
        for level in 0..=7 {
            let variant = code.omocode(level);
            assert_eq!(variant.omocode_level(), level);
            assert!(variant.same_person(&code));
            let reparsed: FiscalCode = variant.as_str().parse().unwrap();
            assert_eq!(reparsed, variant);
        }
        assert_eq!(code.omocode(20), code.omocode(7));
    }

    #[test]
    fn serde_as_string() {
        let code: FiscalCode = "RSSMRA80A01H501U".parse().unwrap();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"RSSMRA80A01H501U\"");
        let back: FiscalCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, code);
        assert!(serde_json::from_str::<FiscalCode>("\"RSSMRA80A01H501X\"").is_err());
    }

    #[test]
    fn sex_serde_letters() {
        assert_eq!(serde_json::to_string(&Sex::Female).unwrap(), "\"F\"");
        assert_eq!(serde_json::from_str::<Sex>("\"M\"").unwrap(), Sex::Male);
    }

    #[test]
    fn birth_place_display() {
        assert_eq!(BirthPlace::municipality("Roma").to_string(), "Roma");
        assert_eq!(
            BirthPlace::municipality_in("Samone", "TO").to_string(),
            "Samone (TO)"
        );
        assert_eq!(BirthPlace::abroad("US").to_string(), "US (abroad)");
    }
}
