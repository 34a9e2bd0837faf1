use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::error::CodeError;
use super::types::BirthPlace;

/// Four-character cadastral code: one uppercase letter followed by three digits.
///
/// Codes starting with `Z` identify foreign countries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlaceCode(String);

impl PlaceCode {
    /// Parse a cadastral code, trimming and upper-casing the input.
    ///
    /// ```
    /// use codice_fiscale::PlaceCode;
    ///
    /// assert_eq!(PlaceCode::parse(" h501").unwrap().as_str(), "H501");
    /// assert!(PlaceCode::parse("H50").is_none());
    /// assert!(PlaceCode::parse("1501").is_none());
    /// ```
    pub fn parse(input: &str) -> Option<Self> {
        let code = input.trim().to_ascii_uppercase();
        let bytes = code.as_bytes();
        let valid = bytes.len() == 4
            && bytes[0].is_ascii_uppercase()
            && bytes[1..].iter().all(u8::is_ascii_digit);
        valid.then_some(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this code belongs to the foreign-country (`Z`) scheme.
    pub fn is_foreign(&self) -> bool {
        self.0.starts_with('Z')
    }
}

impl fmt::Display for PlaceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PlaceCode {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CodeError::UnknownPlaceCode(s.to_string()))
    }
}

impl TryFrom<String> for PlaceCode {
    type Error = CodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PlaceCode> for String {
    fn from(code: PlaceCode) -> Self {
        code.0
    }
}

/// A municipality or foreign country with its cadastral code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    /// Official name (Italian denomination for municipalities).
    pub name: String,
    /// Cadastral code.
    pub code: PlaceCode,
    /// Two-letter province abbreviation (sigla automobilistica).
    #[serde(default)]
    pub province: Option<String>,
    /// ISTAT municipality code.
    #[serde(default)]
    pub istat_code: Option<String>,
    /// Postal code.
    #[serde(default)]
    pub cap: Option<String>,
    /// ISO 3166-1 alpha-2 code, foreign countries only.
    #[serde(default)]
    pub country: Option<String>,
    /// Suppressed municipalities stay resolvable by code but lose name lookups to active ones.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Place {
    /// Active municipality with a province.
    pub fn municipality(name: impl Into<String>, code: PlaceCode, province: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code,
            province: Some(province.into()),
            istat_code: None,
            cap: None,
            country: None,
            active: true,
        }
    }

    /// Foreign country entry.
    pub fn foreign(name: impl Into<String>, code: PlaceCode, country: Option<String>) -> Self {
        Self {
            name: name.into(),
            code,
            province: None,
            istat_code: None,
            cap: None,
            country,
            active: true,
        }
    }

    /// Display label, e.g. `Roma (RM)`.
    pub fn label(&self) -> String {
        match &self.province {
            Some(province) if !province.is_empty() => format!("{} ({})", self.name, province),
            _ => self.name.clone(),
        }
    }

    pub fn is_foreign(&self) -> bool {
        self.code.is_foreign()
    }
}

/// Read-only place lookup consumed by the codec.
///
/// Implementations are expected to answer from memory; the codec calls them
/// synchronously and never retries.
pub trait PlaceResolver {
    /// Cadastral code for a birth place, or `None` if unknown or ambiguous.
    fn resolve_place(&self, place: &BirthPlace) -> Option<PlaceCode>;

    /// Place record for a cadastral code.
    fn resolve_code(&self, code: &PlaceCode) -> Option<Place>;
}

impl<T: PlaceResolver + ?Sized> PlaceResolver for &T {
    fn resolve_place(&self, place: &BirthPlace) -> Option<PlaceCode> {
        (**self).resolve_place(place)
    }

    fn resolve_code(&self, code: &PlaceCode) -> Option<Place> {
        (**self).resolve_code(code)
    }
}

impl<T: PlaceResolver + ?Sized> PlaceResolver for Arc<T> {
    fn resolve_place(&self, place: &BirthPlace) -> Option<PlaceCode> {
        (**self).resolve_place(place)
    }

    fn resolve_code(&self, code: &PlaceCode) -> Option<Place> {
        (**self).resolve_code(code)
    }
}

/// Resolver that only accepts [`BirthPlace::Code`] and knows no place records.
///
/// Useful when the caller already stores cadastral codes and has no registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeOnlyResolver;

impl PlaceResolver for CodeOnlyResolver {
    fn resolve_place(&self, place: &BirthPlace) -> Option<PlaceCode> {
        match place {
            BirthPlace::Code(code) => Some(code.clone()),
            _ => None,
        }
    }

    fn resolve_code(&self, _code: &PlaceCode) -> Option<Place> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_code_parse() {
        assert_eq!(PlaceCode::parse("H501").unwrap().as_str(), "H501");
        assert_eq!(PlaceCode::parse("z404").unwrap().as_str(), "Z404");
        assert!(PlaceCode::parse("").is_none());
        assert!(PlaceCode::parse("H5011").is_none());
        assert!(PlaceCode::parse("HH01").is_none());
        assert!(PlaceCode::parse("H5O1").is_none());
    }

    #[test]
    fn place_code_from_str_error() {
        assert_eq!(
            "XX".parse::<PlaceCode>(),
            Err(CodeError::UnknownPlaceCode("XX".into()))
        );
    }

    #[test]
    fn foreign_scheme() {
        assert!(PlaceCode::parse("Z404").unwrap().is_foreign());
        assert!(!PlaceCode::parse("H501").unwrap().is_foreign());
    }

    #[test]
    fn label_with_and_without_province() {
        let roma = Place::municipality("Roma", PlaceCode::parse("H501").unwrap(), "RM");
        assert_eq!(roma.label(), "Roma (RM)");
        let usa = Place::foreign("Stati Uniti", PlaceCode::parse("Z404").unwrap(), None);
        assert_eq!(usa.label(), "Stati Uniti");
    }

    #[test]
    fn code_only_resolver() {
        let code = PlaceCode::parse("F205").unwrap();
        let resolver = CodeOnlyResolver;
        assert_eq!(
            resolver.resolve_place(&BirthPlace::Code(code.clone())),
            Some(code.clone())
        );
        assert_eq!(resolver.resolve_place(&BirthPlace::municipality("Milano")), None);
        assert_eq!(resolver.resolve_code(&code), None);
    }

    #[test]
    fn place_serde_defaults() {
        let place: Place = serde_json::from_str(r#"{"name":"Roma","code":"h501"}"#).unwrap();
        assert_eq!(place.code.as_str(), "H501");
        assert!(place.active);
        assert_eq!(place.province, None);

        let err = serde_json::from_str::<Place>(r#"{"name":"Roma","code":"ROMA"}"#);
        assert!(err.is_err());
    }
}
