use chrono::NaiveDate;

use super::place::PlaceCode;
use super::types::{BirthPlace, Identity, Sex};

/// Builder for [`Identity`].
///
/// ```
/// use codice_fiscale::*;
/// use chrono::NaiveDate;
///
/// let identity = IdentityBuilder::new()
///     .surname("Rossi")
///     .name("Mario")
///     .sex(Sex::Male)
///     .birth_date(NaiveDate::from_ymd_opt(1980, 1, 1).unwrap())
///     .born_in_code(PlaceCode::parse("H501").unwrap())
///     .build();
///
/// let code = encode(&identity, &CodeOnlyResolver).unwrap();
/// assert_eq!(code.as_str(), "RSSMRA80A01H501U");
/// ```
#[derive(Debug, Clone, Default)]
pub struct IdentityBuilder {
    identity: Identity,
}

impl IdentityBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn surname(mut self, surname: impl Into<String>) -> Self {
        self.identity.surname = Some(surname.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.identity.name = Some(name.into());
        self
    }

    pub fn sex(mut self, sex: Sex) -> Self {
        self.identity.sex = Some(sex);
        self
    }

    pub fn birth_date(mut self, date: NaiveDate) -> Self {
        self.identity.birth_date = Some(date);
        self
    }

    /// Born in an Italian municipality, looked up by name.
    pub fn born_in(mut self, municipality: impl Into<String>) -> Self {
        self.identity.birth_place = Some(BirthPlace::municipality(municipality));
        self
    }

    /// Born in an Italian municipality, disambiguated by province (e.g. "TO").
    pub fn born_in_province(
        mut self,
        municipality: impl Into<String>,
        province: impl Into<String>,
    ) -> Self {
        self.identity.birth_place = Some(BirthPlace::municipality_in(municipality, province));
        self
    }

    /// Born in the place with this cadastral code.
    pub fn born_in_code(mut self, code: PlaceCode) -> Self {
        self.identity.birth_place = Some(BirthPlace::Code(code));
        self
    }

    /// Born abroad, by ISO 3166-1 alpha-2 code or Italian country name.
    pub fn born_abroad(mut self, country: impl Into<String>) -> Self {
        self.identity.birth_place = Some(BirthPlace::abroad(country));
        self
    }

    pub fn build(self) -> Identity {
        self.identity
    }
}
