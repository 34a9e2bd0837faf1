use serde::{Deserialize, Serialize};

use super::codec::{check_structure, required_block};
use super::date::{CenturyPolicy, encode_date};
use super::error::{CodeError, Field};
use super::name::{name_code, surname_code};
use super::place::PlaceResolver;
use super::types::{DecodedCode, Identity};

/// Runtime options for decoding and validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOptions {
    /// How two-digit years are expanded.
    pub century: CenturyPolicy,
    /// Accept omocodia letters in digit positions.
    pub allow_omocodia: bool,
    /// Return after the first non-structural error instead of collecting all.
    pub stop_at_first: bool,
    /// Identity fields whose absence is itself an error.
    pub required: Vec<Field>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            century: CenturyPolicy::default(),
            allow_omocodia: true,
            stop_at_first: false,
            required: Vec::new(),
        }
    }
}

/// Builder for [`ValidationOptions`].
///
/// # Example
///
/// ```
/// use codice_fiscale::{CenturyPolicy, Field, ValidationOptionsBuilder};
///
/// let options = ValidationOptionsBuilder::new()
///     .century(CenturyPolicy::Twentieth)
///     .require(Field::BirthDate)
///     .build();
/// assert!(options.allow_omocodia);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ValidationOptionsBuilder {
    options: ValidationOptions,
}

impl ValidationOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn century(mut self, policy: CenturyPolicy) -> Self {
        self.options.century = policy;
        self
    }

    pub fn allow_omocodia(mut self, allow: bool) -> Self {
        self.options.allow_omocodia = allow;
        self
    }

    pub fn stop_at_first(mut self, stop: bool) -> Self {
        self.options.stop_at_first = stop;
        self
    }

    /// Make an identity field mandatory (reported as `MissingRequiredField`).
    pub fn require(mut self, field: Field) -> Self {
        if !self.options.required.contains(&field) {
            self.options.required.push(field);
        }
        self
    }

    /// Make every identity field mandatory.
    pub fn require_all(self) -> Self {
        [
            Field::Surname,
            Field::Name,
            Field::Sex,
            Field::BirthDate,
            Field::BirthPlace,
        ]
        .into_iter()
        .fold(self, Self::require)
    }

    pub fn build(self) -> ValidationOptions {
        self.options
    }
}

/// Last stage a validation run passed. `Done` only when nothing cut it short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    NotStarted,
    FormatChecked,
    ChecksumChecked,
    FieldsChecked,
    Done,
}

/// Outcome of [`validate_with`]: the stage reached, every error found and,
/// when structure and checksum are sound, the decoded parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub stage: Stage,
    pub errors: Vec<CodeError>,
    pub decoded: Option<DecodedCode>,
}

impl ValidationReport {
    fn new() -> Self {
        Self {
            stage: Stage::NotStarted,
            errors: Vec::new(),
            decoded: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty() && self.decoded.is_some()
    }

    /// Whether the run was cut short by a structural error.
    pub fn is_structural_failure(&self) -> bool {
        self.errors.iter().any(CodeError::is_structural)
    }

    pub fn into_result(self) -> Result<DecodedCode, Vec<CodeError>> {
        match self.decoded {
            Some(decoded) if self.errors.is_empty() => Ok(decoded),
            _ => Err(self.errors),
        }
    }

    /// Record an error; true when the run should stop.
    fn push(&mut self, error: CodeError, options: &ValidationOptions) -> bool {
        self.errors.push(error);
        options.stop_at_first
    }

    fn finish(self) -> Self {
        tracing::debug!(
            stage = ?self.stage,
            valid = self.errors.is_empty(),
            errors = self.errors.len(),
            "fiscal code validated"
        );
        self
    }
}

/// Validate a code, optionally against an identity, with default options.
///
/// Without an identity only structure and checksum are checked. With one,
/// every present field is compared with the code and all mismatches are
/// returned together.
///
/// ```
/// use chrono::NaiveDate;
/// use codice_fiscale::*;
///
/// let identity = IdentityBuilder::new()
///     .surname("Rossi")
///     .name("Mario")
///     .birth_date(NaiveDate::from_ymd_opt(1980, 1, 1).unwrap())
///     .build();
/// assert!(validate("RSSMRA80A01H501U", Some(&identity), &CodeOnlyResolver).is_ok());
/// ```
pub fn validate<R>(
    code: &str,
    identity: Option<&Identity>,
    resolver: &R,
) -> Result<DecodedCode, Vec<CodeError>>
where
    R: PlaceResolver + ?Sized,
{
    validate_with(code, identity, resolver, &ValidationOptions::default()).into_result()
}

/// Validate a code and return the full report.
pub fn validate_with<R>(
    code: &str,
    identity: Option<&Identity>,
    resolver: &R,
    options: &ValidationOptions,
) -> ValidationReport
where
    R: PlaceResolver + ?Sized,
{
    let mut report = ValidationReport::new();

    let structure = match check_structure(code, options) {
        Ok(structure) => structure,
        Err(error) => {
            report.errors.push(error);
            return report.finish();
        }
    };
    report.stage = Stage::FormatChecked;

    let expected = structure.expected_checksum();
    let found = structure.found_checksum();
    let mut decoded = structure.into_decoded();
    if let Some(identity) = identity {
        settle_century(&mut decoded, identity);
    }
    if expected == found {
        report.decoded = Some(decoded.clone());
    } else if report.push(CodeError::InvalidChecksum { expected, found }, options) {
        return report.finish();
    }
    report.stage = Stage::ChecksumChecked;

    if let Some(identity) = identity {
        for error in field_errors(&decoded, identity, resolver, options) {
            if report.push(error, options) {
                return report.finish();
            }
        }
        report.stage = Stage::FieldsChecked;
    }

    report.stage = Stage::Done;
    report.finish()
}

/// Take the century from the identity when its date matches the stored yy/month/day.
fn settle_century(decoded: &mut DecodedCode, identity: &Identity) {
    let Some(birth_date) = identity.birth_date else {
        return;
    };
    if birth_date != decoded.birth_date
        && encode_date(birth_date, decoded.sex) == encode_date(decoded.birth_date, decoded.sex)
    {
        tracing::debug!(
            inferred = %decoded.birth_date,
            %birth_date,
            "birth century taken from identity"
        );
        decoded.birth_date = birth_date;
    }
}

/// Compare every identity field with the decoded code.
fn field_errors<R>(
    decoded: &DecodedCode,
    identity: &Identity,
    resolver: &R,
    options: &ValidationOptions,
) -> Vec<CodeError>
where
    R: PlaceResolver + ?Sized,
{
    let mut errors = Vec::new();
    let required = |field: Field| options.required.contains(&field);

    check_block(
        identity.surname.as_deref(),
        Field::Surname,
        surname_code,
        &decoded.surname_block,
        required(Field::Surname),
        &mut errors,
    );
    check_block(
        identity.name.as_deref(),
        Field::Name,
        name_code,
        &decoded.name_block,
        required(Field::Name),
        &mut errors,
    );

    match identity.birth_date {
        Some(expected) => {
            // compare the stored yy/month/day, the decoded century is only inferred
            let stored = encode_date(expected, decoded.sex);
            let found = encode_date(decoded.birth_date, decoded.sex);
            if stored != found {
                errors.push(CodeError::DateMismatch {
                    expected,
                    found: decoded.birth_date,
                });
            }
        }
        None if required(Field::BirthDate) => {
            errors.push(CodeError::MissingRequiredField(Field::BirthDate));
        }
        None => {}
    }

    match identity.sex {
        Some(expected) if expected != decoded.sex => errors.push(CodeError::SexMismatch {
            expected,
            found: decoded.sex,
        }),
        None if required(Field::Sex) => errors.push(CodeError::MissingRequiredField(Field::Sex)),
        _ => {}
    }

    match &identity.birth_place {
        Some(place) => match resolver.resolve_place(place) {
            Some(expected) if expected != decoded.place_code => {
                errors.push(CodeError::PlaceMismatch {
                    expected: expected.to_string(),
                    found: decoded.place_code.to_string(),
                })
            }
            Some(_) => {}
            None => errors.push(CodeError::UnresolvedPlace(place.to_string())),
        },
        None if required(Field::BirthPlace) => {
            errors.push(CodeError::MissingRequiredField(Field::BirthPlace));
        }
        None => {}
    }

    errors
}

fn check_block(
    value: Option<&str>,
    field: Field,
    block: fn(&str) -> String,
    found: &str,
    required: bool,
    errors: &mut Vec<CodeError>,
) {
    if value.is_none() && !required {
        return;
    }
    match required_block(value, field, block) {
        Ok(expected) if expected != found => errors.push(match field {
            Field::Surname => CodeError::SurnameMismatch {
                expected,
                found: found.to_string(),
            },
            _ => CodeError::NameMismatch {
                expected,
                found: found.to_string(),
            },
        }),
        Ok(_) => {}
        Err(missing) => errors.push(missing),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::core::place::{CodeOnlyResolver, PlaceCode};
    use crate::core::types::{BirthPlace, Sex};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn mario() -> Identity {
        Identity::new(
            "Rossi",
            "Mario",
            Sex::Male,
            date(1980, 1, 1),
            BirthPlace::Code(PlaceCode::parse("H501").unwrap()),
        )
    }

    #[test]
    fn valid_without_identity() {
        let report = validate_with(
            "RSSMRA80A01H501U",
            None,
            &CodeOnlyResolver,
            &ValidationOptions::default(),
        );
        assert!(report.is_valid());
        assert_eq!(report.stage, Stage::Done);
    }

    #[test]
    fn valid_with_identity() {
        let decoded = validate("RSSMRA80A01H501U", Some(&mario()), &CodeOnlyResolver).unwrap();
        assert_eq!(decoded.birth_date, date(1980, 1, 1));
    }

    #[test]
    fn structural_failure_stops_immediately() {
        let report = validate_with(
            "RSSMRA80A01",
            Some(&mario()),
            &CodeOnlyResolver,
            &ValidationOptions::default(),
        );
        assert_eq!(report.errors, vec![CodeError::InvalidLength { found: 11 }]);
        assert_eq!(report.stage, Stage::NotStarted);
        assert!(report.is_structural_failure());
        assert!(report.decoded.is_none());
    }

    #[test]
    fn checksum_and_fields_accumulate() {
        let mut other = mario();
        other.surname = Some("Bianchi".into());
        let errors = validate("RSSMRA80A01H501X", Some(&other), &CodeOnlyResolver).unwrap_err();
        assert_eq!(
            errors,
            vec![
                CodeError::InvalidChecksum {
                    expected: 'U',
                    found: 'X'
                },
                CodeError::SurnameMismatch {
                    expected: "BNC".into(),
                    found: "RSS".into()
                },
            ]
        );
    }

    #[test]
    fn stop_at_first() {
        let mut other = mario();
        other.surname = Some("Bianchi".into());
        let options = ValidationOptionsBuilder::new().stop_at_first(true).build();
        let report = validate_with("RSSMRA80A01H501X", Some(&other), &CodeOnlyResolver, &options);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.stage, Stage::FormatChecked);
        assert!(report.decoded.is_none());
    }

    #[test]
    fn absent_fields_are_skipped_unless_required() {
        let identity = Identity {
            surname: Some("Rossi".into()),
            ..Identity::default()
        };
        assert!(validate("RSSMRA80A01H501U", Some(&identity), &CodeOnlyResolver).is_ok());

        let options = ValidationOptionsBuilder::new()
            .require(Field::BirthDate)
            .require(Field::BirthPlace)
            .build();
        let report = validate_with("RSSMRA80A01H501U", Some(&identity), &CodeOnlyResolver, &options);
        assert_eq!(
            report.errors,
            vec![
                CodeError::MissingRequiredField(Field::BirthDate),
                CodeError::MissingRequiredField(Field::BirthPlace),
            ]
        );
        assert_eq!(report.stage, Stage::Done);
    }

    #[test]
    fn sex_and_place_mismatch() {
        let mut other = mario();
        other.sex = Some(Sex::Female);
        other.birth_place = Some(BirthPlace::Code(PlaceCode::parse("F205").unwrap()));
        let errors = validate("RSSMRA80A01H501U", Some(&other), &CodeOnlyResolver).unwrap_err();
        assert_eq!(
            errors,
            vec![
                CodeError::SexMismatch {
                    expected: Sex::Female,
                    found: Sex::Male
                },
                CodeError::PlaceMismatch {
                    expected: "F205".into(),
                    found: "H501".into()
                },
            ]
        );
    }

    #[test]
    fn unresolved_place_is_reported() {
        let mut other = mario();
        other.birth_place = Some(BirthPlace::municipality("Atlantide"));
        let errors = validate("RSSMRA80A01H501U", Some(&other), &CodeOnlyResolver).unwrap_err();
        assert_eq!(errors, vec![CodeError::UnresolvedPlace("Atlantide".into())]);
    }

    #[test]
    fn date_comparison_ignores_century_policy() {
        // born 1925: "25" decodes to 2025 under the default pivot
        let identity = Identity {
            birth_date: Some(date(1925, 4, 12)),
            ..Identity::default()
        };
        let code = crate::encode(
            &Identity::new(
                "Rossi",
                "Mario",
                Sex::Male,
                date(1925, 4, 12),
                BirthPlace::Code(PlaceCode::parse("H501").unwrap()),
            ),
            &CodeOnlyResolver,
        )
        .unwrap();
        let decoded = validate(code.as_str(), Some(&identity), &CodeOnlyResolver).unwrap();
        assert_eq!(decoded.birth_date, date(1925, 4, 12));
    }

    #[test]
    fn require_all_is_idempotent() {
        let options = ValidationOptionsBuilder::new()
            .require(Field::Sex)
            .require_all()
            .build();
        assert_eq!(options.required.len(), 5);
    }
}
