//! Loader for the ISTAT municipality list ("Elenco comuni italiani").
//!
//! The export is a semicolon-separated file in Latin-1. Only the columns
//! below are read; everything else is ignored.
//!
//! | Column | Content |
//! |--------|---------|
//! | 4 | ISTAT municipality code (alphanumeric) |
//! | 5 | Name (Italian and other language) |
//! | 6 | Name in Italian |
//! | 14 | Province abbreviation |
//! | 19 | Cadastral code |

use crate::core::{Place, PlaceCode};

use super::{GENERIC_ABROAD_CODE, PlaceRegistry, RegistryError};

const COL_ISTAT: usize = 4;
const COL_NAME: usize = 5;
const COL_NAME_IT: usize = 6;
const COL_PROVINCE: usize = 14;
const COL_CADASTRAL: usize = 19;

/// Decode Latin-1 bytes; every byte maps to the code point of the same value.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Parse the ISTAT export into place records.
///
/// The header line is skipped. Rows that are too short, lack a cadastral
/// code or carry a malformed one are skipped with a warning. The generic
/// "Estero" record (`Z000`) is always added first.
pub fn parse_istat_csv(text: &str) -> Result<Vec<Place>, RegistryError> {
    let mut lines = text.lines().enumerate();
    if lines.next().is_none() {
        return Err(RegistryError::Empty);
    }

    let mut places: Vec<Place> = PlaceCode::parse(GENERIC_ABROAD_CODE)
        .map(|code| Place::foreign("Estero", code, None))
        .into_iter()
        .collect();

    let mut skipped = 0usize;
    for (idx, line) in lines {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let row = split_record(line);
        if row.len() <= COL_CADASTRAL {
            tracing::warn!(line = line_no, columns = row.len(), "skipping short ISTAT row");
            skipped += 1;
            continue;
        }

        let raw_code = row[COL_CADASTRAL].trim();
        if raw_code.is_empty() {
            tracing::warn!(line = line_no, "skipping ISTAT row without cadastral code");
            skipped += 1;
            continue;
        }
        let Some(code) = PlaceCode::parse(raw_code) else {
            tracing::warn!(line = line_no, code = raw_code, "skipping ISTAT row with invalid cadastral code");
            skipped += 1;
            continue;
        };

        let name_it = row[COL_NAME_IT].trim();
        let name = if name_it.is_empty() {
            row[COL_NAME].trim()
        } else {
            name_it
        };

        places.push(Place {
            name: name.to_string(),
            code,
            province: non_empty(&row[COL_PROVINCE]),
            istat_code: non_empty(&row[COL_ISTAT]),
            cap: None,
            country: None,
            active: true,
        });
    }

    tracing::debug!(
        places = places.len(),
        skipped,
        "parsed ISTAT municipality list"
    );
    Ok(places)
}

impl PlaceRegistry {
    /// Build a registry from the ISTAT export plus the built-in foreign table.
    pub fn from_istat_csv(text: &str) -> Result<Self, RegistryError> {
        Self::with_foreign_countries(parse_istat_csv(text)?)
    }
}

fn non_empty(field: &str) -> Option<String> {
    let trimmed = field.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Split one `;`-separated record, honouring double quotes and `""` escapes.
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(istat: &str, name: &str, name_it: &str, province: &str, cadastral: &str) -> String {
        let mut cols = vec![String::new(); 20];
        cols[COL_ISTAT] = istat.into();
        cols[COL_NAME] = name.into();
        cols[COL_NAME_IT] = name_it.into();
        cols[COL_PROVINCE] = province.into();
        cols[COL_CADASTRAL] = cadastral.into();
        cols.join(";")
    }

    fn sample() -> String {
        [
            "Codice Regione;...;header".to_string(),
            row("058091", "Roma", "", "RM", "H501"),
            row("021008", "Bolzano/Bozen", "Bolzano", "BZ", "A952"),
            row("015146", "Milano", "", "MI", ""),
            row("000000", "Broken", "", "XX", "12AB"),
            "too;short".to_string(),
            String::new(),
        ]
        .join("\n")
    }

    #[test]
    fn parses_rows_and_adds_estero() {
        let places = parse_istat_csv(&sample()).unwrap();
        let names: Vec<&str> = places.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Estero", "Roma", "Bolzano"]);
        assert_eq!(places[1].istat_code.as_deref(), Some("058091"));
        assert_eq!(places[1].province.as_deref(), Some("RM"));
        assert_eq!(places[2].code.as_str(), "A952");
    }

    #[test]
    fn row_without_cadastral_code_is_skipped() {
        let text = [
            "header".to_string(),
            row("015146", "Milano", "", "MI", "  "),
            row("058091", "Roma", "", "RM", "H501"),
        ]
        .join("\n");
        let places = parse_istat_csv(&text).unwrap();
        let codes: Vec<&str> = places.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["Z000", "H501"]);
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(parse_istat_csv(""), Err(RegistryError::Empty)));
    }

    #[test]
    fn header_only_yields_estero() {
        let places = parse_istat_csv("header").unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].code.as_str(), "Z000");
    }

    #[test]
    fn quoted_fields() {
        assert_eq!(
            split_record(r#"a;"b;c";"say ""hi""";"#),
            vec!["a", "b;c", "say \"hi\"", ""]
        );
    }

    #[test]
    fn latin1_decoding() {
        assert_eq!(decode_latin1(b"Forl\xec"), "Forlì");
        assert_eq!(decode_latin1(b""), "");
    }

    #[test]
    fn registry_from_istat() {
        let registry = PlaceRegistry::from_istat_csv(&sample()).unwrap();
        assert_eq!(registry.municipality("bolzano", None).unwrap().code.as_str(), "A952");
        assert_eq!(registry.country("Estero").unwrap().code.as_str(), "Z000");
        assert_eq!(registry.country("CH").unwrap().code.as_str(), "Z133");
    }
}
