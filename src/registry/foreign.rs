//! Cadastral codes of foreign countries (`Z` scheme).
//!
//! A partial table of the most common countries of birth. A complete
//! snapshot can be loaded through the registry loaders instead.

use crate::core::{Place, PlaceCode};

/// Generic "born abroad" record with no specific country.
pub const GENERIC_ABROAD_CODE: &str = "Z000";

/// (cadastral code, ISO 3166-1 alpha-2, Italian name). Sorted by code.
static FOREIGN_COUNTRIES: &[(&str, &str, &str)] = &[
    ("Z100", "AL", "Albania"),
    ("Z101", "AD", "Andorra"),
    ("Z102", "AT", "Austria"),
    ("Z103", "BE", "Belgio"),
    ("Z104", "BG", "Bulgaria"),
    ("Z106", "VA", "Città del Vaticano"),
    ("Z107", "DK", "Danimarca"),
    ("Z109", "FI", "Finlandia"),
    ("Z110", "FR", "Francia"),
    ("Z112", "DE", "Germania"),
    ("Z114", "GB", "Regno Unito"),
    ("Z115", "GR", "Grecia"),
    ("Z116", "IE", "Irlanda"),
    ("Z117", "IS", "Islanda"),
    ("Z119", "LI", "Liechtenstein"),
    ("Z120", "LU", "Lussemburgo"),
    ("Z121", "MT", "Malta"),
    ("Z123", "MC", "Monaco"),
    ("Z125", "NO", "Norvegia"),
    ("Z126", "NL", "Paesi Bassi"),
    ("Z127", "PL", "Polonia"),
    ("Z128", "PT", "Portogallo"),
    ("Z129", "RO", "Romania"),
    ("Z130", "SM", "San Marino"),
    ("Z131", "ES", "Spagna"),
    ("Z132", "SE", "Svezia"),
    ("Z133", "CH", "Svizzera"),
    ("Z134", "HU", "Ungheria"),
    ("Z138", "UA", "Ucraina"),
    ("Z149", "HR", "Croazia"),
    ("Z150", "SI", "Slovenia"),
    ("Z153", "BA", "Bosnia-Erzegovina"),
    ("Z154", "RU", "Federazione Russa"),
    ("Z155", "SK", "Slovacchia"),
    ("Z156", "CZ", "Repubblica Ceca"),
    ("Z210", "CN", "Cina"),
    ("Z219", "JP", "Giappone"),
    ("Z222", "IN", "India"),
    ("Z301", "DZ", "Algeria"),
    ("Z330", "MA", "Marocco"),
    ("Z336", "EG", "Egitto"),
    ("Z352", "TN", "Tunisia"),
    ("Z401", "CA", "Canada"),
    ("Z404", "US", "Stati Uniti d'America"),
    ("Z514", "MX", "Messico"),
    ("Z600", "AR", "Argentina"),
    ("Z602", "BR", "Brasile"),
    ("Z700", "AU", "Australia"),
];

/// Cadastral code for an ISO 3166-1 alpha-2 country code.
pub fn foreign_code_for_iso(iso: &str) -> Option<&'static str> {
    let iso = iso.trim().to_ascii_uppercase();
    FOREIGN_COUNTRIES
        .iter()
        .find(|(_, country, _)| *country == iso)
        .map(|(code, _, _)| *code)
}

/// Whether `code` is in the built-in foreign table (including `Z000`).
pub fn is_known_foreign_code(code: &str) -> bool {
    code == GENERIC_ABROAD_CODE
        || FOREIGN_COUNTRIES
            .binary_search_by(|(c, _, _)| c.cmp(&code))
            .is_ok()
}

/// The built-in table as place records, preceded by the generic `Z000` "Estero".
pub fn foreign_countries() -> Vec<Place> {
    let generic = PlaceCode::parse(GENERIC_ABROAD_CODE)
        .map(|code| Place::foreign("Estero", code, None));
    generic
        .into_iter()
        .chain(FOREIGN_COUNTRIES.iter().filter_map(|(code, iso, name)| {
            PlaceCode::parse(code).map(|code| Place::foreign(*name, code, Some(iso.to_string())))
        }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_is_sorted() {
        for window in FOREIGN_COUNTRIES.windows(2) {
            assert!(
                window[0].0 < window[1].0,
                "foreign codes not sorted: {} >= {}",
                window[0].0,
                window[1].0
            );
        }
    }

    #[test]
    fn every_entry_is_a_z_code() {
        for (code, iso, _) in FOREIGN_COUNTRIES {
            let parsed = PlaceCode::parse(code).unwrap();
            assert!(parsed.is_foreign(), "{code}");
            assert_eq!(iso.len(), 2);
        }
    }

    #[test]
    fn iso_lookup() {
        assert_eq!(foreign_code_for_iso("US"), Some("Z404"));
        assert_eq!(foreign_code_for_iso(" fr "), Some("Z110"));
        assert_eq!(foreign_code_for_iso("IT"), None);
        assert_eq!(foreign_code_for_iso(""), None);
    }

    #[test]
    fn known_codes() {
        assert!(is_known_foreign_code("Z000"));
        assert!(is_known_foreign_code("Z133"));
        assert!(!is_known_foreign_code("Z999"));
        assert!(!is_known_foreign_code("H501"));
    }

    #[test]
    fn records_include_generic_abroad() {
        let places = foreign_countries();
        assert_eq!(places.len(), FOREIGN_COUNTRIES.len() + 1);
        assert_eq!(places[0].name, "Estero");
        assert_eq!(places[0].country, None);
        assert!(places.iter().all(Place::is_foreign));
    }
}
