//! In-memory cadastral code registry.
//!
//! [`PlaceRegistry`] is an immutable snapshot of municipalities and foreign
//! countries that implements [`PlaceResolver`]. Build it once at startup and
//! share it (it is `Send + Sync`).
//!
//! # Example
//!
//! ```
//! use codice_fiscale::*;
//! use codice_fiscale::registry::PlaceRegistry;
//!
//! let registry = PlaceRegistry::with_foreign_countries(vec![
//!     Place::municipality("Roma", PlaceCode::parse("H501").unwrap(), "RM"),
//! ])
//! .unwrap();
//!
//! let code = registry.resolve_place(&BirthPlace::municipality("roma")).unwrap();
//! assert_eq!(code.as_str(), "H501");
//! assert_eq!(registry.resolve_place(&BirthPlace::abroad("US")).unwrap().as_str(), "Z404");
//! ```

mod foreign;
#[cfg(feature = "istat")]
pub mod istat;

use std::collections::HashMap;

use thiserror::Error;

use crate::core::{BirthPlace, Place, PlaceCode, PlaceResolver, normalize};

pub use foreign::{
    GENERIC_ABROAD_CODE, foreign_code_for_iso, foreign_countries, is_known_foreign_code,
};

/// Errors raised while building a registry snapshot.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// Two records share a cadastral code.
    #[error("duplicate place code '{0}'")]
    DuplicateCode(String),

    /// The input had no data rows at all.
    #[error("registry input is empty")]
    Empty,

    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Immutable place snapshot indexed by code and by folded name.
#[derive(Debug, Clone, Default)]
pub struct PlaceRegistry {
    places: Vec<Place>,
    by_code: HashMap<PlaceCode, usize>,
    by_name: HashMap<String, Vec<usize>>,
    by_country: HashMap<String, usize>,
}

impl PlaceRegistry {
    /// Build a registry, rejecting duplicate cadastral codes.
    pub fn new(places: Vec<Place>) -> Result<Self, RegistryError> {
        let mut by_code = HashMap::with_capacity(places.len());
        let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_country = HashMap::new();

        for (idx, place) in places.iter().enumerate() {
            if by_code.insert(place.code.clone(), idx).is_some() {
                return Err(RegistryError::DuplicateCode(place.code.to_string()));
            }
            by_name.entry(normalize(&place.name)).or_default().push(idx);
            if let Some(country) = &place.country {
                by_country.insert(country.to_ascii_uppercase(), idx);
            }
        }

        tracing::debug!(places = places.len(), "place registry loaded");
        Ok(Self {
            places,
            by_code,
            by_name,
            by_country,
        })
    }

    /// Build a registry from `places` plus the built-in foreign-country table.
    ///
    /// Foreign records already present in `places` take precedence.
    pub fn with_foreign_countries(mut places: Vec<Place>) -> Result<Self, RegistryError> {
        let builtin: Vec<Place> = foreign_countries()
            .into_iter()
            .filter(|f| !places.iter().any(|p| p.code == f.code))
            .collect();
        places.extend(builtin);
        Self::new(places)
    }

    /// Load a registry from a JSON array of [`Place`] records.
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let places: Vec<Place> = serde_json::from_str(json)?;
        Self::new(places)
    }

    /// Serialize the snapshot as a JSON array of [`Place`] records.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> Result<String, RegistryError> {
        Ok(serde_json::to_string(&self.places)?)
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Place> {
        self.places.iter()
    }

    /// Record for a cadastral code.
    pub fn by_code(&self, code: &PlaceCode) -> Option<&Place> {
        self.by_code.get(code).map(|&idx| &self.places[idx])
    }

    /// Municipality by name, optionally narrowed by province.
    ///
    /// Names are compared accent-, case- and punctuation-insensitively. If
    /// several municipalities remain, active ones win; a tie is ambiguous
    /// and yields `None`.
    pub fn municipality(&self, name: &str, province: Option<&str>) -> Option<&Place> {
        let candidates: Vec<&Place> = self
            .by_name
            .get(&normalize(name))
            .into_iter()
            .flatten()
            .map(|&idx| &self.places[idx])
            .filter(|p| !p.is_foreign())
            .filter(|p| match province {
                Some(wanted) => p
                    .province
                    .as_deref()
                    .is_some_and(|pr| pr.eq_ignore_ascii_case(wanted.trim())),
                None => true,
            })
            .collect();

        match pick_unique(&candidates) {
            Some(place) => Some(place),
            None => {
                if candidates.len() > 1 {
                    tracing::debug!(
                        municipality = name,
                        candidates = candidates.len(),
                        "ambiguous municipality name"
                    );
                }
                None
            }
        }
    }

    /// Foreign country by ISO 3166-1 alpha-2 code or by name.
    pub fn country(&self, country: &str) -> Option<&Place> {
        let trimmed = country.trim();
        if trimmed.len() == 2 {
            if let Some(&idx) = self.by_country.get(&trimmed.to_ascii_uppercase()) {
                return Some(&self.places[idx]);
            }
        }
        let candidates: Vec<&Place> = self
            .by_name
            .get(&normalize(trimmed))
            .into_iter()
            .flatten()
            .map(|&idx| &self.places[idx])
            .filter(|p| p.is_foreign())
            .collect();
        pick_unique(&candidates)
    }

    /// Places whose name contains `query` or whose code starts with it, sorted by name.
    ///
    /// A query containing digits only matches codes.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Place> {
        let folded = if query.chars().any(|c| c.is_ascii_digit()) {
            String::new()
        } else {
            normalize(query)
        };
        let upper = query.trim().to_ascii_uppercase();
        let mut hits: Vec<&Place> = self
            .places
            .iter()
            .filter(|p| {
                (!folded.is_empty() && normalize(&p.name).contains(&folded))
                    || (!upper.is_empty() && p.code.as_str().starts_with(&upper))
            })
            .collect();
        hits.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.code.cmp(&b.code)));
        hits.truncate(limit);
        hits
    }
}

/// The single candidate, or the single active one among several.
fn pick_unique<'a>(candidates: &[&'a Place]) -> Option<&'a Place> {
    match candidates {
        [only] => Some(*only),
        [] => None,
        _ => {
            let mut active = candidates.iter().filter(|p| p.active);
            match (active.next(), active.next()) {
                (Some(place), None) => Some(*place),
                _ => None,
            }
        }
    }
}

impl PlaceResolver for PlaceRegistry {
    fn resolve_place(&self, place: &BirthPlace) -> Option<PlaceCode> {
        let found = match place {
            BirthPlace::Code(code) => self.by_code(code),
            BirthPlace::Municipality { name, province } => {
                self.municipality(name, province.as_deref())
            }
            BirthPlace::Abroad { country } => self.country(country),
        };
        found.map(|p| p.code.clone())
    }

    fn resolve_code(&self, code: &PlaceCode) -> Option<Place> {
        self.by_code(code).cloned()
    }
}
