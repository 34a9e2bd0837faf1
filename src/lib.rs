//! # codice-fiscale
//!
//! Encoding, decoding and validation of the Italian fiscal code
//! (*codice fiscale*) of natural persons.
//!
//! A fiscal code is 16 characters: three letters from the surname, three from
//! the given name, the birth year, month and day (day + 40 for women), the
//! cadastral code of the birth place and a check character. Codes that
//! collide may be disambiguated by *omocodia*, which swaps digits for
//! letters from the right.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use codice_fiscale::*;
//!
//! let identity = IdentityBuilder::new()
//!     .surname("Rossi")
//!     .name("Mario")
//!     .sex(Sex::Male)
//!     .birth_date(NaiveDate::from_ymd_opt(1980, 1, 1).unwrap())
//!     .born_in_code(PlaceCode::parse("H501").unwrap())
//!     .build();
//!
//! let code = encode(&identity, &CodeOnlyResolver).unwrap();
//! assert_eq!(code.as_str(), "RSSMRA80A01H501U");
//!
//! let decoded = validate(code.as_str(), Some(&identity), &CodeOnlyResolver).unwrap();
//! assert_eq!(decoded.sex, Sex::Male);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Types, encoder, decoder, validator, omocodia |
//! | `registry` (default) | In-memory cadastral code registry with built-in foreign countries |
//! | `istat` | Loader for the ISTAT municipality list (semicolon CSV) |
//! | `json` | JSON snapshots of the registry |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "registry")]
pub mod registry;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
