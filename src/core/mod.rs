//! Fiscal code types, encoding, decoding and validation.
//!
//! Everything here is pure: lookup tables are `static`, and the only
//! outside knowledge (birth places) comes through [`PlaceResolver`].

mod builder;
mod checksum;
mod codec;
pub mod date;
mod error;
mod name;
mod normalize;
pub mod omocodia;
mod place;
mod types;
mod validation;

pub use builder::*;
pub use checksum::checksum;
pub use codec::{decode, decode_place, encode};
pub use date::{CenturyPolicy, MONTH_LETTERS};
pub use error::*;
pub use name::{name_code, surname_code};
pub use normalize::{clean_code, normalize};
pub use place::*;
pub use types::*;
pub use validation::*;
