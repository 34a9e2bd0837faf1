#![no_main]

use codice_fiscale::{CodeOnlyResolver, ValidationOptions, validate_with};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must not panic; errors are fine, panics are bugs.
        let _ = validate_with(s, None, &CodeOnlyResolver, &ValidationOptions::default());
    }
});
