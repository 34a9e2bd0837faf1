#![no_main]

use codice_fiscale::{FiscalCode, ValidationOptions, decode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(decoded) = decode(s, &ValidationOptions::default()) {
        // Every variant of a valid code decodes to the same person.
        let base = decoded.code.base();
        for level in 0..=7 {
            let variant: FiscalCode = base.omocode(level);
            let again = decode(variant.as_str(), &ValidationOptions::default())
                .expect("omocode variant must decode");
            assert_eq!(again.birth_date, decoded.birth_date);
            assert_eq!(again.place_code, decoded.place_code);
        }
    }
});
