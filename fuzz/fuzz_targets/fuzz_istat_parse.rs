#![no_main]

use codice_fiscale::registry::istat::{decode_latin1, parse_istat_csv};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = parse_istat_csv(&decode_latin1(data));
});
