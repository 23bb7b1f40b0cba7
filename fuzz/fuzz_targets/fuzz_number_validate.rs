#![no_main]

use libfuzzer_sys::fuzz_target;
use nip24::number::{Family, Identifier, iban};

const FAMILIES: [Family; 5] = [
    Family::Nip,
    Family::Regon,
    Family::Krs,
    Family::EuVat,
    Family::Iban,
];

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        for family in FAMILIES {
            // A parsed identifier must survive its own validation.
            if let Ok(id) = Identifier::parse(family, s) {
                assert!(family.is_valid(id.value()));
            }
        }
        if let Some(account) = iban::normalize_account(s) {
            assert!(iban::is_valid(&account));
        }
    }
});
