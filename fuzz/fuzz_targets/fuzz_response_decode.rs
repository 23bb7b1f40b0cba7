#![no_main]

use libfuzzer_sys::fuzz_target;
use nip24::client::{Document, decode};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Every decoder must accept any well-formed document.
        if let Ok(doc) = Document::parse(s) {
            let _ = decode::check(&doc);
            let _ = decode::account_status(&doc);
            let _ = decode::all_data(&doc);
            let _ = decode::vies_data(&doc);
            let _ = decode::whitelist_status(&doc);
            let _ = decode::search_result(&doc);
        }
    }
});
