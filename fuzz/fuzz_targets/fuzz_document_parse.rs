#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must not panic. Errors are fine.
        if let Ok(doc) = nip24::client::Document::parse(s) {
            let _ = doc.string("/result/error/code/text()");
            let _ = doc.repeated("/result/firm/PKDs/PKD", Some("code")).count();
        }
    }
});
