//! KRS: National Court Register number.
//!
//! Ten digits, usually written without leading zeros. There is no check digit,
//! so validation is format-only.

/// Fixed length of a canonical KRS number.
pub const KRS_LEN: usize = 10;

/// Trim, require 1–10 ASCII digits and left-pad with zeros to 10 digits.
pub fn normalize(krs: &str) -> Option<String> {
    let krs = krs.trim();
    if krs.is_empty() || krs.len() > KRS_LEN || !krs.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(format!("{krs:0>KRS_LEN$}"))
}

/// Format-only validation.
pub fn is_valid(krs: &str) -> bool {
    normalize(krs).is_some()
}
