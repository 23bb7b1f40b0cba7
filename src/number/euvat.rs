//! EU VAT identification numbers (VIES member prefixes).

use super::{nip, strip_separators};

/// Validator for the part after the 2-letter prefix.
type VatRule = fn(&str) -> bool;

fn all_digits(n: &str) -> bool {
    n.bytes().all(|b| b.is_ascii_digit())
}

fn all_alnum(n: &str) -> bool {
    n.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

/// Per-country format of the number part. Sorted by prefix for binary search.
///
/// Greece uses `EL`, Northern Ireland traders use `XI`. The home country
/// entry delegates to the NIP checksum.
static RULES: &[(&str, VatRule)] = &[
    ("AT", |n| n.len() == 9 && n.starts_with('U') && all_digits(&n[1..])),
    ("BE", |n| n.len() == 10 && (n.starts_with('0') || n.starts_with('1')) && all_digits(n)),
    ("BG", |n| (n.len() == 9 || n.len() == 10) && all_digits(n)),
    ("CY", |n| {
        n.len() == 9 && all_digits(&n[..8]) && n.as_bytes()[8].is_ascii_uppercase()
    }),
    ("CZ", |n| (8..=10).contains(&n.len()) && all_digits(n)),
    ("DE", |n| n.len() == 9 && all_digits(n) && !n.starts_with('0')),
    ("DK", |n| n.len() == 8 && all_digits(n)),
    ("EE", |n| n.len() == 9 && all_digits(n)),
    ("EL", |n| n.len() == 9 && all_digits(n)),
    ("ES", |n| n.len() == 9 && all_alnum(n)),
    ("FI", |n| n.len() == 8 && all_digits(n)),
    ("FR", |n| n.len() == 11 && all_alnum(&n[..2]) && all_digits(&n[2..])),
    ("HR", |n| n.len() == 11 && all_digits(n)),
    ("HU", |n| n.len() == 8 && all_digits(n)),
    ("IE", |n| (n.len() == 8 || n.len() == 9) && all_alnum(n)),
    ("IT", |n| n.len() == 11 && all_digits(n)),
    ("LT", |n| (n.len() == 9 || n.len() == 12) && all_digits(n)),
    ("LU", |n| n.len() == 8 && all_digits(n)),
    ("LV", |n| n.len() == 11 && all_digits(n)),
    ("MT", |n| n.len() == 8 && all_digits(n)),
    ("NL", |n| {
        n.len() == 12 && all_digits(&n[..9]) && n.as_bytes()[9] == b'B' && all_digits(&n[10..])
    }),
    ("PL", nip::is_valid),
    ("PT", |n| n.len() == 9 && all_digits(n)),
    ("RO", |n| (2..=10).contains(&n.len()) && all_digits(n)),
    ("SE", |n| n.len() == 12 && all_digits(n)),
    ("SI", |n| n.len() == 8 && all_digits(n)),
    ("SK", |n| n.len() == 10 && all_digits(n)),
    ("XI", |n| (n.len() == 9 || n.len() == 12) && all_digits(n)),
];

/// Strip spaces and dashes, upper-case, and require a 2-letter prefix
/// followed by 2–12 alphanumerics.
pub fn normalize(vat_id: &str) -> Option<String> {
    let vat_id = strip_separators(vat_id.trim()).to_ascii_uppercase();
    let b = vat_id.as_bytes();
    if !(4..=14).contains(&b.len()) {
        return None;
    }
    if !b[..2].iter().all(u8::is_ascii_uppercase) || !all_alnum(&vat_id[2..]) {
        return None;
    }
    Some(vat_id)
}

/// Whether `code` is a known VIES country prefix.
pub fn is_known_prefix(code: &str) -> bool {
    rule(code).is_some()
}

fn rule(code: &str) -> Option<VatRule> {
    RULES
        .binary_search_by(|(c, _)| (*c).cmp(code))
        .ok()
        .map(|i| RULES[i].1)
}

/// Split a normalized VAT ID into `(prefix, number)`.
pub fn split(vat_id: &str) -> Option<(String, String)> {
    let vat_id = normalize(vat_id)?;
    let (cc, num) = vat_id.split_at(2);
    Some((cc.to_string(), num.to_string()))
}

/// Validate the prefix and the country-specific number format.
///
/// Home-country numbers are checked with the NIP checksum.
pub fn is_valid(vat_id: &str) -> bool {
    let Some((cc, num)) = split(vat_id) else {
        return false;
    };
    rule(&cc).is_some_and(|check| check(&num))
}
