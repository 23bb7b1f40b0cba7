//! IBAN (ISO 13616) bank account numbers.

use super::{HOME_COUNTRY, strip_separators};

/// Registered IBAN length per country. Sorted for binary search.
static LENGTHS: &[(&str, usize)] = &[
    ("AD", 24), ("AE", 23), ("AL", 28), ("AT", 20), ("AZ", 28), ("BA", 20), ("BE", 16),
    ("BG", 22), ("BH", 22), ("BR", 29), ("BY", 28), ("CH", 21), ("CR", 22), ("CY", 28),
    ("CZ", 24), ("DE", 22), ("DK", 18), ("DO", 28), ("EE", 20), ("EG", 29), ("ES", 24),
    ("FI", 18), ("FO", 18), ("FR", 27), ("GB", 22), ("GE", 22), ("GI", 23), ("GL", 18),
    ("GR", 27), ("GT", 28), ("HR", 21), ("HU", 28), ("IE", 22), ("IL", 23), ("IQ", 23),
    ("IS", 26), ("IT", 27), ("JO", 30), ("KW", 30), ("KZ", 20), ("LB", 28), ("LC", 32),
    ("LI", 21), ("LT", 20), ("LU", 20), ("LV", 21), ("MC", 27), ("MD", 24), ("ME", 22),
    ("MK", 19), ("MR", 27), ("MT", 31), ("MU", 30), ("NL", 18), ("NO", 15), ("PK", 24),
    ("PL", 28), ("PS", 29), ("PT", 25), ("QA", 29), ("RO", 24), ("RS", 22), ("SA", 24),
    ("SC", 31), ("SE", 24), ("SI", 19), ("SK", 24), ("SM", 27), ("ST", 25), ("SV", 28),
    ("TL", 23), ("TN", 24), ("TR", 26), ("UA", 29), ("VA", 22), ("VG", 24), ("XK", 20),
];

/// Registered IBAN length for `country`, if known.
pub fn registered_length(country: &str) -> Option<usize> {
    LENGTHS
        .binary_search_by(|(c, _)| (*c).cmp(country))
        .ok()
        .map(|i| LENGTHS[i].1)
}

/// Strip spaces and dashes, upper-case, and require
/// `CC` + 2 check digits + 10–30 alphanumerics.
pub fn normalize(iban: &str) -> Option<String> {
    let iban = strip_separators(iban.trim()).to_ascii_uppercase();
    let b = iban.as_bytes();
    if !(14..=34).contains(&b.len()) {
        return None;
    }
    let shape = b[..2].iter().all(u8::is_ascii_uppercase)
        && b[2..4].iter().all(u8::is_ascii_digit)
        && b[4..]
            .iter()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
    shape.then_some(iban)
}

/// Format, registered length and mod-97 check.
pub fn is_valid(iban: &str) -> bool {
    let Some(iban) = normalize(iban) else {
        return false;
    };
    if registered_length(&iban[..2]) != Some(iban.len()) {
        return false;
    }
    mod97(&iban) == 1
}

/// Validate `account`, falling back to the home-country prefix once.
///
/// Domestic account numbers are usually written without `PL`; when the value
/// as given is not a valid IBAN, `PL` is prepended and the result revalidated.
/// Returns the normalized IBAN.
pub fn normalize_account(account: &str) -> Option<String> {
    if is_valid(account) {
        return normalize(account);
    }
    let prefixed = format!("{HOME_COUNTRY}{}", account.trim());
    if is_valid(&prefixed) {
        return normalize(&prefixed);
    }
    None
}

/// ISO 7064 mod 97-10 over the rearranged IBAN, computed piecewise.
fn mod97(iban: &str) -> u32 {
    let (head, tail) = iban.split_at(4);
    tail.chars()
        .chain(head.chars())
        .filter_map(|c| c.to_digit(36))
        .fold(0u32, |acc, v| {
            if v < 10 {
                (acc * 10 + v) % 97
            } else {
                (acc * 100 + v) % 97
            }
        })
}
