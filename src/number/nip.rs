//! NIP (Numer Identyfikacji Podatkowej), the Polish national tax number.

use super::{digits, strip_separators, weighted_mod11};

const WEIGHTS: [u32; 9] = [6, 5, 7, 2, 3, 4, 5, 6, 7];

/// Strip separators and require exactly 10 ASCII digits.
pub fn normalize(nip: &str) -> Option<String> {
    let nip = strip_separators(nip.trim());
    if nip.len() != 10 || !nip.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(nip)
}

/// Check the NIP format and its weighted mod-11 check digit.
///
/// A weighted sum congruent to 10 has no valid check digit.
pub fn is_valid(nip: &str) -> bool {
    let Some(nip) = normalize(nip) else {
        return false;
    };
    let Some(d) = digits(&nip) else {
        return false;
    };

    let sum = weighted_mod11(&d[..9], &WEIGHTS);
    sum != 10 && sum == d[9]
}
