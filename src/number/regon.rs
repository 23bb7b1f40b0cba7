//! REGON: statistical business number (9 or 14 digits).
//!
//! The 14-digit form identifies a local unit; its first nine digits are the
//! parent's REGON and must pass the 9-digit check on their own.

use super::{digits, weighted_mod11};

const WEIGHTS_9: [u32; 8] = [8, 9, 2, 3, 4, 5, 6, 7];
const WEIGHTS_14: [u32; 13] = [2, 4, 8, 5, 0, 9, 7, 3, 6, 1, 2, 4, 8];

/// Trim and require 9 or 14 ASCII digits. Dashes are not accepted.
pub fn normalize(regon: &str) -> Option<String> {
    let regon = regon.trim();
    if regon.len() != 9 && regon.len() != 14 {
        return None;
    }
    if !regon.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(regon.to_string())
}

/// Check the REGON format and its chained mod-11 check digits.
pub fn is_valid(regon: &str) -> bool {
    let Some(regon) = normalize(regon) else {
        return false;
    };
    let Some(d) = digits(&regon) else {
        return false;
    };

    if d.len() == 9 {
        return check_digit(&d, &WEIGHTS_9);
    }
    check_digit(&d[..9], &WEIGHTS_9) && check_digit(&d, &WEIGHTS_14)
}

/// Last digit of `d` must equal the weighted sum mod 11, with 10 folded to 0.
fn check_digit(d: &[u32], weights: &[u32]) -> bool {
    let sum = weighted_mod11(&d[..weights.len()], weights) % 10;
    sum == d[weights.len()]
}
