//! Polish and EU business identifiers: normalization and checksum validation.
//!
//! Every validator is a pure, total function over `&str`. Empty or malformed
//! input yields `None` / `false`, never a panic.
//!
//! # Example
//!
//! ```
//! use nip24::number::*;
//!
//! assert_eq!(nip::normalize("717-164-20-51").as_deref(), Some("7171642051"));
//! assert!(Family::Nip.is_valid("717-164-20-51"));
//! assert!(Family::EuVat.is_valid("PL 717 164 20 51"));
//! assert!(!Family::Regon.is_valid("123456786"));
//! ```

pub mod euvat;
pub mod iban;
pub mod krs;
pub mod nip;
pub mod regon;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::Nip24Error;

/// ISO 3166-1 code of the registry's home country.
pub const HOME_COUNTRY: &str = "PL";

/// Identifier family accepted by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    /// NIP, 10-digit national tax number.
    Nip,
    /// REGON, 9 or 14 digit statistical number.
    Regon,
    /// KRS, National Court Register number.
    Krs,
    /// EU VAT ID with 2-letter country prefix.
    EuVat,
    /// IBAN bank account number.
    Iban,
}

impl Family {
    /// Canonical form of `raw`, or `None` if it does not have the family's shape.
    pub fn normalize(self, raw: &str) -> Option<String> {
        match self {
            Family::Nip => nip::normalize(raw),
            Family::Regon => regon::normalize(raw),
            Family::Krs => krs::normalize(raw),
            Family::EuVat => euvat::normalize(raw),
            Family::Iban => iban::normalize(raw),
        }
    }

    /// Full format and checksum validation.
    pub fn is_valid(self, raw: &str) -> bool {
        match self {
            Family::Nip => nip::is_valid(raw),
            Family::Regon => regon::is_valid(raw),
            Family::Krs => krs::is_valid(raw),
            Family::EuVat => euvat::is_valid(raw),
            Family::Iban => iban::is_valid(raw),
        }
    }

    /// URL path segment used by the registry API.
    pub fn path_segment(self) -> &'static str {
        match self {
            Family::Nip => "nip",
            Family::Regon => "regon",
            Family::Krs => "krs",
            Family::EuVat => "euvat",
            Family::Iban => "iban",
        }
    }

    /// Message reported when a value of this family fails validation.
    pub fn invalid_message(self) -> &'static str {
        match self {
            Family::Nip => "NIP number is invalid",
            Family::Regon => "REGON number is invalid",
            Family::Krs => "KRS number is invalid",
            Family::EuVat => "EU VAT ID is invalid",
            Family::Iban => "IBAN is invalid",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.path_segment())
    }
}

/// A validated identifier in canonical form.
///
/// Deserialization goes through [`Identifier::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawIdentifier")]
pub struct Identifier {
    family: Family,
    value: String,
}

#[derive(Deserialize)]
struct RawIdentifier {
    family: Family,
    value: String,
}

impl TryFrom<RawIdentifier> for Identifier {
    type Error = Nip24Error;

    fn try_from(raw: RawIdentifier) -> Result<Self, Self::Error> {
        Self::parse(raw.family, &raw.value)
    }
}

impl Identifier {
    /// Validate `raw` as a member of `family` and keep its canonical form.
    ///
    /// # Errors
    ///
    /// Returns [`Nip24Error::Validation`] when the value fails format or
    /// checksum validation.
    pub fn parse(family: Family, raw: &str) -> Result<Self, Nip24Error> {
        let invalid = || Nip24Error::validation(family.path_segment(), family.invalid_message());
        if !family.is_valid(raw) {
            return Err(invalid());
        }
        let value = family.normalize(raw).ok_or_else(invalid)?;
        Ok(Self { family, value })
    }

    pub fn family(&self) -> Family {
        self.family
    }

    /// Canonical value, e.g. `7171642051`.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// `{family}/{value}`, the suffix shared by every lookup endpoint.
    pub fn path_suffix(&self) -> String {
        format!("{}/{}", self.family.path_segment(), self.value)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.family, self.value)
    }
}

/// Digit values of `s`, or `None` if any character is not an ASCII digit.
pub(crate) fn digits(s: &str) -> Option<Vec<u32>> {
    s.chars().map(|c| c.to_digit(10)).collect()
}

/// Weighted digit sum modulo 11.
pub(crate) fn weighted_mod11(digits: &[u32], weights: &[u32]) -> u32 {
    digits
        .iter()
        .zip(weights)
        .map(|(d, w)| d * w)
        .sum::<u32>()
        % 11
}

/// Remove whitespace and dashes, as written on invoices ("717-164-20-51").
pub(crate) fn strip_separators(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect::<String>()
}
