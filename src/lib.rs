//! # nip24
//!
//! Client library for the NIP24 business registry API: firm activity,
//! invoicing data, full registry entries, VAT payer status, VIES checks,
//! bank account whitelist checks and VAT register search, keyed by NIP,
//! REGON, KRS or EU VAT ID.
//!
//! Identifier validation (checksums and canonical forms) is available on its
//! own without the HTTP stack.
//!
//! ## Quick Start
//!
//! ```rust
//! use nip24::number::{Family, Identifier, iban};
//!
//! let id = Identifier::parse(Family::Nip, "717-164-20-51").unwrap();
//! assert_eq!(id.path_suffix(), "nip/7171642051");
//!
//! assert!(Family::Regon.is_valid("123456785"));
//! assert_eq!(
//!     iban::normalize_account("49154000046458439719826658").as_deref(),
//!     Some("PL49154000046458439719826658"),
//! );
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` | Identifier validators, result records, error types |
//! | `client` (default) | Signed HTTP client and XML response decoding |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod number;

#[cfg(feature = "client")]
pub mod client;

#[cfg(feature = "core")]
pub use crate::core::*;

#[cfg(feature = "client")]
pub use crate::client::{ClientConfig, Credentials, Nip24Client};
