//! Error types and the typed records returned by registry lookups.
//!
//! All record fields are optional: an absent value means the registry did not
//! provide it for the queried identifier.

mod error;
mod records;

pub use error::*;
pub use records::*;
