use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by registry lookups.
///
/// Every client call yields exactly one of these on failure; nothing is
/// retried and no partial record is returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Nip24Error {
    /// An identifier or account number failed format or checksum validation.
    /// Raised before any request is sent.
    #[error("{message}")]
    Validation {
        /// Field that failed (`nip`, `regon`, `krs`, `euvat`, `iban`).
        field: &'static str,
        /// Human-readable description.
        message: String,
    },

    /// Network or HTTP-level failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The registry answered with an error code in the response envelope.
    #[error("registry error {code}: {description}")]
    Registry {
        /// Registry error code, as sent by the service.
        code: i32,
        /// Registry error description, verbatim.
        description: String,
    },

    /// The response body could not be parsed as an XML document.
    #[error("XML error: {0}")]
    Xml(String),

    /// Invalid client configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Nip24Error {
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Registry error code, or `0` when the failure happened on the client side.
    pub fn code(&self) -> i32 {
        match self {
            Self::Registry { code, .. } => *code,
            _ => 0,
        }
    }

    /// Whether the request reached the registry and was rejected there.
    pub fn is_registry_error(&self) -> bool {
        matches!(self, Self::Registry { .. })
    }

    /// Flatten into the `{ code, message }` pair.
    pub fn outcome(&self) -> ErrorOutcome {
        let message = match self {
            Self::Registry { description, .. } => description.clone(),
            other => other.to_string(),
        };
        ErrorOutcome {
            code: self.code(),
            message,
        }
    }
}

/// Code and message of a failed call.
///
/// `code` is `0` for validation, transport and parse failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorOutcome {
    pub code: i32,
    pub message: String,
}

impl std::fmt::Display for ErrorOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.code != 0 {
            write!(f, "[{}] {}", self.code, self.message)
        } else {
            f.write_str(&self.message)
        }
    }
}

impl From<&Nip24Error> for ErrorOutcome {
    fn from(e: &Nip24Error) -> Self {
        e.outcome()
    }
}
