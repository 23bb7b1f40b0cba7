//! NIP24 registry client.
//!
//! Every call validates its input, builds the resource path, sends one signed
//! GET and decodes the response. Failures are returned as [`Nip24Error`];
//! the client keeps no per-call state and can be shared across tasks.
//!
//! # Example
//!
//! ```no_run
//! use nip24::client::*;
//! use nip24::number::Family;
//!
//! # async fn run() -> Result<(), nip24::core::Nip24Error> {
//! let client = Nip24Client::new(ClientConfig::test())?;
//!
//! if client.is_active(Family::Nip, "717-164-20-51").await? {
//!     let data = client.invoice_data(Family::Nip, "7171642051").await?;
//!     println!("{:?}", data.name);
//! }
//! # Ok(())
//! # }
//! ```

mod auth;
mod config;
pub mod decode;
mod document;
mod transport;

pub use auth::{Credentials, SignedRequest, TEST_ID, TEST_KEY, canonical_string};
pub use config::{ClientConfig, DEFAULT_TIMEOUT_SECS, PRODUCTION_URL, TEST_URL};
pub use document::{Document, Element, Repeated};
pub use transport::{VERSION, user_agent};

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::core::*;
use crate::number::{Family, Identifier, iban};
use transport::Transport;

/// Registry code returned by the activity check for a firm that suspended or
/// ended its business. Not an error.
pub const FIRM_NOT_ACTIVE: i32 = 9;

/// Async client for the NIP24 API.
#[derive(Debug, Clone)]
pub struct Nip24Client {
    transport: Transport,
}

impl Nip24Client {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Nip24Error::Config`] for an unparsable base URL or when the
    /// HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, Nip24Error> {
        Ok(Self {
            transport: Transport::new(&config)?,
        })
    }

    /// Plan, limits and usage of the API account.
    pub async fn account_status(&self) -> Result<AccountStatus, Nip24Error> {
        self.fetch("check/account/status", decode::account_status)
            .await
    }

    /// Whether the firm conducts business.
    ///
    /// A suspended or closed firm yields `Ok(false)`, not an error.
    pub async fn is_active(&self, family: Family, number: &str) -> Result<bool, Nip24Error> {
        let id = search_key(family, number)?;
        let doc = self
            .transport
            .get(&format!("check/firm/{}", id.path_suffix()))
            .await?;

        match decode::registry_error(&doc) {
            None => Ok(true),
            Some(e) if e.code() == FIRM_NOT_ACTIVE => Ok(false),
            Some(e) => {
                debug!(error = %e, "registry rejected activity check");
                Err(e)
            }
        }
    }

    /// Name and address for invoicing.
    pub async fn invoice_data(&self, family: Family, number: &str) -> Result<InvoiceData, Nip24Error> {
        let id = search_key(family, number)?;
        self.fetch(&format!("get/invoice/{}", id.path_suffix()), decode::invoice_data)
            .await
    }

    /// Complete registry entry including PKD activities.
    pub async fn all_data(&self, family: Family, number: &str) -> Result<AllData, Nip24Error> {
        let id = search_key(family, number)?;
        self.fetch(&format!("get/all/{}", id.path_suffix()), decode::all_data)
            .await
    }

    /// VIES check of an EU VAT ID (with country prefix).
    pub async fn vies_data(&self, euvat: &str) -> Result<ViesData, Nip24Error> {
        let id = Identifier::parse(Family::EuVat, euvat)?;
        self.fetch(&format!("get/vies/{}", id.path_suffix()), decode::vies_data)
            .await
    }

    /// Status in the VAT payer register, queried directly at the source.
    pub async fn vat_status(&self, family: Family, number: &str) -> Result<VatStatus, Nip24Error> {
        let id = search_key(family, number)?;
        self.fetch(&format!("check/vat/direct/{}", id.path_suffix()), decode::vat_status)
            .await
    }

    /// Whether `account` belongs to the firm on `date` (default: today).
    ///
    /// Domestic account numbers may omit the `PL` prefix.
    pub async fn iban_status(
        &self,
        family: Family,
        number: &str,
        account: &str,
        date: Option<NaiveDate>,
    ) -> Result<IbanStatus, Nip24Error> {
        let id = search_key(family, number)?;
        let account = bank_account(account)?;
        let path = format!("check/iban/{}/{account}/{}", id.path_suffix(), iso_date(date));
        self.fetch(&path, decode::iban_status).await
    }

    /// Whitelist check of the firm's VAT status and `account` on `date`
    /// (default: today).
    pub async fn whitelist_status(
        &self,
        family: Family,
        number: &str,
        account: &str,
        date: Option<NaiveDate>,
    ) -> Result<WhitelistStatus, Nip24Error> {
        let id = search_key(family, number)?;
        let account = bank_account(account)?;
        let path = format!("check/whitelist/{}/{account}/{}", id.path_suffix(), iso_date(date));
        self.fetch(&path, decode::whitelist_status).await
    }

    /// Search the VAT payer register as of `date` (default: today).
    pub async fn search_vat_registry(
        &self,
        family: Family,
        number: &str,
        date: Option<NaiveDate>,
    ) -> Result<SearchResult, Nip24Error> {
        let id = search_key(family, number)?;
        let path = format!("search/vat/{}/{}", id.path_suffix(), iso_date(date));
        self.fetch(&path, decode::search_result).await
    }

    async fn fetch<T>(&self, path: &str, decoder: fn(&Document) -> T) -> Result<T, Nip24Error> {
        let doc = self.transport.get(path).await?;
        decode::check(&doc)
            .inspect_err(|e| debug!(path, error = %e, "registry returned error"))?;
        Ok(decoder(&doc))
    }
}

/// Validate a firm identifier used as a lookup key.
fn search_key(family: Family, number: &str) -> Result<Identifier, Nip24Error> {
    if family == Family::Iban {
        return Err(Nip24Error::validation(
            family.path_segment(),
            "IBAN cannot be used to look up a firm",
        ));
    }
    Identifier::parse(family, number)
}

fn bank_account(account: &str) -> Result<String, Nip24Error> {
    iban::normalize_account(account)
        .ok_or_else(|| Nip24Error::validation("iban", Family::Iban.invalid_message()))
}

fn iso_date(date: Option<NaiveDate>) -> String {
    date.unwrap_or_else(|| Local::now().date_naive())
        .format("%Y-%m-%d")
        .to_string()
}
