//! Typed records decoded from registry responses.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// VAT registration state reported by the VAT registry and the whitelist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VatRegistration {
    /// 1: not registered for VAT.
    NotRegistered,
    /// 2: active VAT payer.
    Active,
    /// 3: registered, exempt from VAT.
    Exempted,
}

impl VatRegistration {
    /// Map a registry status code; unknown codes yield `None`.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::NotRegistered),
            2 => Some(Self::Active),
            3 => Some(Self::Exempted),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Self::NotRegistered => 1,
            Self::Active => 2,
            Self::Exempted => 3,
        }
    }
}

/// API account: billing plan, enabled functions and request counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountStatus {
    pub uid: Option<String>,
    pub billing_plan_name: Option<String>,

    /// Monthly subscription price (net, PLN).
    pub subscription_price: Option<Decimal>,
    /// Default price of a single query.
    pub item_price: Option<Decimal>,
    pub item_price_status: Option<Decimal>,
    pub item_price_invoice: Option<Decimal>,
    pub item_price_all: Option<Decimal>,
    pub item_price_iban: Option<Decimal>,
    pub item_price_whitelist: Option<Decimal>,
    pub item_price_search_vat: Option<Decimal>,

    /// Monthly query limit.
    pub limit: Option<i64>,
    /// Minimum delay between queries, in seconds.
    pub request_delay: Option<i64>,
    /// Number of allowed domains.
    pub domain_limit: Option<i64>,

    pub over_plan_allowed: bool,
    pub teryt_codes: bool,
    pub excel_add_in: bool,
    pub jpk_vat: bool,
    pub stats: bool,
    pub nip_monitor: bool,

    pub search_by_nip: bool,
    pub search_by_regon: bool,
    pub search_by_krs: bool,

    pub func_is_active: bool,
    pub func_get_invoice_data: bool,
    pub func_get_all_data: bool,
    pub func_get_vies_data: bool,
    pub func_get_vat_status: bool,
    pub func_get_iban_status: bool,
    pub func_get_whitelist_status: bool,
    pub func_search_vat: bool,

    /// Requests made in the current billing period, per function.
    pub invoice_data_count: Option<i64>,
    pub all_data_count: Option<i64>,
    pub firm_status_count: Option<i64>,
    pub vat_status_count: Option<i64>,
    pub vies_status_count: Option<i64>,
    pub iban_status_count: Option<i64>,
    pub whitelist_status_count: Option<i64>,
    pub search_vat_count: Option<i64>,
    pub total_count: Option<i64>,
}

/// Data required to issue an invoice to the firm.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceData {
    pub uid: Option<String>,
    pub nip: Option<String>,

    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,

    pub street: Option<String>,
    pub street_number: Option<String>,
    pub house_number: Option<String>,
    pub city: Option<String>,
    pub post_code: Option<String>,
    pub post_city: Option<String>,

    pub phone: Option<String>,
    pub email: Option<String>,
    pub www: Option<String>,
}

/// PKD (Polish classification of activities) entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessActivity {
    /// PKD code, e.g. `62.01.Z`.
    pub code: String,
    pub description: Option<String>,
    /// Whether this is the firm's primary activity.
    pub primary: bool,
}

/// Complete registry entry of a firm.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllData {
    pub uid: Option<String>,
    /// Entity type as reported by REGON.
    pub kind: Option<String>,
    pub nip: Option<String>,
    pub regon: Option<String>,

    pub name: Option<String>,
    pub short_name: Option<String>,
    pub first_name: Option<String>,
    pub second_name: Option<String>,
    pub last_name: Option<String>,

    pub street: Option<String>,
    pub street_code: Option<String>,
    pub street_number: Option<String>,
    pub house_number: Option<String>,
    pub city: Option<String>,
    pub city_code: Option<String>,
    pub community: Option<String>,
    pub community_code: Option<String>,
    pub county: Option<String>,
    pub county_code: Option<String>,
    pub state: Option<String>,
    pub state_code: Option<String>,
    pub post_code: Option<String>,
    pub post_city: Option<String>,

    pub phone: Option<String>,
    pub email: Option<String>,
    pub www: Option<String>,

    pub creation_date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub registration_date: Option<NaiveDate>,
    pub hold_date: Option<NaiveDate>,
    pub renewal_date: Option<NaiveDate>,
    pub last_update_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    pub registry_entity_code: Option<String>,
    pub registry_entity_name: Option<String>,

    pub registry_code: Option<String>,
    pub registry_name: Option<String>,

    pub record_creation_date: Option<NaiveDate>,
    pub record_number: Option<String>,

    pub basic_legal_form_code: Option<String>,
    pub basic_legal_form_name: Option<String>,

    pub specific_legal_form_code: Option<String>,
    pub specific_legal_form_name: Option<String>,

    pub ownership_form_code: Option<String>,
    pub ownership_form_name: Option<String>,

    /// PKD codes in registry order.
    pub activities: Vec<BusinessActivity>,
}

/// VIES (VAT Information Exchange System) answer for an EU VAT ID.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViesData {
    pub uid: Option<String>,
    pub country_code: Option<String>,
    pub vat_number: Option<String>,
    pub valid: bool,
    pub trader_name: Option<String>,
    pub trader_company_type: Option<String>,
    pub trader_address: Option<String>,
    /// VIES consultation number.
    pub id: Option<String>,
    pub date: Option<NaiveDate>,
    pub source: Option<String>,
}

/// Status of a firm in the VAT payer register.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VatStatus {
    pub uid: Option<String>,
    pub nip: Option<String>,
    pub regon: Option<String>,
    pub name: Option<String>,
    /// Raw status code, see [`VatRegistration`].
    pub status: Option<i64>,
    /// Registry's textual verdict.
    pub result: Option<String>,
    pub date: Option<NaiveDate>,
    pub source: Option<String>,
}

impl VatStatus {
    pub fn registration(&self) -> Option<VatRegistration> {
        self.status.and_then(VatRegistration::from_code)
    }
}

/// Whether a bank account belongs to the firm.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IbanStatus {
    pub uid: Option<String>,
    pub nip: Option<String>,
    pub regon: Option<String>,
    pub iban: Option<String>,
    pub valid: bool,
    /// Registry query identifier.
    pub id: Option<String>,
    pub date: Option<NaiveDate>,
    pub source: Option<String>,
}

/// Whitelist (flat file of VAT payers) check of a firm and bank account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WhitelistStatus {
    pub uid: Option<String>,
    pub nip: Option<String>,
    pub iban: Option<String>,
    pub valid: bool,
    /// Whether the account is a virtual (collection) account.
    pub virtual_account: bool,
    pub vat_status: Option<i64>,
    pub vat_result: Option<String>,
    /// Position of the matching hash in the flat file.
    pub hash_index: Option<i64>,
    /// Position of the matching virtual account mask.
    pub mask_index: Option<i64>,
    pub date: Option<NaiveDate>,
    pub source: Option<String>,
}

impl WhitelistStatus {
    pub fn registration(&self) -> Option<VatRegistration> {
        self.vat_status.and_then(VatRegistration::from_code)
    }
}

/// Person or company acting for a VAT entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatPerson {
    pub company_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub nip: Option<String>,
    pub pesel: Option<String>,
}

/// Entity found in the VAT payer register.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VatEntity {
    pub name: Option<String>,
    pub nip: Option<String>,
    pub regon: Option<String>,
    pub krs: Option<String>,

    pub residence_address: Option<String>,
    pub working_address: Option<String>,

    pub vat_status: Option<i64>,
    pub vat_result: Option<String>,

    pub representatives: Vec<VatPerson>,
    pub authorized_clerks: Vec<VatPerson>,
    pub partners: Vec<VatPerson>,

    pub ibans: Vec<String>,
    pub has_virtual_accounts: bool,

    pub registration_legal_date: Option<NaiveDate>,
    pub registration_denial_date: Option<NaiveDate>,
    pub registration_denial_basis: Option<String>,
    pub restoration_date: Option<NaiveDate>,
    pub restoration_basis: Option<String>,
    pub removal_date: Option<NaiveDate>,
    pub removal_basis: Option<String>,
}

impl VatEntity {
    pub fn registration(&self) -> Option<VatRegistration> {
        self.vat_status.and_then(VatRegistration::from_code)
    }
}

/// Result of a VAT register search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub uid: Option<String>,
    pub results: Vec<VatEntity>,
    /// Registry query identifier.
    pub id: Option<String>,
    pub date: Option<NaiveDate>,
    pub source: Option<String>,
}
