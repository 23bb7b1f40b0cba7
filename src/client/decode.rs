//! Mapping of registry response documents onto typed records.
//!
//! Every response shares the envelope `<result>…</result>`. When
//! `/result/error/code` is present the response is an error and nothing else
//! is read.

use super::document::Document;
use crate::core::*;

pub const ERROR_CODE: &str = "/result/error/code/text()";
pub const ERROR_DESCRIPTION: &str = "/result/error/description/text()";

/// Registry error carried by `doc`, if any.
///
/// A code that is not an integer is reported as an XML error whose message
/// still carries the registry's description.
pub fn registry_error(doc: &Document) -> Option<Nip24Error> {
    let code = doc.string(ERROR_CODE)?;
    let description = doc.string(ERROR_DESCRIPTION).unwrap_or_default();
    Some(match code.parse() {
        Ok(code) => Nip24Error::Registry { code, description },
        Err(_) => Nip24Error::Xml(format!(
            "malformed registry error code '{code}': {description}"
        )),
    })
}

/// `Err` when the document carries a registry error.
pub fn check(doc: &Document) -> Result<(), Nip24Error> {
    match registry_error(doc) {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

pub fn account_status(doc: &Document) -> AccountStatus {
    let plan = |f: &str| format!("/result/account/billingPlan/{f}/text()");
    let req = |f: &str| format!("/result/account/requests/{f}/text()");

    AccountStatus {
        uid: doc.string("/result/account/uid/text()"),
        billing_plan_name: doc.string(&plan("name")),

        subscription_price: doc.decimal(&plan("subscriptionPrice")),
        item_price: doc.decimal(&plan("itemPrice")),
        item_price_status: doc.decimal(&plan("itemPriceCheckStatus")),
        item_price_invoice: doc.decimal(&plan("itemPriceInvoiceData")),
        item_price_all: doc.decimal(&plan("itemPriceAllData")),
        item_price_iban: doc.decimal(&plan("itemPriceIBANStatus")),
        item_price_whitelist: doc.decimal(&plan("itemPriceWLStatus")),
        item_price_search_vat: doc.decimal(&plan("itemPriceSearchVAT")),

        limit: doc.int(&plan("limit")),
        request_delay: doc.int(&plan("requestDelay")),
        domain_limit: doc.int(&plan("domainLimit")),

        over_plan_allowed: doc.boolean(&plan("overplanAllowed")),
        teryt_codes: doc.boolean(&plan("terytCodes")),
        excel_add_in: doc.boolean(&plan("excelAddin")),
        jpk_vat: doc.boolean(&plan("jpkVat")),
        stats: doc.boolean(&plan("stats")),
        nip_monitor: doc.boolean(&plan("nipMonitor")),

        search_by_nip: doc.boolean(&plan("searchByNip")),
        search_by_regon: doc.boolean(&plan("searchByRegon")),
        search_by_krs: doc.boolean(&plan("searchByKrs")),

        func_is_active: doc.boolean(&plan("funcIsActive")),
        func_get_invoice_data: doc.boolean(&plan("funcGetInvoiceData")),
        func_get_all_data: doc.boolean(&plan("funcGetAllData")),
        func_get_vies_data: doc.boolean(&plan("funcGetVIESData")),
        func_get_vat_status: doc.boolean(&plan("funcGetVATStatus")),
        func_get_iban_status: doc.boolean(&plan("funcGetIBANStatus")),
        func_get_whitelist_status: doc.boolean(&plan("funcGetWLStatus")),
        func_search_vat: doc.boolean(&plan("funcSearchVAT")),

        invoice_data_count: doc.int(&req("invoiceData")),
        all_data_count: doc.int(&req("allData")),
        firm_status_count: doc.int(&req("firmStatus")),
        vat_status_count: doc.int(&req("vatStatus")),
        vies_status_count: doc.int(&req("viesStatus")),
        iban_status_count: doc.int(&req("ibanStatus")),
        whitelist_status_count: doc.int(&req("wlStatus")),
        search_vat_count: doc.int(&req("searchVAT")),
        total_count: doc.int(&req("total")),
    }
}

pub fn invoice_data(doc: &Document) -> InvoiceData {
    let f = |name: &str| doc.string(&format!("/result/firm/{name}/text()"));

    InvoiceData {
        uid: f("uid"),
        nip: f("nip"),
        name: f("name"),
        first_name: f("firstname"),
        last_name: f("lastname"),
        street: f("street"),
        street_number: f("streetNumber"),
        house_number: f("houseNumber"),
        city: f("city"),
        post_code: f("postCode"),
        post_city: f("postCity"),
        phone: f("phone"),
        email: f("email"),
        www: f("www"),
    }
}

pub fn all_data(doc: &Document) -> AllData {
    let f = |name: &str| doc.string(&format!("/result/firm/{name}/text()"));
    let d = |name: &str| doc.date(&format!("/result/firm/{name}/text()"));

    let activities = doc
        .repeated("/result/firm/PKDs/PKD", Some("code"))
        .filter_map(|pkd| {
            Some(BusinessActivity {
                code: doc.string(&format!("{pkd}/code/text()"))?,
                description: doc.string(&format!("{pkd}/description/text()")),
                primary: doc.boolean(&format!("{pkd}/primary/text()")),
            })
        })
        .collect();

    AllData {
        uid: f("uid"),
        kind: f("type"),
        nip: f("nip"),
        regon: f("regon"),

        name: f("name"),
        short_name: f("shortname"),
        first_name: f("firstname"),
        second_name: f("secondname"),
        last_name: f("lastname"),

        street: f("street"),
        street_code: f("streetCode"),
        street_number: f("streetNumber"),
        house_number: f("houseNumber"),
        city: f("city"),
        city_code: f("cityCode"),
        community: f("community"),
        community_code: f("communityCode"),
        county: f("county"),
        county_code: f("countyCode"),
        state: f("state"),
        state_code: f("stateCode"),
        post_code: f("postCode"),
        post_city: f("postCity"),

        phone: f("phone"),
        email: f("email"),
        www: f("www"),

        creation_date: d("creationDate"),
        start_date: d("startDate"),
        registration_date: d("registrationDate"),
        hold_date: d("holdDate"),
        renewal_date: d("renevalDate"),
        last_update_date: d("lastUpdateDate"),
        end_date: d("endDate"),

        registry_entity_code: f("registryEntity/code"),
        registry_entity_name: f("registryEntity/name"),

        registry_code: f("registry/code"),
        registry_name: f("registry/name"),

        record_creation_date: d("record/created"),
        record_number: f("record/number"),

        basic_legal_form_code: f("basicLegalForm/code"),
        basic_legal_form_name: f("basicLegalForm/name"),

        specific_legal_form_code: f("specificLegalForm/code"),
        specific_legal_form_name: f("specificLegalForm/name"),

        ownership_form_code: f("ownershipForm/code"),
        ownership_form_name: f("ownershipForm/name"),

        activities,
    }
}

pub fn vies_data(doc: &Document) -> ViesData {
    let f = |name: &str| format!("/result/vies/{name}/text()");

    ViesData {
        uid: doc.string(&f("uid")),
        country_code: doc.string(&f("countryCode")),
        vat_number: doc.string(&f("vatNumber")),
        valid: doc.boolean(&f("valid")),
        trader_name: doc.string(&f("traderName")),
        trader_company_type: doc.string(&f("traderCompanyType")),
        trader_address: doc.string(&f("traderAddress")),
        id: doc.string(&f("id")),
        date: doc.date(&f("date")),
        source: doc.string(&f("source")),
    }
}

pub fn vat_status(doc: &Document) -> VatStatus {
    let f = |name: &str| format!("/result/vat/{name}/text()");

    VatStatus {
        uid: doc.string(&f("uid")),
        nip: doc.string(&f("nip")),
        regon: doc.string(&f("regon")),
        name: doc.string(&f("name")),
        status: doc.int(&f("status")),
        result: doc.string(&f("result")),
        date: doc.date(&f("date")),
        source: doc.string(&f("source")),
    }
}

pub fn iban_status(doc: &Document) -> IbanStatus {
    let f = |name: &str| format!("/result/iban/{name}/text()");

    IbanStatus {
        uid: doc.string(&f("uid")),
        nip: doc.string(&f("nip")),
        regon: doc.string(&f("regon")),
        iban: doc.string(&f("iban")),
        valid: doc.boolean(&f("valid")),
        id: doc.string(&f("id")),
        date: doc.date(&f("date")),
        source: doc.string(&f("source")),
    }
}

pub fn whitelist_status(doc: &Document) -> WhitelistStatus {
    let f = |name: &str| format!("/result/whitelist/{name}/text()");

    WhitelistStatus {
        uid: doc.string(&f("uid")),
        nip: doc.string(&f("nip")),
        iban: doc.string(&f("iban")),
        valid: doc.boolean(&f("valid")),
        virtual_account: doc.boolean(&f("virtual")),
        vat_status: doc.int(&f("vatStatus")),
        vat_result: doc.string(&f("vatResult")),
        hash_index: doc.int(&f("hashIndex")),
        mask_index: doc.int(&f("maskIndex")),
        date: doc.date(&f("date")),
        source: doc.string(&f("source")),
    }
}

pub fn search_result(doc: &Document) -> SearchResult {
    let results = doc
        .repeated("/result/search/entities/entity", Some("nip"))
        .map(|entity| vat_entity(doc, &entity))
        .collect();

    SearchResult {
        uid: doc.string("/result/search/uid/text()"),
        results,
        id: doc.string("/result/search/id/text()"),
        date: doc.date("/result/search/date/text()"),
        source: doc.string("/result/search/source/text()"),
    }
}

fn vat_entity(doc: &Document, prefix: &str) -> VatEntity {
    let f = |name: &str| format!("{prefix}/{name}/text()");

    VatEntity {
        name: doc.string(&f("name")),
        nip: doc.string(&f("nip")),
        regon: doc.string(&f("regon")),
        krs: doc.string(&f("krs")),

        residence_address: doc.string(&f("residenceAddress")),
        working_address: doc.string(&f("workingAddress")),

        vat_status: doc.int(&f("vatStatus")),
        vat_result: doc.string(&f("vatResult")),

        representatives: vat_persons(doc, &format!("{prefix}/representatives/representative")),
        authorized_clerks: vat_persons(doc, &format!("{prefix}/authorizedClerks/authorizedClerk")),
        partners: vat_persons(doc, &format!("{prefix}/partners/partner")),

        ibans: doc
            .repeated(&format!("{prefix}/ibans/iban"), None)
            .filter_map(|iban| doc.string(&iban))
            .collect(),
        has_virtual_accounts: doc.boolean(&f("hasVirtualAccounts")),

        registration_legal_date: doc.date(&f("registrationLegalDate")),
        registration_denial_date: doc.date(&f("registrationDenialDate")),
        registration_denial_basis: doc.string(&f("registrationDenialBasis")),
        restoration_date: doc.date(&f("restorationDate")),
        restoration_basis: doc.string(&f("restorationBasis")),
        removal_date: doc.date(&f("removalDate")),
        removal_basis: doc.string(&f("removalBasis")),
    }
}

fn vat_persons(doc: &Document, base: &str) -> Vec<VatPerson> {
    doc.repeated(base, None)
        .map(|p| {
            let f = |name: &str| doc.string(&format!("{p}/{name}/text()"));
            VatPerson {
                company_name: f("companyName"),
                first_name: f("firstName"),
                last_name: f("lastName"),
                nip: f("nip"),
                pesel: f("pesel"),
            }
        })
        .collect()
}
