//! End-to-end tests of `Nip24Client` against a mock registry.
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | GET | `check/account/status` | `account_status_*` |
//! | GET | `check/firm/{family}/{id}` | `is_active_*` |
//! | GET | `get/invoice/{family}/{id}` | `invoice_data_*` |
//! | GET | `get/all/{family}/{id}` | `all_data_*` |
//! | GET | `get/vies/euvat/{id}` | `vies_data_*` |
//! | GET | `check/vat/direct/{family}/{id}` | `vat_status_*` |
//! | GET | `check/iban/{family}/{id}/{iban}/{date}` | `iban_status_*` |
//! | GET | `check/whitelist/{family}/{id}/{iban}/{date}` | `whitelist_status_*` |
//! | GET | `search/vat/{family}/{id}/{date}` | `search_vat_*` |

#![cfg(feature = "client")]

use chrono::NaiveDate;
use nip24::client::{ClientConfig, Credentials, Nip24Client, SignedRequest};
use nip24::core::*;
use nip24::number::Family;
use wiremock::matchers::{header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const NIP: &str = "7171642051";
const ACCOUNT: &str = "49154000046458439719826658";

fn config(mock_server: &MockServer) -> ClientConfig {
    ClientConfig::test()
        .with_url(format!("{}/api", mock_server.uri()))
        .with_timeout(5)
}

fn test_client(mock_server: &MockServer) -> Nip24Client {
    Nip24Client::new(config(mock_server)).unwrap()
}

fn xml(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "application/xml")
        .set_body_string(format!(r#"<?xml version="1.0" encoding="UTF-8"?>{body}"#))
}

fn registry_error(code: i32, description: &str) -> ResponseTemplate {
    xml(&format!(
        "<result><error><code>{code}</code><description>{description}</description></error></result>"
    ))
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── Request headers ────────────────────────────────────────────────────

#[tokio::test]
async fn requests_carry_mac_authorization_and_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/check/account/status"))
        .and(header_regex(
            "authorization",
            r#"^MAC id="test_id", ts="\d+", nonce="[0-9a-f]{8}", mac="[A-Za-z0-9+/]+={0,2}"$"#,
        ))
        .and(header_regex("user-agent", r"^Shop/2\.0 NIP24Client/\S+ Rust/\S+$"))
        .respond_with(xml("<result><account><uid>u</uid></account></result>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Nip24Client::new(config(&mock_server).with_app("Shop/2.0")).unwrap();
    let status = client.account_status().await.unwrap();
    assert_eq!(status.uid.as_deref(), Some("u"));
}

#[tokio::test]
async fn mac_verifies_on_the_server_side() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(xml("<result><account/></result>"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    client.account_status().await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let header = requests[0]
        .headers
        .get("authorization")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();

    let field = |name: &str| -> String {
        let start = header.find(&format!("{name}=\"")).unwrap() + name.len() + 2;
        let end = header[start..].find('"').unwrap() + start;
        header[start..end].to_string()
    };

    // Signed against the server address, not the recorded request URL.
    let signed_url =
        url::Url::parse(&format!("{}{}", mock_server.uri(), requests[0].url.path())).unwrap();
    let expected = SignedRequest::sign_with(
        "GET",
        &signed_url,
        &Credentials::test(),
        field("ts").parse().unwrap(),
        field("nonce"),
    )
    .unwrap();
    assert_eq!(field("mac"), expected.mac);
}

#[tokio::test]
async fn every_request_gets_a_fresh_nonce() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(xml("<result><account/></result>"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    client.account_status().await.unwrap();
    client.account_status().await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let auth: Vec<&str> = requests
        .iter()
        .map(|r| r.headers.get("authorization").unwrap().to_str().unwrap())
        .collect();
    assert_ne!(auth[0], auth[1]);
}

// ── check/firm ─────────────────────────────────────────────────────────

#[tokio::test]
async fn is_active_true_without_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/check/firm/nip/7171642051"))
        .respond_with(xml("<result><firm><active>true</active></firm></result>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    assert!(client.is_active(Family::Nip, NIP).await.unwrap());
}

#[tokio::test]
async fn is_active_code_9_means_inactive() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/check/firm/nip/7171642051"))
        .respond_with(registry_error(9, "Firma zawiesiła lub zakończyła działalność"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let active = client.is_active(Family::Nip, "717-164-20-51").await.unwrap();
    assert!(!active);
}

#[tokio::test]
async fn is_active_other_codes_are_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/check/firm/regon/192598184"))
        .respond_with(registry_error(8, "Brak uprawnień"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client.is_active(Family::Regon, "192598184").await.unwrap_err();
    assert_eq!(err.code(), 8);
    assert_eq!(err.outcome().message, "Brak uprawnień");
}

#[tokio::test]
async fn is_active_by_krs_uses_padded_number() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/check/firm/krs/0000012345"))
        .respond_with(xml("<result/>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    assert!(client.is_active(Family::Krs, "12345").await.unwrap());
}

// ── Validation happens before any request ───────────────────────────────

#[tokio::test]
async fn invalid_nip_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(xml("<result/>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client.invoice_data(Family::Nip, "7171642052").await.unwrap_err();
    assert!(matches!(err, Nip24Error::Validation { field: "nip", .. }));
    assert_eq!(err.code(), 0);
}

#[tokio::test]
async fn invalid_account_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(xml("<result/>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .whitelist_status(Family::Nip, NIP, "49154000046458439719826659", None)
        .await
        .unwrap_err();
    assert!(matches!(err, Nip24Error::Validation { field: "iban", .. }));
}

// ── get/invoice, get/all ────────────────────────────────────────────────

#[tokio::test]
async fn invoice_data_decodes_firm() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/get/invoice/nip/7171642051"))
        .respond_with(xml(
            "<result><firm><nip>7171642051</nip><name>Testowa Sp. z o.o.</name>\
             <street>Kwiatowa</street><streetNumber>10</streetNumber><city>Warszawa</city>\
             <postCode>02-001</postCode></firm></result>",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let data = client.invoice_data(Family::Nip, NIP).await.unwrap();
    assert_eq!(data.name.as_deref(), Some("Testowa Sp. z o.o."));
    assert_eq!(data.street_number.as_deref(), Some("10"));
    assert!(data.house_number.is_none());
}

#[tokio::test]
async fn invoice_data_registry_error_returns_no_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/get/invoice/nip/7171642051"))
        .respond_with(xml(
            "<result><error><code>7</code><description>Brak danych</description></error>\
             <firm><name>ignored</name></firm></result>",
        ))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client.invoice_data(Family::Nip, NIP).await.unwrap_err();
    assert!(err.is_registry_error());
    assert_eq!(err.outcome(), ErrorOutcome { code: 7, message: "Brak danych".into() });
}

#[tokio::test]
async fn all_data_by_euvat() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/get/all/euvat/PL7171642051"))
        .respond_with(xml(
            "<result><firm><nip>7171642051</nip><PKDs>\
             <PKD><code>62.01.Z</code><primary>true</primary></PKD>\
             </PKDs></firm></result>",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let data = client.all_data(Family::EuVat, "PL 717-164-20-51").await.unwrap();
    assert_eq!(data.activities.len(), 1);
    assert!(data.activities[0].primary);
}

// ── get/vies, check/vat/direct ──────────────────────────────────────────

#[tokio::test]
async fn vies_data_uses_normalized_vat_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/get/vies/euvat/DE123456789"))
        .respond_with(xml(
            "<result><vies><countryCode>DE</countryCode><vatNumber>123456789</vatNumber>\
             <valid>true</valid></vies></result>",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let vies = client.vies_data("de 123-456-789").await.unwrap();
    assert!(vies.valid);
    assert_eq!(vies.vat_number.as_deref(), Some("123456789"));
}

#[tokio::test]
async fn vat_status_decodes_registration() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/check/vat/direct/nip/7171642051"))
        .respond_with(xml(
            "<result><vat><nip>7171642051</nip><status>1</status>\
             <result>Niezarejestrowany</result><date>2024-03-01</date></vat></result>",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let vs = client.vat_status(Family::Nip, NIP).await.unwrap();
    assert_eq!(vs.registration(), Some(VatRegistration::NotRegistered));
    assert_eq!(vs.date, Some(date(2024, 3, 1)));
}

// ── check/iban, check/whitelist, search/vat ─────────────────────────────

#[tokio::test]
async fn iban_status_prefixes_domestic_account() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/api/check/iban/nip/7171642051/PL49154000046458439719826658/2024-03-01",
        ))
        .respond_with(xml(
            "<result><iban><iban>PL49154000046458439719826658</iban><valid>true</valid></iban></result>",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let status = client
        .iban_status(Family::Nip, NIP, ACCOUNT, Some(date(2024, 3, 1)))
        .await
        .unwrap();
    assert!(status.valid);
}

#[tokio::test]
async fn whitelist_status_defaults_to_today() {
    let mock_server = MockServer::start().await;
    let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();

    Mock::given(method("GET"))
        .and(path(format!(
            "/api/check/whitelist/nip/7171642051/PL49154000046458439719826658/{today}"
        )))
        .respond_with(xml(
            "<result><whitelist><valid>true</valid><virtual>true</virtual>\
             <vatStatus>2</vatStatus></whitelist></result>",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let wl = client
        .whitelist_status(Family::Nip, NIP, &format!("PL{ACCOUNT}"), None)
        .await
        .unwrap();
    assert!(wl.valid);
    assert!(wl.virtual_account);
    assert_eq!(wl.registration(), Some(VatRegistration::Active));
}

#[tokio::test]
async fn search_vat_registry_lists_entities() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search/vat/nip/7171642051/2024-03-01"))
        .respond_with(xml(
            "<result><search><entities>\
             <entity><nip>7171642051</nip><vatStatus>2</vatStatus></entity>\
             <entity><nip>5260250274</nip><vatStatus>3</vatStatus></entity>\
             </entities><id>X-1</id></search></result>",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let sr = client
        .search_vat_registry(Family::Nip, NIP, Some(date(2024, 3, 1)))
        .await
        .unwrap();
    assert_eq!(sr.results.len(), 2);
    assert_eq!(sr.results[1].nip.as_deref(), Some("5260250274"));
    assert_eq!(sr.id.as_deref(), Some("X-1"));
}

// ── Transport failures ─────────────────────────────────────────────────

#[tokio::test]
async fn non_xml_error_response_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client.account_status().await.unwrap_err();
    assert!(matches!(err, Nip24Error::Transport(_)));
    assert_eq!(err.code(), 0);
}

#[tokio::test]
async fn xml_error_page_without_code_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_string("<html><body>Service Unavailable</body></html>"),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);

    let err = client.is_active(Family::Nip, NIP).await.unwrap_err();
    assert!(matches!(&err, Nip24Error::Transport(msg) if msg.contains("503")));
    assert_eq!(err.code(), 0);

    let err = client.account_status().await.unwrap_err();
    assert!(matches!(err, Nip24Error::Transport(_)));
}

#[tokio::test]
async fn registry_error_with_http_error_status_keeps_code() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/get/invoice/nip/7171642051"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string(
                "<result><error><code>7</code><description>Brak danych</description></error></result>",
            ),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client.invoice_data(Family::Nip, NIP).await.unwrap_err();
    assert_eq!(err.code(), 7);
    assert_eq!(err.outcome().message, "Brak danych");
}

#[tokio::test]
async fn inactive_firm_with_http_error_status_is_still_inactive() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/check/firm/nip/7171642051"))
        .respond_with(ResponseTemplate::new(404).set_body_string(
            "<result><error><code>9</code><description>Nieaktywna</description></error></result>",
        ))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    assert!(!client.is_active(Family::Nip, NIP).await.unwrap());
}

#[tokio::test]
async fn malformed_xml_is_xml_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<result><account>"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client.account_status().await.unwrap_err();
    assert!(matches!(err, Nip24Error::Xml(_)));
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let client = Nip24Client::new(
        ClientConfig::test()
            .with_url("http://127.0.0.1:1/api")
            .with_timeout(2),
    )
    .unwrap();
    let err = client.account_status().await.unwrap_err();
    assert!(matches!(err, Nip24Error::Transport(_)));
    assert_eq!(err.outcome().code, 0);
}
