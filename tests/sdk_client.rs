//! The typed relay client against a live relay.

use relay_sdk::{CaliforniaSearch, ColoradoSearch, RelayClient};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

use common::{config_for, start_relay, CA_PATH, CO_PATH, IL_PATH};

#[tokio::test]
async fn client_round_trips_all_jurisdictions() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(IL_PATH))
        .and(query_param("q", "jones"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": { "records": [{ "Last Name": "JONES" }] }
        })))
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path(CO_PATH))
        .and(query_param("lastname", "Doe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "lastname": "Doe", "licenseexpirationdate": "2026-01-31T00:00:00.000" }
        ])))
        .mount(&upstream)
        .await;
    Mock::given(method("POST"))
        .and(path(CA_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "licenseDetails": [] })))
        .mount(&upstream)
        .await;

    let relay = start_relay(config_for(&upstream)).await;
    let client = RelayClient::new(&relay.url(""));

    let reply = client.illinois("jones").await.unwrap();
    assert!(reply.is_success());
    assert_eq!(reply.body["result"]["records"][0]["Last Name"], "JONES");

    let reply = client
        .colorado(&ColoradoSearch {
            name: Some("doe".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(reply.is_success());
    assert_eq!(reply.body[0]["licenseexpirationdate"], "01/31/2026");

    let reply = client
        .california(&CaliforniaSearch {
            license_numbers: Some(vec!["A123".into()]),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(reply.is_success());
    assert_eq!(reply.body, json!({ "licenseDetails": [] }));
}

#[tokio::test]
async fn client_surfaces_error_payloads() {
    let upstream = MockServer::start().await;
    let relay = start_relay(config_for(&upstream)).await;
    let client = RelayClient::new(&relay.url(""));

    let reply = client.illinois("").await.unwrap();
    assert_eq!(reply.status, 400);
    assert_eq!(reply.error_message(), Some("validation failed"));

    let reply = client
        .california(&CaliforniaSearch {
            license_numbers: Some(Vec::new()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(reply.status, 400);

    let reply = client.raw(reqwest::Method::GET, "/unknown").await.unwrap();
    assert_eq!(reply.status, 404);
    assert!(reply.body.is_null());
}
