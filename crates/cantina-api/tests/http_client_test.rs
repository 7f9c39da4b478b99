#![allow(clippy::unwrap_used)]
// Integration tests for `HttpClient` using wiremock.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cantina_api::{
    CredentialStore, Error, ErrorKind, HttpClient, PageParams, Pagination, StaticToken,
    TransportConfig,
};

#[derive(Debug, Deserialize, PartialEq)]
struct Item {
    id: String,
    name: String,
}

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, HttpClient, Arc<StaticToken>) {
    let server = MockServer::start().await;
    let token = Arc::new(StaticToken::new("tok-123"));
    let credentials: Arc<dyn CredentialStore> = token.clone();
    let client = HttpClient::with_client(
        reqwest::Client::new(),
        &format!("{}/api/v1", server.uri()),
        Some(credentials),
    )
    .unwrap();
    (server, client, token)
}

fn success(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "status": "success", "data": data }))
}

// ── Envelope ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_unwraps_envelope_and_sends_bearer() {
    let (server, client, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/customers/c1"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(success(json!({ "id": "c1", "name": "Ana" })))
        .expect(1)
        .mount(&server)
        .await;

    let item: Item = client.get("customers/c1").await.unwrap();
    assert_eq!(
        item,
        Item {
            id: "c1".into(),
            name: "Ana".into()
        }
    );
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let (server, client, _) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/categories"))
        .and(body_json(json!({ "name": "Bebidas" })))
        .respond_with(success(json!({ "id": "k1", "name": "Bebidas" })))
        .mount(&server)
        .await;

    let item: Item = client
        .post("categories", &json!({ "name": "Bebidas" }))
        .await
        .unwrap();
    assert_eq!(item.id, "k1");
}

#[tokio::test]
async fn test_error_envelope_on_200_is_rejected() {
    let (server, client, _) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/sales"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "error", "message": "Saldo insuficiente" })),
        )
        .mount(&server)
        .await;

    let result: Result<Item, _> = client.post("sales", &json!({})).await;
    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Rejected);
    assert_eq!(err.server_message(), Some("Saldo insuficiente"));
}

#[tokio::test]
async fn test_delete_accepts_missing_data_and_no_content() {
    let (server, client, _) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/products/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/products/p2"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    client.delete("products/p1").await.unwrap();
    client.delete("products/p2").await.unwrap();
}

// ── Pagination ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_page_reshapes_listing() {
    let (server, client, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/products"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "2"))
        .respond_with(success(json!({
            "products": [
                { "id": "p3", "name": "Suco" },
                { "id": "p4", "name": "Pão de queijo" }
            ],
            "total": 4,
            "page": 2,
            "limit": 2,
            "totalPages": 2
        })))
        .mount(&server)
        .await;

    let mut params = Vec::new();
    PageParams::new(2, 2).extend_params(&mut params);
    let page = client
        .get_page::<Item>("products", &params, "products")
        .await
        .unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[1].name, "Pão de queijo");
    assert_eq!(page.pagination, Pagination::new(2, 2, 4, 2));
    assert!(!page.pagination.has_next());
}

// ── Error mapping ───────────────────────────────────────────────────

#[tokio::test]
async fn test_unauthorized_invalidates_credentials() {
    let (server, client, token) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/customers"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "status": "error", "message": "Token expirado" })),
        )
        .mount(&server)
        .await;

    let result: Result<serde_json::Value, _> = client.get("customers").await;
    let err = result.unwrap_err();

    assert!(matches!(err, Error::Unauthorized { .. }), "got: {err:?}");
    assert_eq!(err.server_message(), Some("Token expirado"));
    assert!(!token.is_set());
}

#[tokio::test]
async fn test_field_errors_are_joined() {
    let (server, client, _) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/customers"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "status": "error",
            "message": "Validation failed",
            "errors": [
                { "field": "email", "message": "Invalid email format" },
                { "field": "cpf", "message": "CPF already registered" }
            ]
        })))
        .mount(&server)
        .await;

    let result: Result<Item, _> = client.post("customers", &json!({})).await;
    let err = result.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(
        err.server_message(),
        Some("email: Invalid email format, cpf: CPF already registered")
    );
    assert_eq!(err.field_errors()[1].field, "cpf");
}

#[tokio::test]
async fn test_not_found_keeps_server_message() {
    let (server, client, token) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/people/cpf/12345678909"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({ "status": "error", "message": "Pessoa não encontrada" })),
        )
        .mount(&server)
        .await;

    let result: Result<Item, _> = client.get("people/cpf/12345678909").await;
    let err = result.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.server_message(), Some("Pessoa não encontrada"));
    assert!(token.is_set(), "only 401 clears the token");
}

#[tokio::test]
async fn test_server_error_maps_to_http() {
    let (server, client, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/inventory/report"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let result: Result<serde_json::Value, _> = client.get("inventory/report").await;
    let err = result.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.server_message(), None);
}

#[tokio::test]
async fn test_undecodable_payload_is_deserialization_error() {
    let (server, client, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/customers/c1"))
        .respond_with(success(json!({ "id": 17 })))
        .mount(&server)
        .await;

    let result: Result<Item, _> = client.get("customers/c1").await;
    assert!(matches!(result, Err(Error::Deserialization { .. })));
}

#[tokio::test]
async fn test_timeout_maps_to_timeout() {
    let server = MockServer::start().await;
    let transport = TransportConfig::default().with_timeout(Duration::from_millis(100));
    let client = HttpClient::new(&server.uri(), &transport, None).unwrap();

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(success(json!(null)).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let result: Result<serde_json::Value, _> = client.get("slow").await;
    let err = result.unwrap_err();
    assert!(err.is_transport(), "got: {err:?}");
    assert_eq!(err.kind(), ErrorKind::Timeout);
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    let client = HttpClient::with_client(reqwest::Client::new(), "http://127.0.0.1:9/api", None)
        .unwrap();

    let result: Result<serde_json::Value, _> = client.get("customers").await;
    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(err.server_message(), None);
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let server = MockServer::start().await;
    let client = HttpClient::with_client(reqwest::Client::new(), &server.uri(), None).unwrap();

    Mock::given(method("GET"))
        .and(path("/payment-methods"))
        .respond_with(success(json!([])))
        .mount(&server)
        .await;

    let items: Vec<Item> = client.get("payment-methods").await.unwrap();
    assert!(items.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}
