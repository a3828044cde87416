//! Integration tests for the signed request pipeline.
//!
//! These tests run real HTTP round trips against a mock API host and
//! verify the wire format: authentication parameters, the access token
//! header, and above all that the `sign` parameter matches an independent
//! recomputation from what was actually observed on the wire.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tiktok_shop_api::{
    compute_request_signature, ApiClient, ApiError, ApiRequest, AppKey, AppSecret, Credential,
    CredentialStore, HostUrl, HttpMethod, SignableRequest, TikTokConfig, TokenClient,
};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

const APP_SECRET: &str = "test-app-secret";

/// Creates a client over an installed, unexpired credential.
async fn create_client(api_host: &str) -> ApiClient {
    let config = TikTokConfig::builder()
        .app_key(AppKey::new("test-app-key").unwrap())
        .app_secret(AppSecret::new(APP_SECRET).unwrap())
        .auth_host(HostUrl::new("http://localhost:1").unwrap())
        .api_host(HostUrl::new(api_host).unwrap())
        .build()
        .unwrap();

    let store = Arc::new(CredentialStore::new(TokenClient::new(config.clone())));
    store
        .install(Credential::new(
            "test-access-token".to_string(),
            Utc::now() + Duration::hours(2),
            "test-refresh-token".to_string(),
            Utc::now() + Duration::days(30),
        ))
        .await;

    ApiClient::new(config, store)
}

fn success_envelope() -> serde_json::Value {
    serde_json::json!({"code": 0, "message": "Success", "request_id": "req-1", "data": {}})
}

/// Matches requests whose `sign` parameter agrees with a recomputation
/// over the request as observed on the wire.
struct ValidSignature;

impl Match for ValidSignature {
    fn matches(&self, request: &Request) -> bool {
        let query: BTreeMap<String, String> = request
            .url
            .query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        let Some(received) = query.get("sign").cloned() else {
            return false;
        };
        if !query.contains_key("app_key") || !query.contains_key("timestamp") {
            return false;
        }

        let body = String::from_utf8(request.body.clone()).ok();
        let signable = SignableRequest {
            path: request.url.path(),
            query: &query,
            content_type: "application/json",
            body: body.as_deref().filter(|body| !body.is_empty()),
        };

        compute_request_signature(&signable, APP_SECRET) == received
    }
}

// === Integration Tests ===

#[tokio::test]
async fn test_get_request_carries_a_valid_signature() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/authorization/202309/shops"))
        .and(ValidSignature)
        .respond_with(ResponseTemplate::new(200).set_body_json(success_envelope()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri()).await;
    let request = ApiRequest::builder(HttpMethod::Get, "/authorization/202309/shops").build();

    let response = client.call(request).await.unwrap();
    assert!(response.is_success());
}

#[tokio::test]
async fn test_post_signature_covers_the_body() {
    let mock_server = MockServer::start().await;

    let body = serde_json::json!({"title": "Winter Coat", "price": "49.99"});
    Mock::given(method("POST"))
        .and(path("/product/202309/products"))
        .and(body_json(body.clone()))
        .and(ValidSignature)
        .respond_with(ResponseTemplate::new(200).set_body_json(success_envelope()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri()).await;
    let request = ApiRequest::builder(HttpMethod::Post, "/product/202309/products")
        .body(body)
        .build();

    client.call(request).await.unwrap();
}

#[tokio::test]
async fn test_caller_query_params_are_signed_too() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/product/202502/products/search"))
        .and(query_param("shop_cipher", "cipher-1"))
        .and(query_param("page_size", "100"))
        .and(ValidSignature)
        .respond_with(ResponseTemplate::new(200).set_body_json(success_envelope()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri()).await;
    let request = ApiRequest::builder(HttpMethod::Post, "/product/202502/products/search")
        .query_param("shop_cipher", "cipher-1")
        .query_param("page_size", "100")
        .build();

    client.call(request).await.unwrap();
}

#[tokio::test]
async fn test_access_token_travels_in_the_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orders"))
        .and(header("x-tts-access-token", "test-access-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_envelope()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri()).await;
    client
        .call(ApiRequest::builder(HttpMethod::Get, "/orders").build())
        .await
        .unwrap();

    // The token must never leak into the query string
    let requests = mock_server.received_requests().await.unwrap();
    assert!(!requests[0]
        .url
        .query_pairs()
        .any(|(key, _)| key == "access_token"));
}

#[tokio::test]
async fn test_rejection_envelope_surfaces_with_request_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 105_002,
            "message": "access token expired",
            "request_id": "req-correlation-9",
        })))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri()).await;
    let response = client
        .call(ApiRequest::builder(HttpMethod::Get, "/orders").build())
        .await
        .unwrap();

    assert!(!response.is_success());
    let error = response.into_data::<serde_json::Value>().unwrap_err();
    match error {
        ApiError::Rejected {
            code, request_id, ..
        } => {
            assert_eq!(code, 105_002);
            assert_eq!(request_id, Some("req-correlation-9".to_string()));
        }
        other => panic!("Expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn test_call_or_empty_collapses_transport_failures() {
    // Nothing listens on this port; the call fails at connect time
    let client = create_client("http://localhost:1").await;

    let body = client
        .call_or_empty(ApiRequest::builder(HttpMethod::Get, "/orders").build())
        .await;

    assert_eq!(body, serde_json::json!({}));
}
