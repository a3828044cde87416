//! HTTP client for authenticated TikTok Shop API communication.
//!
//! This module provides the [`ApiClient`] type, which turns an
//! [`ApiRequest`] into a signed, token-bearing call against the API host.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;

use crate::auth::CredentialStore;
use crate::clients::errors::ApiError;
use crate::clients::http_request::{ApiRequest, HttpMethod};
use crate::clients::http_response::ApiResponse;
use crate::clients::signature::{compute_request_signature, SignableRequest};
use crate::config::TikTokConfig;

/// Header carrying the merchant access token on every API call.
pub const ACCESS_TOKEN_HEADER: &str = "x-tts-access-token";

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making signed requests to the TikTok Shop API.
///
/// For each call the client:
///
/// - obtains a valid access token from the [`CredentialStore`], waiting for
///   the first authorization and refreshing expired tokens as needed
/// - adds the `app_key` and `timestamp` authentication parameters
/// - signs the request and appends the `sign` parameter
/// - attaches the access token header and sends the request
///
/// # Thread Safety
///
/// `ApiClient` is `Send + Sync` and cheap to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use tiktok_shop_api::{ApiClient, ApiRequest, HttpMethod};
///
/// let client = ApiClient::new(config, store);
///
/// let request = ApiRequest::builder(HttpMethod::Get, "/authorization/202309/shops").build();
/// let response = client.call(request).await?;
///
/// if response.is_success() {
///     println!("Shops: {:?}", response.data());
/// }
/// ```
#[derive(Clone, Debug)]
pub struct ApiClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// App credentials and host configuration.
    config: TikTokConfig,
    /// Source of valid access tokens.
    store: Arc<CredentialStore>,
}

// Verify ApiClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiClient>();
};

impl ApiClient {
    /// Creates a new API client.
    ///
    /// # Arguments
    ///
    /// * `config` - App credentials and host configuration
    /// * `store` - Credential store the client draws access tokens from
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(config: TikTokConfig, store: Arc<CredentialStore>) -> Self {
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!("TikTok Shop API Library v{SDK_VERSION} | Rust {rust_version}");

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            config,
            store,
        }
    }

    /// Returns the configuration this client was created with.
    #[must_use]
    pub const fn config(&self) -> &TikTokConfig {
        &self.config
    }

    /// Sends a signed, authenticated request to the API host.
    ///
    /// Blocks until the credential store can produce a valid access token,
    /// which on a fresh process means waiting for the first authorization
    /// to complete.
    ///
    /// The returned [`ApiResponse`] is the parsed envelope regardless of
    /// the vendor's verdict; use [`ApiResponse::is_success`] or
    /// [`ApiResponse::into_data`] to interpret it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if:
    /// - Token acquisition or refresh fails (`Auth`)
    /// - A network error occurs (`Transport`)
    /// - The response body is not JSON (`Parse`)
    pub async fn call(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        // Step 1: Obtain a valid access token, refreshing if necessary
        let access_token = self.store.valid_access_token().await?;

        // Step 2: Assemble the query. Authentication parameters go in
        // first so caller-supplied values take precedence.
        let mut query = BTreeMap::new();
        query.insert(
            "app_key".to_string(),
            self.config.app_key().as_ref().to_string(),
        );
        query.insert("timestamp".to_string(), Utc::now().timestamp().to_string());
        for (key, value) in &request.query {
            query.insert(key.clone(), value.clone());
        }

        // Step 3: Serialize the body once. The signed bytes and the wire
        // bytes must be the same string.
        let body_text = request.body.as_ref().map(serde_json::Value::to_string);

        // Step 4: Compute the signature over the final query set and body
        let signable = SignableRequest {
            path: &request.path,
            query: &query,
            content_type: &request.content_type,
            body: body_text.as_deref(),
        };
        let sign = compute_request_signature(&signable, self.config.app_secret().as_ref());
        query.insert("sign".to_string(), sign);

        // Step 5: Build and send the request
        let url = format!("{}{}", self.config.api_host().as_ref(), request.path);
        let mut builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        };

        builder = builder
            .header("content-type", &request.content_type)
            .header(ACCESS_TOKEN_HEADER, &access_token)
            .query(&query);

        for (key, value) in &request.extra_headers {
            builder = builder.header(key, value);
        }

        if let Some(body_text) = body_text {
            builder = builder.body(body_text);
        }

        let response = builder.send().await?;

        // Step 6: Parse the envelope
        let status = response.status().as_u16();
        let body: serde_json::Value = response.json().await.map_err(|error| ApiError::Parse {
            reason: error.to_string(),
        })?;

        Ok(ApiResponse::new(status, body))
    }

    /// Sends a request and collapses every failure to an empty JSON object.
    ///
    /// Returns the full response envelope on success, including vendor
    /// rejections, which arrive as well-formed envelopes. Transport,
    /// parse, and authentication failures are logged and replaced with
    /// `{}` so callers that only inspect the body never observe an error.
    /// Prefer [`call`](Self::call) in new code.
    pub async fn call_or_empty(&self, request: ApiRequest) -> serde_json::Value {
        let path = request.path.clone();
        match self.call(request).await {
            Ok(response) => response.body,
            Err(error) => {
                tracing::warn!("API call to {} failed: {}", path, error);
                serde_json::json!({})
            }
        }
    }
}
