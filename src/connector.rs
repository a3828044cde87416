//! High-level connector for TikTok Shop apps.
//!
//! This module provides [`ShopConnector`], the facade that ties the
//! credential store, the request pipeline, and the typed resources
//! together for the common single-shop integration.
//!
//! # Example
//!
//! ```rust,ignore
//! use tiktok_shop_api::{AppKey, AppSecret, ShopConnector, TikTokConfig};
//!
//! let config = TikTokConfig::builder()
//!     .app_key(AppKey::new("your-app-key")?)
//!     .app_secret(AppSecret::new("your-app-secret")?)
//!     .build()?;
//!
//! let connector = ShopConnector::new(config);
//!
//! // Restore a persisted credential, or run the authorization flow
//! connector.credential_store().install(saved_credential).await;
//!
//! // Activate the authorized shop, then make shop-scoped calls
//! let shops = connector.authorized_shops().await?;
//! println!("Authorized for {} shop(s)", shops.len());
//!
//! let page = connector.search_products(100).await?;
//! println!("{} products total", page.total_count);
//! ```

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::oauth::TokenClient;
use crate::auth::CredentialStore;
use crate::clients::{ApiClient, ApiError, ApiRequest, ApiResponse, HttpMethod};
use crate::config::TikTokConfig;
use crate::resources::{ProductPage, Shop, ShopList};

/// Path of the authorized shops endpoint.
pub const AUTHORIZED_SHOPS_PATH: &str = "/authorization/202309/shops";

/// Path of the product search endpoint.
pub const PRODUCT_SEARCH_PATH: &str = "/product/202502/products/search";

/// Facade for a single-shop TikTok Shop integration.
///
/// The connector owns the credential store, the signed request pipeline,
/// and the active-shop slot. The slot starts empty and is filled by the
/// first successful [`authorized_shops`](Self::authorized_shops) call;
/// shop-scoped operations fail with [`ApiError::NoAuthorizedShop`] until
/// then. A single active shop is assumed for the process lifetime.
///
/// # Thread Safety
///
/// `ShopConnector` is `Send + Sync`. Wrap it in an [`Arc`] to share it
/// across tasks; all methods take `&self`.
#[derive(Debug)]
pub struct ShopConnector {
    /// Signed request pipeline.
    client: ApiClient,
    /// Credential store shared with the pipeline.
    store: Arc<CredentialStore>,
    /// The shop that shop-scoped calls act on.
    shop: RwLock<Option<Shop>>,
}

// Verify ShopConnector is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShopConnector>();
};

impl ShopConnector {
    /// Creates a connector from app configuration.
    ///
    /// The connector starts with no credential and no active shop. Wire
    /// the credential store into the authorization flow (or install a
    /// persisted credential) before making API calls.
    #[must_use]
    pub fn new(config: TikTokConfig) -> Self {
        let store = Arc::new(CredentialStore::new(TokenClient::new(config.clone())));
        let client = ApiClient::new(config, Arc::clone(&store));

        Self {
            client,
            store,
            shop: RwLock::new(None),
        }
    }

    /// Returns a handle to the credential store.
    ///
    /// Use this to install persisted credentials or to drive the
    /// authorization callback flow.
    #[must_use]
    pub fn credential_store(&self) -> Arc<CredentialStore> {
        Arc::clone(&self.store)
    }

    /// Returns the active shop, if one has been activated.
    pub async fn current_shop(&self) -> Option<Shop> {
        self.shop.read().await.clone()
    }

    /// Fetches the shops the app is authorized for and activates the first.
    ///
    /// The full list is returned. When the list is non-empty, the first
    /// shop becomes the active shop for subsequent shop-scoped calls,
    /// replacing any previous activation. An empty list leaves the slot
    /// unchanged and logs a warning.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the vendor declines the call,
    /// or the pipeline's transport, parse, and auth errors.
    pub async fn authorized_shops(&self) -> Result<Vec<Shop>, ApiError> {
        let request = ApiRequest::builder(HttpMethod::Get, AUTHORIZED_SHOPS_PATH).build();
        let response = self.client.call(request).await?;
        let list: ShopList = response.into_data()?;

        match list.shops.first() {
            Some(shop) => {
                tracing::info!("Activated shop {} ({})", shop.name, shop.code);
                *self.shop.write().await = Some(shop.clone());
            }
            None => {
                tracing::warn!("Authorization reports no shops, shop-scoped calls stay unavailable");
            }
        }

        Ok(list.shops)
    }

    /// Searches the active shop's products, returning one page of results.
    ///
    /// # Arguments
    ///
    /// * `page_size` - Number of products per page
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NoAuthorizedShop`] immediately if no shop is
    /// active. Otherwise propagates the pipeline's errors and the vendor's
    /// rejection, if any.
    pub async fn search_products(&self, page_size: u32) -> Result<ProductPage, ApiError> {
        // Resolve the shop before touching the network so the missing-shop
        // case cannot block on token acquisition
        let cipher = self
            .shop
            .read()
            .await
            .as_ref()
            .map(|shop| shop.cipher.clone())
            .ok_or(ApiError::NoAuthorizedShop)?;

        let request = ApiRequest::builder(HttpMethod::Post, PRODUCT_SEARCH_PATH)
            .query_param("shop_cipher", cipher)
            .query_param("page_size", page_size.to_string())
            .build();

        self.client.call(request).await?.into_data()
    }

    /// Sends an arbitrary signed request through the pipeline.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn call(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.client.call(request).await
    }

    /// Sends an arbitrary signed request, collapsing failures to `{}`.
    ///
    /// See [`ApiClient::call_or_empty`].
    pub async fn call_or_empty(&self, request: ApiRequest) -> serde_json::Value {
        self.client.call_or_empty(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credential;
    use crate::config::{AppKey, AppSecret, HostUrl};
    use chrono::{Duration, Utc};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_connector(api_host: &str) -> ShopConnector {
        let config = TikTokConfig::builder()
            .app_key(AppKey::new("test-app-key").unwrap())
            .app_secret(AppSecret::new("test-app-secret").unwrap())
            .auth_host(HostUrl::new("http://localhost:1").unwrap())
            .api_host(HostUrl::new(api_host).unwrap())
            .build()
            .unwrap();
        ShopConnector::new(config)
    }

    fn fresh_credential() -> Credential {
        Credential::new(
            "test-access-token".to_string(),
            Utc::now() + Duration::hours(2),
            "test-refresh-token".to_string(),
            Utc::now() + Duration::days(30),
        )
    }

    fn shops_envelope(shops: serde_json::Value) -> serde_json::Value {
        json!({"code": 0, "message": "Success", "request_id": "req-1", "data": {"shops": shops}})
    }

    #[tokio::test]
    async fn test_current_shop_starts_empty() {
        let connector = create_connector("http://localhost:1");
        assert!(connector.current_shop().await.is_none());
    }

    #[tokio::test]
    async fn test_search_products_without_active_shop_fails_offline() {
        // No credential installed and no server running: the missing-shop
        // check must fire before any waiting or network activity
        let connector = create_connector("http://localhost:1");

        let result = connector.search_products(10).await;
        assert!(matches!(result, Err(ApiError::NoAuthorizedShop)));
    }

    #[tokio::test]
    async fn test_credential_store_handles_share_one_store() {
        let connector = create_connector("http://localhost:1");
        let first = connector.credential_store();
        let second = connector.credential_store();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_authorized_shops_activates_the_first_shop() {
        let mock_server = MockServer::start().await;

        let shops = json!([
            {"cipher": "c1", "code": "SHOP1", "id": 1, "name": "First",
             "region": "US", "seller_type": "LOCAL"},
            {"cipher": "c2", "code": "SHOP2", "id": 2, "name": "Second",
             "region": "GB", "seller_type": "CROSS_BORDER"},
        ]);
        Mock::given(method("GET"))
            .and(path(AUTHORIZED_SHOPS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(shops_envelope(shops)))
            .expect(1)
            .mount(&mock_server)
            .await;

        let connector = create_connector(&mock_server.uri());
        connector.credential_store().install(fresh_credential()).await;

        let shops = connector.authorized_shops().await.unwrap();

        assert_eq!(shops.len(), 2);
        let active = connector.current_shop().await.unwrap();
        assert_eq!(active.code, "SHOP1");
        assert_eq!(active.cipher, "c1");
    }

    #[tokio::test]
    async fn test_authorized_shops_with_empty_list_leaves_slot_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(AUTHORIZED_SHOPS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(shops_envelope(json!([]))))
            .mount(&mock_server)
            .await;

        let connector = create_connector(&mock_server.uri());
        connector.credential_store().install(fresh_credential()).await;

        let shops = connector.authorized_shops().await.unwrap();

        assert!(shops.is_empty());
        assert!(connector.current_shop().await.is_none());
    }

    #[tokio::test]
    async fn test_authorized_shops_rejection_is_tagged() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(AUTHORIZED_SHOPS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 105_001,
                "message": "app_key not valid",
                "request_id": "req-7",
            })))
            .mount(&mock_server)
            .await;

        let connector = create_connector(&mock_server.uri());
        connector.credential_store().install(fresh_credential()).await;

        let error = connector.authorized_shops().await.unwrap_err();
        match error {
            ApiError::Rejected { code, message, .. } => {
                assert_eq!(code, 105_001);
                assert_eq!(message, "app_key not valid");
            }
            other => panic!("Expected Rejected, got {other:?}"),
        }
        assert!(connector.current_shop().await.is_none());
    }

    #[tokio::test]
    async fn test_search_products_sends_shop_scope() {
        let mock_server = MockServer::start().await;

        let shops = json!([
            {"cipher": "cipher-xyz", "code": "SHOP1", "id": 1, "name": "First",
             "region": "US", "seller_type": "LOCAL"},
        ]);
        Mock::given(method("GET"))
            .and(path(AUTHORIZED_SHOPS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(shops_envelope(shops)))
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path(PRODUCT_SEARCH_PATH))
            .and(query_param("shop_cipher", "cipher-xyz"))
            .and(query_param("page_size", "25"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 0,
                "message": "Success",
                "data": {"total_count": 3, "products": [{}, {}, {}]},
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let connector = create_connector(&mock_server.uri());
        connector.credential_store().install(fresh_credential()).await;
        connector.authorized_shops().await.unwrap();

        let page = connector.search_products(25).await.unwrap();
        assert_eq!(page.total_count, 3);
        assert_eq!(page.products.len(), 3);
    }
}
