//! # TikTok Shop API Rust SDK
//!
//! A Rust SDK for the TikTok Shop Open API, providing type-safe
//! configuration, credential lifecycle management, and a signed HTTP
//! request pipeline for TikTok Shop app development.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`TikTokConfig`] and [`TikTokConfigBuilder`]
//! - Validated newtypes for app credentials and host URLs
//! - OAuth 2.0 authorization code flow via [`auth::oauth`]
//! - A shared [`CredentialStore`] with automatic, single-flight token refresh
//! - HMAC-SHA256 request signing via [`compute_request_signature`]
//! - Async signed HTTP client via [`ApiClient`]
//! - A high-level [`ShopConnector`] facade for single-shop integrations
//!
//! ## Quick Start
//!
//! ```rust
//! use tiktok_shop_api::{AppKey, AppSecret, ShopConnector, TikTokConfig};
//!
//! // Create configuration using the builder pattern
//! let config = TikTokConfig::builder()
//!     .app_key(AppKey::new("your-app-key").unwrap())
//!     .app_secret(AppSecret::new("your-app-secret").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let connector = ShopConnector::new(config);
//! ```
//!
//! ## Authorization Flow
//!
//! A fresh process holds no credential. The first one arrives through the
//! authorization callback flow; your HTTP listener forwards each redirect's
//! query parameters and the SDK does the rest:
//!
//! ```rust,ignore
//! use tiktok_shop_api::{run_authorization, CallbackQuery, ShopConnector};
//! use tokio::sync::mpsc;
//!
//! let connector = ShopConnector::new(config);
//! let store = connector.credential_store();
//!
//! let (tx, rx) = mpsc::channel(8);
//!
//! // In your callback handler:
//! // tx.send(CallbackQuery::from_query_pairs(query_pairs)).await?;
//!
//! // Consumes callbacks until a code exchange succeeds
//! let credential = run_authorization(&store, rx).await?;
//! println!("Authorized: {}", credential.access_token);
//! ```
//!
//! Credentials serialize with serde, so they can be persisted and restored
//! on the next run with [`CredentialStore::install`], skipping the
//! authorization flow entirely.
//!
//! ## Making API Requests
//!
//! Every call is signed and carries the current access token. Expired
//! access tokens are refreshed automatically; concurrent callers share a
//! single refresh.
//!
//! ```rust,ignore
//! use tiktok_shop_api::{ApiRequest, HttpMethod};
//!
//! // High-level, typed operations
//! let shops = connector.authorized_shops().await?;
//! let page = connector.search_products(100).await?;
//!
//! // Or arbitrary endpoints through the same pipeline
//! let request = ApiRequest::builder(HttpMethod::Get, "/order/202309/orders")
//!     .query_param("ids", "576461413038785752")
//!     .build();
//! let response = connector.call(request).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Tagged errors**: Transport, parse, rejection, and auth failures are
//!   distinct variants, never collapsed sentinels

pub mod auth;
pub mod clients;
pub mod config;
pub mod connector;
pub mod error;
pub mod resources;

// Re-export public types at crate root for convenience
pub use config::{AppKey, AppSecret, HostUrl, TikTokConfig, TikTokConfigBuilder};
pub use error::ConfigError;

// Re-export authentication types
pub use auth::{AuthError, Credential, CredentialStore, TokenPayload};

// Re-export OAuth flow types
pub use auth::oauth::{
    handle_authorization_callback, run_authorization, CallbackQuery, TokenClient,
};

// Re-export HTTP client and signing types
pub use clients::{
    compute_request_signature, ApiClient, ApiError, ApiRequest, ApiRequestBuilder, ApiResponse,
    HttpMethod, SignableRequest,
};

// Re-export the high-level connector and resource types
pub use connector::ShopConnector;
pub use resources::{ProductPage, Shop, ShopList};
