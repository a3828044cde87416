//! OAuth 2.0 implementation for TikTok Shop apps.
//!
//! TikTok Shop uses the authorization code grant. A merchant installs the
//! app from the TikTok Shop marketplace, the vendor redirects their browser
//! to the app's callback URL with a one-time `code`, and the app exchanges
//! that code for an access token and a refresh token.
//!
//! This module covers both halves of the flow:
//!
//! - **Code Exchange and Refresh** ([`TokenClient`]): talks to the vendor's
//!   auth host to exchange authorization codes and refresh access tokens.
//! - **Callback Handling** ([`handle_authorization_callback`],
//!   [`run_authorization`]): consumes authorization redirects until the
//!   first credential is installed.
//!
//! # Token Lifetimes
//!
//! Both tokens expire. The vendor reports expiry as absolute Unix
//! timestamps, which the SDK converts to [`chrono::DateTime`] values on
//! arrival. Access tokens are refreshed automatically by
//! [`CredentialStore`](crate::auth::CredentialStore); an expired refresh
//! token cannot be recovered and requires the merchant to re-authorize.
//!
//! # Example: Authorization Code Flow
//!
//! ```rust,ignore
//! use tiktok_shop_api::{CallbackQuery, CredentialStore, TokenClient, TikTokConfig};
//! use tiktok_shop_api::auth::oauth::run_authorization;
//! use tokio::sync::mpsc;
//!
//! let config = TikTokConfig::builder()
//!     .app_key(AppKey::new("your-app-key").unwrap())
//!     .app_secret(AppSecret::new("your-app-secret").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let store = CredentialStore::new(TokenClient::new(config));
//! let (tx, rx) = mpsc::channel(8);
//!
//! // Your HTTP listener forwards each redirect's query parameters:
//! // tx.send(CallbackQuery::from_query_pairs(pairs)).await?;
//!
//! let credential = run_authorization(&store, rx).await?;
//! println!("First authorization complete: {}", credential.access_token);
//! ```

pub mod callback;
pub mod token_client;

pub use callback::{handle_authorization_callback, run_authorization, CallbackQuery};
pub use token_client::TokenClient;
