//! Authentication types for the TikTok Shop API SDK.
//!
//! This module provides the credential model and the machinery that keeps
//! it valid across the lifetime of a process.
//!
//! # Overview
//!
//! - [`Credential`]: An access/refresh token pair with absolute expiries
//! - [`CredentialStore`]: Shared slot holding the current credential, with
//!   automatic single-flight refresh
//! - [`AuthError`]: Failures raised by token acquisition and refresh
//! - [`oauth`]: Authorization code exchange, token refresh, and callback
//!   handling
//!
//! # Credential Lifecycle
//!
//! A process starts with an empty store. The first credential arrives
//! either from the authorization callback flow (a merchant installing the
//! app) or from persisted state the application restores via
//! [`CredentialStore::install`]. From then on, callers ask the store for a
//! valid access token and the store refreshes behind the scenes when the
//! token has expired.
//!
//! ```rust,ignore
//! use tiktok_shop_api::{CredentialStore, TokenClient};
//!
//! let store = CredentialStore::new(TokenClient::new(config));
//!
//! // Restore a credential persisted from a previous run
//! store.install(saved_credential).await;
//!
//! // Always returns an unexpired token, refreshing if needed
//! let token = store.valid_access_token().await?;
//! ```

pub mod credential;
pub mod error;
pub mod oauth;
pub mod store;

pub use credential::{Credential, TokenPayload};
pub use error::AuthError;
pub use store::CredentialStore;
