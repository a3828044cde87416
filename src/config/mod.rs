//! Configuration types for the TikTok Shop API SDK.
//!
//! This module provides the core configuration types used to initialize
//! and configure the SDK for API communication with TikTok Shop.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`TikTokConfig`]: The main configuration struct holding all SDK settings
//! - [`TikTokConfigBuilder`]: A builder for constructing [`TikTokConfig`] instances
//! - [`AppKey`]: A validated app key newtype
//! - [`AppSecret`]: A validated app secret newtype with masked debug output
//! - [`HostUrl`]: A validated vendor host URL
//!
//! # Example
//!
//! ```rust
//! use tiktok_shop_api::{TikTokConfig, AppKey, AppSecret};
//!
//! let config = TikTokConfig::builder()
//!     .app_key(AppKey::new("my-app-key").unwrap())
//!     .app_secret(AppSecret::new("my-secret").unwrap())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::{AppKey, AppSecret, HostUrl};

use crate::error::ConfigError;

/// Default host for the TikTok Shop authorization service.
pub const DEFAULT_AUTH_HOST: &str = "https://auth.tiktok-shops.com";

/// Default host for the TikTok Shop Open API.
pub const DEFAULT_API_HOST: &str = "https://open-api.tiktokglobalshop.com";

/// Configuration for the TikTok Shop API SDK.
///
/// This struct holds all configuration needed for SDK operations, including
/// app credentials and the vendor hosts for token and API traffic.
///
/// # Thread Safety
///
/// `TikTokConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use tiktok_shop_api::{TikTokConfig, AppKey, AppSecret};
///
/// let config = TikTokConfig::builder()
///     .app_key(AppKey::new("your-app-key").unwrap())
///     .app_secret(AppSecret::new("your-secret").unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(config.api_host().as_ref(), "https://open-api.tiktokglobalshop.com");
/// ```
#[derive(Clone, Debug)]
pub struct TikTokConfig {
    app_key: AppKey,
    app_secret: AppSecret,
    auth_host: HostUrl,
    api_host: HostUrl,
}

impl TikTokConfig {
    /// Creates a new builder for constructing a `TikTokConfig`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tiktok_shop_api::{TikTokConfig, AppKey, AppSecret};
    ///
    /// let config = TikTokConfig::builder()
    ///     .app_key(AppKey::new("key").unwrap())
    ///     .app_secret(AppSecret::new("secret").unwrap())
    ///     .build()
    ///     .unwrap();
    /// ```
    #[must_use]
    pub fn builder() -> TikTokConfigBuilder {
        TikTokConfigBuilder::new()
    }

    /// Returns the app key.
    #[must_use]
    pub const fn app_key(&self) -> &AppKey {
        &self.app_key
    }

    /// Returns the app secret.
    #[must_use]
    pub const fn app_secret(&self) -> &AppSecret {
        &self.app_secret
    }

    /// Returns the host used for authorization code exchange and token refresh.
    #[must_use]
    pub const fn auth_host(&self) -> &HostUrl {
        &self.auth_host
    }

    /// Returns the host used for signed API requests.
    #[must_use]
    pub const fn api_host(&self) -> &HostUrl {
        &self.api_host
    }
}

// Verify TikTokConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TikTokConfig>();
};

/// Builder for constructing [`TikTokConfig`] instances.
///
/// This builder provides a fluent API for configuring the SDK. Required fields
/// are `app_key` and `app_secret`. All other fields have sensible defaults.
///
/// # Defaults
///
/// - `auth_host`: [`DEFAULT_AUTH_HOST`]
/// - `api_host`: [`DEFAULT_API_HOST`]
///
/// # Example
///
/// ```rust
/// use tiktok_shop_api::{TikTokConfig, AppKey, AppSecret, HostUrl};
///
/// let config = TikTokConfig::builder()
///     .app_key(AppKey::new("key").unwrap())
///     .app_secret(AppSecret::new("secret").unwrap())
///     .api_host(HostUrl::new("http://localhost:3000").unwrap())
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct TikTokConfigBuilder {
    app_key: Option<AppKey>,
    app_secret: Option<AppSecret>,
    auth_host: Option<HostUrl>,
    api_host: Option<HostUrl>,
}

impl TikTokConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the app key (required).
    #[must_use]
    pub fn app_key(mut self, key: AppKey) -> Self {
        self.app_key = Some(key);
        self
    }

    /// Sets the app secret (required).
    #[must_use]
    pub fn app_secret(mut self, secret: AppSecret) -> Self {
        self.app_secret = Some(secret);
        self
    }

    /// Sets the authorization host.
    ///
    /// Defaults to [`DEFAULT_AUTH_HOST`]. Override this to point token
    /// exchange and refresh requests at a test server.
    #[must_use]
    pub fn auth_host(mut self, host: HostUrl) -> Self {
        self.auth_host = Some(host);
        self
    }

    /// Sets the API host.
    ///
    /// Defaults to [`DEFAULT_API_HOST`]. Override this to point signed API
    /// requests at a test server.
    #[must_use]
    pub fn api_host(mut self, host: HostUrl) -> Self {
        self.api_host = Some(host);
        self
    }

    /// Builds the [`TikTokConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `app_key` or
    /// `app_secret` are not set.
    pub fn build(self) -> Result<TikTokConfig, ConfigError> {
        let app_key = self
            .app_key
            .ok_or(ConfigError::MissingRequiredField { field: "app_key" })?;
        let app_secret = self.app_secret.ok_or(ConfigError::MissingRequiredField {
            field: "app_secret",
        })?;
        let auth_host = match self.auth_host {
            Some(host) => host,
            None => HostUrl::new(DEFAULT_AUTH_HOST)?,
        };
        let api_host = match self.api_host {
            Some(host) => host,
            None => HostUrl::new(DEFAULT_API_HOST)?,
        };

        Ok(TikTokConfig {
            app_key,
            app_secret,
            auth_host,
            api_host,
        })
    }
}
