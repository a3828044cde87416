//! Authorization code exchange and token refresh for TikTok Shop.
//!
//! This module provides the [`TokenClient`] type for talking to the TikTok
//! Shop authorization host. Both operations are unsigned GET requests with
//! the app credentials in the query string:
//!
//! - [`TokenClient::exchange_code`]: Exchange a one-time authorization code
//!   for an access/refresh token pair
//! - [`TokenClient::refresh`]: Obtain a new token pair using the refresh token
//!
//! # Token Lifecycle
//!
//! 1. The merchant installs the app and the redirect delivers an authorization
//!    code
//! 2. `exchange_code` turns the code into a [`Credential`]
//! 3. The access token expires and `refresh` produces a replacement credential
//! 4. Once the refresh token itself expires, refresh is refused without a
//!    network request and the app must be re-authorized
//!
//! # Example
//!
//! ```rust,ignore
//! use tiktok_shop_api::{TikTokConfig, TokenClient};
//!
//! let client = TokenClient::new(config);
//! let credential = client.exchange_code("ROW_abc123").await?;
//! println!("Access token: {}", credential.access_token);
//! ```

use serde::{Deserialize, Serialize};

use crate::auth::credential::{Credential, TokenPayload};
use crate::auth::error::AuthError;
use crate::config::TikTokConfig;

/// Path for authorization code exchange on the auth host.
const TOKEN_GET_PATH: &str = "/api/v2/token/get";

/// Path for token refresh on the auth host.
const TOKEN_REFRESH_PATH: &str = "/api/v2/token/refresh";

/// Grant type for authorization code exchange.
const AUTHORIZED_CODE_GRANT_TYPE: &str = "authorized_code";

/// Grant type for refresh token requests.
const REFRESH_TOKEN_GRANT_TYPE: &str = "refresh_token";

/// Success marker in token response envelopes.
///
/// The auth host reports success in lowercase, unlike the Open API host
/// which capitalizes it.
const TOKEN_SUCCESS_MESSAGE: &str = "success";

/// Query parameters for authorization code exchange.
#[derive(Debug, Serialize)]
struct ExchangeCodeQuery<'a> {
    app_key: &'a str,
    app_secret: &'a str,
    auth_code: &'a str,
    grant_type: &'a str,
}

/// Query parameters for token refresh.
#[derive(Debug, Serialize)]
struct RefreshTokenQuery<'a> {
    app_key: &'a str,
    app_secret: &'a str,
    refresh_token: &'a str,
    grant_type: &'a str,
}

/// Response envelope returned by both token endpoints.
#[derive(Debug, Deserialize)]
struct TokenEnvelope {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
    data: Option<TokenPayload>,
}

/// Client for the TikTok Shop authorization host.
///
/// The client holds a shared connection pool and the app credentials. It is
/// cheap to clone and safe to share across tasks.
///
/// # Thread Safety
///
/// `TokenClient` is `Send + Sync`.
#[derive(Clone, Debug)]
pub struct TokenClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// SDK configuration providing credentials and the auth host.
    config: TikTokConfig,
}

// Verify TokenClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TokenClient>();
};

impl TokenClient {
    /// Creates a new token client for the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(config: TikTokConfig) -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Exchanges a one-time authorization code for a credential.
    ///
    /// # Arguments
    ///
    /// * `auth_code` - The authorization code delivered by the install redirect
    ///
    /// # Errors
    ///
    /// - [`AuthError::Transport`] if the request never produced a response
    /// - [`AuthError::Parse`] if the response was not a valid token envelope
    /// - [`AuthError::Rejected`] if the vendor declined the code
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let credential = token_client.exchange_code("ROW_abc123").await?;
    /// ```
    pub async fn exchange_code(&self, auth_code: &str) -> Result<Credential, AuthError> {
        // Build the token URL
        let url = format!("{}{}", self.config.auth_host().as_ref(), TOKEN_GET_PATH);

        // Create the query parameters
        let query = ExchangeCodeQuery {
            app_key: self.config.app_key().as_ref(),
            app_secret: self.config.app_secret().as_ref(),
            auth_code,
            grant_type: AUTHORIZED_CODE_GRANT_TYPE,
        };

        let credential = self.request_token(&url, &query).await?;
        tracing::debug!("Exchanged authorization code for credential");
        Ok(credential)
    }

    /// Obtains a new credential using the refresh token of `current`.
    ///
    /// If the refresh token has already expired the request is refused
    /// without any network traffic: the expiry is permanent and only
    /// re-authorization can produce a working credential.
    ///
    /// # Errors
    ///
    /// - [`AuthError::RefreshTokenExpired`] if `current` can no longer be refreshed
    /// - [`AuthError::Transport`] if the request never produced a response
    /// - [`AuthError::Parse`] if the response was not a valid token envelope
    /// - [`AuthError::Rejected`] if the vendor declined the refresh token
    pub async fn refresh(&self, current: &Credential) -> Result<Credential, AuthError> {
        // Refuse expired refresh tokens before any network traffic
        if current.refresh_token_expired() {
            tracing::warn!(
                "Refresh token expired at {}, the app must be re-authorized",
                current.refresh_token_expire_at
            );
            return Err(AuthError::RefreshTokenExpired {
                expired_at: current.refresh_token_expire_at,
            });
        }

        // Build the refresh URL
        let url = format!("{}{}", self.config.auth_host().as_ref(), TOKEN_REFRESH_PATH);

        // Create the query parameters
        let query = RefreshTokenQuery {
            app_key: self.config.app_key().as_ref(),
            app_secret: self.config.app_secret().as_ref(),
            refresh_token: &current.refresh_token,
            grant_type: REFRESH_TOKEN_GRANT_TYPE,
        };

        let credential = self.request_token(&url, &query).await?;
        tracing::debug!("Refreshed access token");
        Ok(credential)
    }

    /// Sends a token request and converts the response into a credential.
    async fn request_token<Q: Serialize>(
        &self,
        url: &str,
        query: &Q,
    ) -> Result<Credential, AuthError> {
        // Send the GET request
        let response = self.client.get(url).query(query).send().await?;

        // Parse the response envelope
        let envelope: TokenEnvelope =
            response.json().await.map_err(|e| AuthError::Parse {
                reason: e.to_string(),
            })?;

        // Validate the vendor's in-band status
        if envelope.message != TOKEN_SUCCESS_MESSAGE {
            tracing::warn!(
                "Token request rejected with code {}: {}",
                envelope.code,
                envelope.message
            );
            return Err(AuthError::Rejected {
                message: envelope.message,
            });
        }

        // Convert the payload into a credential
        let payload = envelope.data.ok_or_else(|| AuthError::Parse {
            reason: "token response is missing the data payload".to_string(),
        })?;
        Credential::try_from(payload)
    }
}
