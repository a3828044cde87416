//! In-memory credential store with automatic refresh.
//!
//! This module provides the [`CredentialStore`] type, which holds the single
//! credential shared by all API traffic in the process and keeps it valid:
//!
//! - Callers that arrive before the first authorization suspend until a
//!   credential is installed, without polling and without issuing any
//!   network traffic of their own
//! - An expired access token is refreshed at most once at a time; concurrent
//!   callers collapse onto the same refresh and all observe its outcome
//! - A failed refresh leaves the stored credential untouched, so the next
//!   caller can retry
//! - An expired refresh token is permanent: the store surfaces
//!   [`AuthError::RefreshTokenExpired`] without attempting any request
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tiktok_shop_api::{CredentialStore, TokenClient};
//!
//! let store = Arc::new(CredentialStore::new(TokenClient::new(config)));
//!
//! // Bootstrap side: install the first credential
//! store.authorize("ROW_abc123").await?;
//!
//! // Request side: always yields a token that was valid when read
//! let token = store.valid_access_token().await?;
//! ```

use tokio::sync::{Mutex, Notify, RwLock};

use crate::auth::credential::Credential;
use crate::auth::error::AuthError;
use crate::auth::oauth::token_client::TokenClient;

/// Holds the process-wide credential and refreshes it on expiry.
///
/// The store starts empty. [`CredentialStore::authorize`] (or
/// [`CredentialStore::install`]) fills it with the first credential;
/// afterwards [`CredentialStore::valid_access_token`] replaces the credential
/// wholesale whenever the access token has expired.
///
/// # Concurrency
///
/// The credential slot sits behind an async `RwLock`, so reads are torn-free
/// snapshots. Refreshes serialize on a separate flight lock that is held
/// across the network call; whichever caller wins the lock performs the
/// refresh and the rest re-read the slot after it settles.
#[derive(Debug)]
pub struct CredentialStore {
    /// Client used for code exchange and refresh requests.
    token_client: TokenClient,
    /// The current credential, absent until first authorization.
    current: RwLock<Option<Credential>>,
    /// Signals waiters when a credential is installed.
    installed: Notify,
    /// Serializes refresh attempts; held across the refresh request.
    refresh_flight: Mutex<()>,
}

// Verify CredentialStore is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CredentialStore>();
};

impl CredentialStore {
    /// Creates an empty store backed by the given token client.
    #[must_use]
    pub fn new(token_client: TokenClient) -> Self {
        Self {
            token_client,
            current: RwLock::new(None),
            installed: Notify::new(),
            refresh_flight: Mutex::new(()),
        }
    }

    /// Returns a snapshot of the current credential, if any.
    pub async fn current(&self) -> Option<Credential> {
        self.current.read().await.clone()
    }

    /// Replaces the stored credential wholesale and wakes all waiters.
    pub async fn install(&self, credential: Credential) {
        {
            let mut slot = self.current.write().await;
            *slot = Some(credential);
        }
        tracing::info!("Credential installed");
        self.installed.notify_waiters();
    }

    /// Exchanges an authorization code and installs the resulting credential.
    ///
    /// This is the bootstrap entry point: the first successful call unblocks
    /// every task suspended in [`Self::wait_for_initial`] or
    /// [`Self::valid_access_token`].
    ///
    /// # Errors
    ///
    /// Propagates the exchange failure; the store is left unchanged.
    pub async fn authorize(&self, auth_code: &str) -> Result<Credential, AuthError> {
        let credential = self.token_client.exchange_code(auth_code).await?;
        self.install(credential.clone()).await;
        Ok(credential)
    }

    /// Suspends until a credential has been installed, then returns it.
    ///
    /// All waiters observe the same installed credential and none of them
    /// issues network traffic. The wait is unbounded; callers that need a
    /// deadline should wrap this in [`tokio::time::timeout`].
    pub async fn wait_for_initial(&self) -> Credential {
        loop {
            // Register for the wakeup before checking the slot, so an
            // install between the check and the await cannot be missed.
            let installed = self.installed.notified();
            if let Some(credential) = self.current().await {
                return credential;
            }
            installed.await;
        }
    }

    /// Returns an access token that was valid at the time it was read.
    ///
    /// Waits for the initial credential if the store is still empty, and
    /// refreshes through the flight lock when the access token has expired.
    ///
    /// # Errors
    ///
    /// - [`AuthError::RefreshTokenExpired`] if the credential can no longer
    ///   be refreshed; the store still holds the stale credential and no
    ///   request is sent
    /// - Any refresh failure from [`TokenClient::refresh`]; the previous
    ///   credential stays in place
    pub async fn valid_access_token(&self) -> Result<String, AuthError> {
        let current = match self.current().await {
            Some(credential) => credential,
            None => self.wait_for_initial().await,
        };

        if !current.access_token_expired() {
            return Ok(current.access_token);
        }

        self.refresh_expired().await
    }

    /// Refreshes the credential, collapsing concurrent callers into one request.
    async fn refresh_expired(&self) -> Result<String, AuthError> {
        let _flight = self.refresh_flight.lock().await;

        // Re-check under the flight lock: a concurrent caller may have
        // already replaced the credential while we waited.
        let current = match self.current().await {
            Some(credential) => credential,
            None => self.wait_for_initial().await,
        };
        if !current.access_token_expired() {
            return Ok(current.access_token);
        }

        let refreshed = self.token_client.refresh(&current).await?;
        let access_token = refreshed.access_token.clone();
        self.install(refreshed).await;
        Ok(access_token)
    }
}
