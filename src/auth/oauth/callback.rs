//! Authorization callback handling for TikTok Shop app installs.
//!
//! When a merchant installs the app, TikTok redirects their browser to the
//! app's registered callback URL with a one-time `code` query parameter.
//! This module consumes that boundary: the HTTP listener itself stays
//! outside the SDK, and hands each redirect's query over as a
//! [`CallbackQuery`] value.
//!
//! A redirect without a code is a normal outcome (the merchant declined or
//! the vendor pinged the endpoint), not an error. The coordinator keeps
//! consuming callbacks until one of them yields an installed credential.
//!
//! # Example
//!
//! ```rust,ignore
//! use tiktok_shop_api::{run_authorization, CallbackQuery};
//! use tokio::sync::mpsc;
//!
//! let (tx, rx) = mpsc::channel(8);
//!
//! // The HTTP listener forwards each redirect's query:
//! // tx.send(CallbackQuery::from_query_pairs(query_pairs)).await?;
//!
//! let credential = run_authorization(&store, rx).await?;
//! println!("Authorized: {}", credential.access_token);
//! ```

use serde::Deserialize;
use tokio::sync::mpsc;

use crate::auth::credential::Credential;
use crate::auth::error::AuthError;
use crate::auth::store::CredentialStore;

/// Query parameters delivered by an authorization redirect.
///
/// Only the `code` parameter matters to the SDK; everything else the vendor
/// appends is ignored. The type derives `Deserialize` so web frameworks can
/// extract it directly from the request query.
///
/// # Example
///
/// ```rust
/// use tiktok_shop_api::CallbackQuery;
///
/// let query = CallbackQuery::from_query_pairs([("code", "ROW_abc123")]);
/// assert_eq!(query.code(), Some("ROW_abc123"));
///
/// let declined = CallbackQuery::from_query_pairs([("locale", "en")]);
/// assert_eq!(declined.code(), None);
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct CallbackQuery {
    code: Option<String>,
}

impl CallbackQuery {
    /// Creates a callback query with the given authorization code.
    #[must_use]
    pub const fn new(code: Option<String>) -> Self {
        Self { code }
    }

    /// Extracts the callback query from raw query pairs.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let code = pairs
            .into_iter()
            .find(|(key, _)| key.as_ref() == "code")
            .map(|(_, value)| value.into());
        Self { code }
    }

    /// Returns the authorization code, if one was delivered.
    ///
    /// An empty `code` parameter counts as absent.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref().filter(|code| !code.is_empty())
    }
}

/// Handles a single authorization redirect.
///
/// Returns `Ok(None)` when the redirect carried no code: that outcome is a
/// declined or spurious callback, and the caller should keep listening.
/// With a code present, the code is exchanged and the resulting credential
/// installed into `store` before being returned.
///
/// # Errors
///
/// Propagates exchange failures ([`AuthError::Transport`] /
/// [`AuthError::Parse`] / [`AuthError::Rejected`]). The store is left
/// unchanged on failure.
pub async fn handle_authorization_callback(
    store: &CredentialStore,
    query: &CallbackQuery,
) -> Result<Option<Credential>, AuthError> {
    let Some(code) = query.code() else {
        tracing::warn!("No authorization code received in callback");
        return Ok(None);
    };

    tracing::info!("Received authorization code from callback");
    let credential = store.authorize(code).await?;
    Ok(Some(credential))
}

/// Consumes callbacks until one produces an installed credential.
///
/// Codeless callbacks are skipped and failed exchanges are logged and
/// skipped, mirroring an install listener that keeps serving after a bad
/// redirect. The loop only gives up when the channel closes, at which point
/// no code can ever arrive.
///
/// # Errors
///
/// Returns [`AuthError::NoAuthorizationCode`] if `callbacks` closes before
/// any exchange succeeds.
pub async fn run_authorization(
    store: &CredentialStore,
    mut callbacks: mpsc::Receiver<CallbackQuery>,
) -> Result<Credential, AuthError> {
    while let Some(query) = callbacks.recv().await {
        match handle_authorization_callback(store, &query).await {
            Ok(Some(credential)) => return Ok(credential),
            Ok(None) => {}
            Err(error) => {
                tracing::warn!("Authorization code exchange failed: {error}");
            }
        }
    }

    Err(AuthError::NoAuthorizationCode)
}
