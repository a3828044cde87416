//! Credential types for TikTok Shop API authentication.
//!
//! This module provides the [`Credential`] type holding an access/refresh
//! token pair, and the [`TokenPayload`] wire type it is built from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::error::AuthError;

/// An access/refresh token pair with absolute expiry times.
///
/// A credential is obtained by exchanging an authorization code and replaced
/// wholesale on every refresh; it is never partially updated. The vendor
/// reports expiry as absolute Unix timestamps, which are mapped to
/// [`DateTime<Utc>`] on construction.
///
/// # Thread Safety
///
/// `Credential` is `Send + Sync`, making it safe to share across threads.
///
/// # Example
///
/// ```rust
/// use tiktok_shop_api::Credential;
/// use chrono::{Duration, Utc};
///
/// let credential = Credential::new(
///     "access-token".to_string(),
///     Utc::now() + Duration::hours(2),
///     "refresh-token".to_string(),
///     Utc::now() + Duration::days(30),
/// );
///
/// assert!(!credential.access_token_expired());
/// assert!(!credential.refresh_token_expired());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// The access token attached to signed API requests.
    pub access_token: String,

    /// When the access token expires.
    pub access_token_expire_at: DateTime<Utc>,

    /// The refresh token used to obtain a new access token.
    pub refresh_token: String,

    /// When the refresh token expires. Past this point the app must be
    /// re-authorized.
    pub refresh_token_expire_at: DateTime<Utc>,
}

impl Credential {
    /// Creates a new credential with the specified tokens and expiries.
    #[must_use]
    pub const fn new(
        access_token: String,
        access_token_expire_at: DateTime<Utc>,
        refresh_token: String,
        refresh_token_expire_at: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token,
            access_token_expire_at,
            refresh_token,
            refresh_token_expire_at,
        }
    }

    /// Returns `true` if the access token has expired.
    #[must_use]
    pub fn access_token_expired(&self) -> bool {
        Utc::now() > self.access_token_expire_at
    }

    /// Returns `true` if the refresh token has expired.
    ///
    /// When this returns `true` the credential can no longer be refreshed.
    #[must_use]
    pub fn refresh_token_expired(&self) -> bool {
        Utc::now() > self.refresh_token_expire_at
    }
}

// Verify Credential is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Credential>();
};

/// The `data` payload of a token response from the authorization host.
///
/// The `*_expire_in` fields carry absolute Unix timestamps in seconds,
/// despite what their names suggest.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TokenPayload {
    /// The granted access token.
    #[serde(default)]
    pub access_token: String,

    /// Absolute expiry of the access token, in Unix seconds.
    #[serde(default)]
    pub access_token_expire_in: i64,

    /// The granted refresh token.
    #[serde(default)]
    pub refresh_token: String,

    /// Absolute expiry of the refresh token, in Unix seconds.
    #[serde(default)]
    pub refresh_token_expire_in: i64,
}

impl TryFrom<TokenPayload> for Credential {
    type Error = AuthError;

    /// Converts a wire payload into a credential, rejecting partial data.
    ///
    /// A payload with an empty token string or an out-of-range timestamp
    /// never becomes a credential; incomplete grants are treated as parse
    /// failures rather than stored.
    fn try_from(payload: TokenPayload) -> Result<Self, Self::Error> {
        if payload.access_token.is_empty() {
            return Err(AuthError::Parse {
                reason: "token payload has an empty access_token".to_string(),
            });
        }
        if payload.refresh_token.is_empty() {
            return Err(AuthError::Parse {
                reason: "token payload has an empty refresh_token".to_string(),
            });
        }

        let access_token_expire_at = DateTime::from_timestamp(payload.access_token_expire_in, 0)
            .ok_or_else(|| AuthError::Parse {
                reason: format!(
                    "access_token_expire_in {} is not a valid Unix timestamp",
                    payload.access_token_expire_in
                ),
            })?;
        let refresh_token_expire_at = DateTime::from_timestamp(payload.refresh_token_expire_in, 0)
            .ok_or_else(|| AuthError::Parse {
                reason: format!(
                    "refresh_token_expire_in {} is not a valid Unix timestamp",
                    payload.refresh_token_expire_in
                ),
            })?;

        Ok(Self {
            access_token: payload.access_token,
            access_token_expire_at,
            refresh_token: payload.refresh_token,
            refresh_token_expire_at,
        })
    }
}
