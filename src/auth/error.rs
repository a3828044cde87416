//! Authentication error types for the TikTok Shop API SDK.
//!
//! This module contains error types for credential lifecycle operations:
//! authorization code exchange, token refresh, and callback handling.
//!
//! # Error Types
//!
//! - [`AuthError::Transport`]: The token request never produced a response
//! - [`AuthError::Parse`]: The token response could not be decoded
//! - [`AuthError::Rejected`]: The vendor returned a well-formed failure envelope
//! - [`AuthError::RefreshTokenExpired`]: The refresh token itself has expired
//! - [`AuthError::NoAuthorizationCode`]: The callback stream ended without a code
//!
//! # Example
//!
//! ```rust
//! use tiktok_shop_api::AuthError;
//!
//! let error = AuthError::Rejected {
//!     message: "auth_code expired".to_string(),
//! };
//! assert!(error.to_string().contains("auth_code expired"));
//! ```

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur during credential lifecycle operations.
///
/// This enum covers all failure modes in the authorization code flow and
/// token refresh, from network failures to permanent credential expiry.
///
/// # Thread Safety
///
/// `AuthError` is `Send + Sync`, making it safe to use across async boundaries.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Network or connection error during a token request.
    ///
    /// The request never produced a response from the authorization host.
    #[error("Network error during token request: {0}")]
    Transport(#[from] reqwest::Error),

    /// The token response could not be decoded.
    ///
    /// A response arrived but was not the expected envelope, or the payload
    /// was missing fields required to form a complete credential.
    #[error("Failed to parse token response: {reason}")]
    Parse {
        /// Description of what could not be decoded.
        reason: String,
    },

    /// The authorization host returned a well-formed failure envelope.
    ///
    /// Typical causes are an expired or already-used authorization code and
    /// an invalid refresh token.
    #[error("Token request rejected: {message}")]
    Rejected {
        /// The failure message from the response envelope.
        message: String,
    },

    /// The refresh token has expired.
    ///
    /// This state is permanent: no refresh request can succeed, so none is
    /// attempted. The app must be re-authorized to obtain a new credential.
    #[error("Refresh token expired at {expired_at}; the app must be re-authorized")]
    RefreshTokenExpired {
        /// When the refresh token expired.
        expired_at: DateTime<Utc>,
    },

    /// The callback stream closed before an authorization code arrived.
    ///
    /// Individual callbacks without a code are not errors; this variant only
    /// occurs when no further callbacks can arrive.
    #[error("Authorization callback stream closed before an authorization code was received")]
    NoAuthorizationCode,
}

// Verify AuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthError>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_includes_vendor_message() {
        let error = AuthError::Rejected {
            message: "auth_code expired".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("rejected"));
        assert!(message.contains("auth_code expired"));
    }

    #[test]
    fn test_parse_includes_reason() {
        let error = AuthError::Parse {
            reason: "missing field `access_token`".to_string(),
        };
        assert!(error.to_string().contains("missing field `access_token`"));
    }

    #[test]
    fn test_refresh_token_expired_includes_timestamp() {
        let expired_at = Utc::now();
        let error = AuthError::RefreshTokenExpired { expired_at };
        let message = error.to_string();
        assert!(message.contains("re-authorized"));
        assert!(message.contains(&expired_at.format("%Y").to_string()));
    }

    #[test]
    fn test_no_authorization_code_message() {
        let error = AuthError::NoAuthorizationCode;
        assert!(error.to_string().contains("callback stream closed"));
    }

    #[test]
    fn test_auth_error_implements_std_error() {
        let error: &dyn std::error::Error = &AuthError::NoAuthorizationCode;
        let _ = error;

        let error: &dyn std::error::Error = &AuthError::Parse {
            reason: "test".to_string(),
        };
        let _ = error;
    }

    #[test]
    fn test_auth_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AuthError>();
    }
}
