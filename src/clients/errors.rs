//! Error types for authenticated TikTok Shop API calls.
//!
//! # Error Handling
//!
//! Every failure an API call can produce is tagged with its origin, so
//! callers can tell a vendor rejection apart from a network fault or an
//! authentication problem without string matching:
//!
//! - [`ApiError::Transport`]: The request never produced a usable response
//! - [`ApiError::Parse`]: The response was not the JSON shape the vendor
//!   documents
//! - [`ApiError::Rejected`]: The vendor answered but declined the request
//! - [`ApiError::Auth`]: Token acquisition or refresh failed before the
//!   request was sent
//! - [`ApiError::NoAuthorizedShop`]: A shop-scoped call was made before any
//!   shop was activated
//!
//! # Example
//!
//! ```rust,ignore
//! use tiktok_shop_api::ApiError;
//!
//! match connector.search_products(10).await {
//!     Ok(page) => println!("Found {} products", page.total_count),
//!     Err(ApiError::Rejected { code, message, .. }) => {
//!         println!("Vendor declined the request ({code}): {message}");
//!     }
//!     Err(ApiError::Auth(e)) => {
//!         println!("Could not obtain a valid token: {e}");
//!     }
//!     Err(e) => println!("Request failed: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::auth::AuthError;

/// Unified error type for authenticated API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or connection error. The request may never have reached the
    /// API host.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body could not be interpreted as the documented
    /// envelope shape.
    #[error("Failed to parse API response: {reason}")]
    Parse {
        /// Description of what failed to parse.
        reason: String,
    },

    /// The vendor received the request and declined it.
    ///
    /// `code` and `message` come from the response envelope; `request_id`
    /// is the vendor's correlation id for support tickets, when present.
    #[error("API request rejected with code {code}: {message}")]
    Rejected {
        /// Vendor error code from the response envelope.
        code: i64,
        /// Vendor error message from the response envelope.
        message: String,
        /// Vendor correlation id, if the response carried one.
        request_id: Option<String>,
    },

    /// Token acquisition or refresh failed, so the request was never sent.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A shop-scoped operation was attempted before a shop was activated.
    #[error("No authorized shop is active. Fetch the authorized shops before making shop-scoped calls.")]
    NoAuthorizedShop,
}

// ApiError values cross task boundaries inside async callers.
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiError>();
};
