//! Error types for the TikTok Shop API SDK.
//!
//! This module contains error types used throughout the SDK for configuration
//! and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use tiktok_shop_api::{AppKey, ConfigError};
//!
//! let result = AppKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAppKey)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration types. Each variant provides a clear,
/// actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// App key cannot be empty.
    #[error("App key cannot be empty. Please provide a valid TikTok Shop app key.")]
    EmptyAppKey,

    /// App secret cannot be empty.
    #[error("App secret cannot be empty. Please provide a valid TikTok Shop app secret.")]
    EmptyAppSecret,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://open-api.tiktokglobalshop.com').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },
}
