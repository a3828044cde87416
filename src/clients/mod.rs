//! HTTP client types for TikTok Shop API communication.
//!
//! This module provides the request pipeline for making signed,
//! authenticated requests to the API host. It handles request signing,
//! authentication parameters, and envelope parsing.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ApiClient`]: The async HTTP client for API communication
//! - [`ApiRequest`]: A request to be sent to the API
//! - [`ApiResponse`]: A parsed response envelope from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST)
//! - [`ApiError`]: Tagged failures an API call can produce
//! - [`signature`]: The request signing algorithm
//!
//! # Example
//!
//! ```rust,ignore
//! use tiktok_shop_api::{ApiClient, ApiRequest, HttpMethod};
//!
//! let client = ApiClient::new(config, store);
//!
//! let request = ApiRequest::builder(HttpMethod::Get, "/authorization/202309/shops")
//!     .build();
//!
//! let response = client.call(request).await?;
//! if response.is_success() {
//!     println!("Data: {:?}", response.data());
//! }
//! ```
//!
//! # Authentication Parameters
//!
//! The client decorates every request on the way out:
//!
//! - `app_key` and `timestamp` query parameters (caller values win on
//!   conflict)
//! - `sign`, computed last over the final parameter set and body
//! - the `x-tts-access-token` header, drawn from the credential store

mod errors;
mod http_client;
mod http_request;
mod http_response;
pub mod signature;

pub use errors::ApiError;
pub use http_client::{ApiClient, ACCESS_TOKEN_HEADER, SDK_VERSION};
pub use http_request::{ApiRequest, ApiRequestBuilder, HttpMethod, DEFAULT_CONTENT_TYPE};
pub use http_response::ApiResponse;

// Re-export signing types at the clients module level
pub use signature::{compute_request_signature, SignableRequest, MULTIPART_CONTENT_TYPE};
