//! Request types for the TikTok Shop API SDK.
//!
//! This module provides the [`ApiRequest`] type and its builder for
//! constructing authenticated requests to the API host.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Default content type for API requests.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// HTTP methods used by the TikTok Shop API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources and running searches.
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
        }
    }
}

/// An authenticated request to be sent to the TikTok Shop API.
///
/// The client supplies `app_key`, `timestamp`, `sign`, and the access token
/// header on top of what is set here, so a request only describes the
/// operation itself. Query parameters live in a [`BTreeMap`] because the
/// signing algorithm consumes keys in byte-lexicographic order.
///
/// Some API operations are POSTs without a body (the product search is
/// one), so a body is never required.
///
/// # Example
///
/// ```rust
/// use tiktok_shop_api::{ApiRequest, HttpMethod};
/// use serde_json::json;
///
/// // GET request
/// let shops = ApiRequest::builder(HttpMethod::Get, "/authorization/202309/shops").build();
///
/// // POST request with a JSON body
/// let create = ApiRequest::builder(HttpMethod::Post, "/product/202309/products")
///     .body(json!({"title": "New Product"}))
///     .build();
/// ```
#[derive(Clone, Debug)]
pub struct ApiRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The path (relative to the API host) for this request.
    pub path: String,
    /// Query parameters, in the sorted order signing needs.
    pub query: BTreeMap<String, String>,
    /// Content type the request is sent with.
    pub content_type: String,
    /// Additional headers to include in the request.
    pub extra_headers: HashMap<String, String>,
    /// The request body, if any.
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// Creates a new builder for constructing an `ApiRequest`.
    ///
    /// # Arguments
    ///
    /// * `method` - The HTTP method for the request
    /// * `path` - The path (relative to the API host) for the request
    ///
    /// # Example
    ///
    /// ```rust
    /// use tiktok_shop_api::{ApiRequest, HttpMethod};
    ///
    /// let request = ApiRequest::builder(HttpMethod::Post, "/product/202502/products/search")
    ///     .query_param("page_size", "10")
    ///     .build();
    /// ```
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> ApiRequestBuilder {
        ApiRequestBuilder::new(method, path)
    }
}

/// Builder for constructing [`ApiRequest`] instances.
///
/// Provides a fluent API for building requests with optional parameters.
#[derive(Debug)]
pub struct ApiRequestBuilder {
    http_method: HttpMethod,
    path: String,
    query: BTreeMap<String, String>,
    content_type: String,
    extra_headers: HashMap<String, String>,
    body: Option<serde_json::Value>,
}

impl ApiRequestBuilder {
    /// Creates a new builder with the required method and path.
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            query: BTreeMap::new(),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            extra_headers: HashMap::new(),
            body: None,
        }
    }

    /// Adds a single query parameter.
    ///
    /// Caller-supplied parameters take precedence over the authentication
    /// parameters the client adds, except `sign`, which is always computed
    /// fresh.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Sets all query parameters at once, replacing any added so far.
    #[must_use]
    pub fn query(mut self, query: BTreeMap<String, String>) -> Self {
        self.query = query;
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }

    /// Overrides the content type.
    ///
    /// Defaults to [`DEFAULT_CONTENT_TYPE`]. Multipart requests keep their
    /// body out of the signature.
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Builds the [`ApiRequest`].
    #[must_use]
    pub fn build(self) -> ApiRequest {
        ApiRequest {
            http_method: self.http_method,
            path: self.path,
            query: self.query,
            content_type: self.content_type,
            extra_headers: self.extra_headers,
            body: self.body,
        }
    }
}
