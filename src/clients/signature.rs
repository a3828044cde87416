//! Request signing for TikTok Shop API calls.
//!
//! Every authenticated call to the API host carries a `sign` query
//! parameter: an HMAC-SHA256 signature computed over the request path,
//! query parameters, and body, keyed by the app secret. The vendor
//! recomputes the signature server-side and rejects requests that do not
//! match.
//!
//! The signing string is assembled as follows:
//!
//! 1. Take every query parameter except `access_token` and `sign`.
//! 2. Sort the remaining keys byte-lexicographically and concatenate each
//!    key directly followed by its value.
//! 3. Prepend the request path (path only, never scheme, host, or query).
//! 4. Append the request body, unless the content type is
//!    `multipart/form-data` or the body is empty.
//! 5. Wrap the whole string in the app secret on both sides.
//!
//! The HMAC key is the app secret as well, and the output is lowercase hex.
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use tiktok_shop_api::{compute_request_signature, SignableRequest};
//!
//! let mut query = BTreeMap::new();
//! query.insert("app_key".to_string(), "abc123".to_string());
//! query.insert("timestamp".to_string(), "1700000000".to_string());
//!
//! let request = SignableRequest {
//!     path: "/authorization/202309/shops",
//!     query: &query,
//!     content_type: "application/json",
//!     body: None,
//! };
//!
//! let sign = compute_request_signature(&request, "app-secret");
//! assert_eq!(sign.len(), 64); // SHA256 produces 32 bytes = 64 hex chars
//! ```

use std::collections::BTreeMap;

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Content type that excludes the body from the signing string.
pub const MULTIPART_CONTENT_TYPE: &str = "multipart/form-data";

/// Query parameters that never participate in signing.
const EXCLUDED_PARAMS: [&str; 2] = ["access_token", "sign"];

/// The parts of an outgoing request that participate in signing.
///
/// The query map is a [`BTreeMap`] so iteration yields keys in the
/// byte-lexicographic order the algorithm requires. `path` may be a bare
/// path or a full URL; anything outside the path segment is ignored.
#[derive(Clone, Copy, Debug)]
pub struct SignableRequest<'a> {
    /// Request path, with or without scheme and host.
    pub path: &'a str,
    /// Full query parameter set, including `access_token` and `sign` if
    /// already present. Excluded parameters are skipped during signing.
    pub query: &'a BTreeMap<String, String>,
    /// Content type the request will be sent with.
    pub content_type: &'a str,
    /// Serialized request body, exactly as it will go on the wire.
    pub body: Option<&'a str>,
}

/// Computes the `sign` parameter for an API request.
///
/// The signature is returned as a lowercase hexadecimal string, matching
/// the format the vendor expects in the `sign` query parameter.
///
/// # Arguments
///
/// * `request` - The request parts that participate in signing
/// * `secret` - The app secret, used both in the signing string and as the
///   HMAC key
///
/// # Example
///
/// ```rust
/// use std::collections::BTreeMap;
/// use tiktok_shop_api::{compute_request_signature, SignableRequest};
///
/// let query = BTreeMap::new();
/// let request = SignableRequest {
///     path: "/product/202502/products/search",
///     query: &query,
///     content_type: "application/json",
///     body: None,
/// };
///
/// let sign = compute_request_signature(&request, "secret-key");
/// assert!(sign.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn compute_request_signature(request: &SignableRequest<'_>, secret: &str) -> String {
    // Step 1: Start from the path, then concatenate each signable query
    // key directly followed by its value, in sorted key order
    let mut input = String::from(pathname(request.path));
    for (key, value) in request.query {
        if EXCLUDED_PARAMS.contains(&key.as_str()) {
            continue;
        }
        input.push_str(key);
        input.push_str(value);
    }

    // Step 2: Append the body unless this is a multipart upload
    if request.content_type != MULTIPART_CONTENT_TYPE {
        if let Some(body) = request.body {
            if !body.is_empty() {
                input.push_str(body);
            }
        }
    }

    // Step 3: Wrap in the secret on both sides and sign with the same secret
    let message = format!("{secret}{input}{secret}");
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Extracts the path segment from a bare path or a full URL.
fn pathname(path_or_url: &str) -> &str {
    let after_host = if let Some(scheme_end) = path_or_url.find("://") {
        let rest = &path_or_url[scheme_end + 3..];
        match rest.find('/') {
            Some(path_start) => &rest[path_start..],
            None => "/",
        }
    } else {
        path_or_url
    };

    // Drop the query string and fragment
    let end = after_host
        .find(|c| c == '?' || c == '#')
        .unwrap_or(after_host.len());
    &after_host[..end]
}

// Internal hex encoding since we don't want to add another dependency
mod hex {
    const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        let bytes = bytes.as_ref();
        let mut result = String::with_capacity(bytes.len() * 2);
        for &byte in bytes {
            result.push(HEX_CHARS[(byte >> 4) as usize] as char);
            result.push(HEX_CHARS[(byte & 0x0f) as usize] as char);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_from(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect()
    }

    fn hmac_hex(secret: &str, message: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(message.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn test_signature_is_lowercase_hex() {
        let query = query_from(&[("app_key", "abc"), ("timestamp", "1700000000")]);
        let request = SignableRequest {
            path: "/api/orders",
            query: &query,
            content_type: "application/json",
            body: None,
        };

        let sign = compute_request_signature(&request, "secret");

        // Should be 64 characters (32 bytes * 2 hex chars), all lowercase
        assert_eq!(sign.len(), 64);
        assert!(sign.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(sign.chars().all(|c| !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_signature_matches_independently_computed_value() {
        let query = query_from(&[
            ("app_key", "ak"),
            ("timestamp", "100"),
            ("b", "2"),
            ("a", "1"),
        ]);
        let request = SignableRequest {
            path: "https://host/v1/things?x=1",
            query: &query,
            content_type: "application/json",
            body: None,
        };

        // Sorted keys a, app_key, b, timestamp; path only; wrapped in secret
        let expected = hmac_hex("s3cr3t", "s3cr3t/v1/thingsa1app_keyakb2timestamp100s3cr3t");

        assert_eq!(compute_request_signature(&request, "s3cr3t"), expected);
    }

    #[test]
    fn test_access_token_and_sign_are_excluded() {
        let base = query_from(&[("app_key", "abc"), ("timestamp", "100")]);
        let mut with_excluded = base.clone();
        with_excluded.insert("access_token".to_string(), "tok-123".to_string());
        with_excluded.insert("sign".to_string(), "stale-signature".to_string());

        let without = SignableRequest {
            path: "/api/orders",
            query: &base,
            content_type: "application/json",
            body: None,
        };
        let with = SignableRequest {
            path: "/api/orders",
            query: &with_excluded,
            content_type: "application/json",
            body: None,
        };

        assert_eq!(
            compute_request_signature(&without, "secret"),
            compute_request_signature(&with, "secret")
        );
    }

    #[test]
    fn test_key_order_comes_from_the_map_not_insertion() {
        let mut forward = BTreeMap::new();
        forward.insert("a".to_string(), "1".to_string());
        forward.insert("z".to_string(), "26".to_string());

        let mut reverse = BTreeMap::new();
        reverse.insert("z".to_string(), "26".to_string());
        reverse.insert("a".to_string(), "1".to_string());

        let first = SignableRequest {
            path: "/p",
            query: &forward,
            content_type: "application/json",
            body: None,
        };
        let second = SignableRequest {
            path: "/p",
            query: &reverse,
            content_type: "application/json",
            body: None,
        };

        assert_eq!(
            compute_request_signature(&first, "secret"),
            compute_request_signature(&second, "secret")
        );
    }

    #[test]
    fn test_body_participates_in_signature() {
        let query = query_from(&[("app_key", "abc")]);
        let without_body = SignableRequest {
            path: "/p",
            query: &query,
            content_type: "application/json",
            body: None,
        };
        let with_body = SignableRequest {
            body: Some(r#"{"page_size":10}"#),
            ..without_body
        };

        assert_ne!(
            compute_request_signature(&without_body, "secret"),
            compute_request_signature(&with_body, "secret")
        );

        let expected = hmac_hex("secret", r#"secret/papp_keyabc{"page_size":10}secret"#);
        assert_eq!(compute_request_signature(&with_body, "secret"), expected);
    }

    #[test]
    fn test_multipart_body_is_not_signed() {
        let query = query_from(&[("app_key", "abc")]);
        let multipart = SignableRequest {
            path: "/p",
            query: &query,
            content_type: MULTIPART_CONTENT_TYPE,
            body: Some("--boundary..."),
        };
        let bodyless = SignableRequest {
            content_type: "application/json",
            body: None,
            ..multipart
        };

        assert_eq!(
            compute_request_signature(&multipart, "secret"),
            compute_request_signature(&bodyless, "secret")
        );
    }

    #[test]
    fn test_empty_body_is_not_signed() {
        let query = query_from(&[("app_key", "abc")]);
        let empty = SignableRequest {
            path: "/p",
            query: &query,
            content_type: "application/json",
            body: Some(""),
        };
        let none = SignableRequest { body: None, ..empty };

        assert_eq!(
            compute_request_signature(&empty, "secret"),
            compute_request_signature(&none, "secret")
        );
    }

    #[test]
    fn test_pathname_strips_scheme_host_and_query() {
        assert_eq!(pathname("/api/orders"), "/api/orders");
        assert_eq!(pathname("/api/orders?page=2"), "/api/orders");
        assert_eq!(pathname("https://host.example.com/v1/things?x=1"), "/v1/things");
        assert_eq!(pathname("https://host.example.com"), "/");
        assert_eq!(pathname("/path#fragment"), "/path");
    }

    #[test]
    fn test_hex_encoding() {
        assert_eq!(hex::encode([0x00, 0xff, 0xab, 0xcd]), "00ffabcd");
        assert_eq!(hex::encode([]), "");
        assert_eq!(hex::encode([0x12, 0x34]), "1234");
    }
}
