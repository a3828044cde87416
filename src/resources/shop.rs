//! Shop resource types.
//!
//! An app is authorized against one or more shops. The authorized shops
//! endpoint reports them, and every shop-scoped API call afterwards carries
//! the shop's `cipher` as a query parameter.

use serde::{Deserialize, Serialize};

/// A TikTok Shop the app is authorized to act for.
///
/// Returned by the authorized shops endpoint. The `cipher` is the value
/// shop-scoped requests need; the rest is descriptive.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Shop {
    /// Opaque value identifying the shop in shop-scoped API calls.
    pub cipher: String,
    /// Human-readable shop code.
    pub code: String,
    /// Numeric shop id.
    pub id: i64,
    /// Display name of the shop.
    pub name: String,
    /// Region the shop sells in (e.g., "US", "GB").
    pub region: String,
    /// Seller type (e.g., "CROSS_BORDER", "LOCAL").
    pub seller_type: String,
}

/// Payload of the authorized shops endpoint.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ShopList {
    /// Shops the app is currently authorized for. Missing in the envelope
    /// when the authorization grants none.
    #[serde(default)]
    pub shops: Vec<Shop>,
}
