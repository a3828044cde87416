//! Typed payloads for TikTok Shop API endpoints.
//!
//! These are the `data` shapes the connector deserializes API envelopes
//! into. Only the fields the SDK acts on are modeled; everything else
//! stays available through [`ApiResponse::data`](crate::ApiResponse::data)
//! on the raw envelope.

mod product;
mod shop;

pub use product::ProductPage;
pub use shop::{Shop, ShopList};
