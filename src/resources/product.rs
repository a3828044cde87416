//! Product resource types.

use serde::{Deserialize, Serialize};

/// One page of results from the product search endpoint.
///
/// Products are kept as raw JSON values. The search endpoint returns a
/// large, versioned product document, and callers that need specific
/// fields can deserialize the entries they care about.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ProductPage {
    /// Total number of products matching the search, across all pages.
    #[serde(default)]
    pub total_count: i64,
    /// Products on this page.
    #[serde(default)]
    pub products: Vec<serde_json::Value>,
    /// Token to request the next page, absent on the last page.
    #[serde(default)]
    pub next_page_token: Option<String>,
}
