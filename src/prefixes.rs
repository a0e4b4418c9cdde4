//! DOI owner prefix endpoints.

use crate::client::CrossRefClient;
use crate::endpoints::{PREFIX, PREFIX_WORKS};
use crate::error::Result;
use crate::query::QueryOptions;
use crate::types::Page;
use serde_json::Value;

impl CrossRefClient {
    /// Metadata for a DOI owner prefix such as `10.1016`.
    pub async fn prefix(&self, prefix: &str) -> Result<Value> {
        self.fetch_item(PREFIX.template, prefix).await
    }

    /// Works registered under a prefix.
    pub async fn prefix_works(&self, prefix: &str, options: &QueryOptions) -> Result<Page> {
        self.fetch_page(PREFIX_WORKS.template, Some(prefix), options).await
    }
}
