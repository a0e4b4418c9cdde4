//! Funder endpoints (the Funder Registry).

use crate::client::CrossRefClient;
use crate::endpoints::{FUNDER, FUNDERS, FUNDER_WORKS};
use crate::error::Result;
use crate::query::QueryOptions;
use crate::types::Page;
use serde_json::Value;

impl CrossRefClient {
    /// A funder and its sub-organisations.
    pub async fn funder(&self, funder_id: &str) -> Result<Value> {
        self.fetch_item(FUNDER.template, funder_id).await
    }

    /// Works associated with a funder.
    pub async fn funder_works(&self, funder_id: &str, options: &QueryOptions) -> Result<Page> {
        self.fetch_page(FUNDER_WORKS.template, Some(funder_id), options).await
    }

    /// All funders in the Funder Registry.
    pub async fn funders(&self, options: &QueryOptions) -> Result<Page> {
        self.fetch_page(FUNDERS.template, None, options).await
    }
}
