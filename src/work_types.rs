//! Work type endpoints.
//!
//! `/types` is list-shaped but carries no pagination metadata, so it always
//! comes back as a single, final [`Page`].

use crate::client::CrossRefClient;
use crate::endpoints::{TYPE, TYPES};
use crate::error::Result;
use crate::query::QueryOptions;
use crate::types::Page;
use serde_json::Value;

impl CrossRefClient {
    /// A work type such as `journal-article`.
    pub async fn work_type(&self, type_id: &str) -> Result<Value> {
        self.fetch_item(TYPE.template, type_id).await
    }

    /// All valid work types.
    pub async fn types(&self, options: &QueryOptions) -> Result<Page> {
        self.fetch_page(TYPES.template, None, options).await
    }
}
