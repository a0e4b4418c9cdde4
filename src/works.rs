//! Work endpoints: `/works/{doi}` and `/works`.

use crate::client::CrossRefClient;
use crate::endpoints::{WORK, WORKS};
use crate::error::Result;
use crate::query::QueryOptions;
use crate::types::{Page, Work};
use serde_json::Value;

impl CrossRefClient {
    /// Metadata for a single DOI.
    ///
    /// Fails with [`CrossRefError::NotFound`](crate::CrossRefError::NotFound)
    /// when CrossRef has no record of it.
    pub async fn work(&self, doi: &str) -> Result<Value> {
        self.fetch_item(WORK.template, doi).await
    }

    /// Like [`work`](Self::work), decoded into a [`Work`].
    pub async fn work_typed(&self, doi: &str) -> Result<Work> {
        let value = self.work(doi).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// One page of all works (journal articles, proceedings, books,
    /// components, ...), 20 per page unless `rows` says otherwise.
    pub async fn works(&self, options: &QueryOptions) -> Result<Page> {
        self.fetch_page(WORKS.template, None, options).await
    }
}
