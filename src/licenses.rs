//! License endpoint.

use crate::client::CrossRefClient;
use crate::endpoints::LICENSES;
use crate::error::Result;
use crate::query::QueryOptions;
use crate::types::Page;

impl CrossRefClient {
    /// Licenses applied to works in CrossRef metadata.
    pub async fn licenses(&self, options: &QueryOptions) -> Result<Page> {
        self.fetch_page(LICENSES.template, None, options).await
    }
}
