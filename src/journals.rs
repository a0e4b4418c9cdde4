//! Journal endpoints, keyed by ISSN.

use crate::client::CrossRefClient;
use crate::endpoints::{JOURNAL, JOURNALS, JOURNAL_WORKS};
use crate::error::Result;
use crate::query::QueryOptions;
use crate::types::Page;
use serde_json::Value;

impl CrossRefClient {
    /// A journal by ISSN.
    pub async fn journal(&self, issn: &str) -> Result<Value> {
        self.fetch_item(JOURNAL.template, issn).await
    }

    /// Works published in a journal.
    pub async fn journal_works(&self, issn: &str, options: &QueryOptions) -> Result<Page> {
        self.fetch_page(JOURNAL_WORKS.template, Some(issn), options).await
    }

    /// All journals in the CrossRef database.
    pub async fn journals(&self, options: &QueryOptions) -> Result<Page> {
        self.fetch_page(JOURNALS.template, None, options).await
    }
}
