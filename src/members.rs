//! CrossRef member (mostly publisher) endpoints.

use crate::client::CrossRefClient;
use crate::endpoints::{MEMBER, MEMBERS, MEMBER_WORKS};
use crate::error::Result;
use crate::query::QueryOptions;
use crate::types::Page;
use serde_json::Value;

impl CrossRefClient {
    pub async fn member(&self, member_id: &str) -> Result<Value> {
        self.fetch_item(MEMBER.template, member_id).await
    }

    /// Works deposited by a member.
    pub async fn member_works(&self, member_id: &str, options: &QueryOptions) -> Result<Page> {
        self.fetch_page(MEMBER_WORKS.template, Some(member_id), options).await
    }

    pub async fn members(&self, options: &QueryOptions) -> Result<Page> {
        self.fetch_page(MEMBERS.template, None, options).await
    }
}
