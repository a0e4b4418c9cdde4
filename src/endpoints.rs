//! The CrossRef endpoint table and the two generic fetchers behind it.
//!
//! Every route is either an *item* (one resource identified by a path
//! parameter) or a *list* (a page of resources, optionally scoped by a path
//! parameter). The typed methods on [`CrossRefClient`] are thin bindings
//! over [`CrossRefClient::fetch_item`] and [`CrossRefClient::fetch_page`].

use crate::client::CrossRefClient;
use crate::error::{CrossRefError, Result};
use crate::parse::parse_page;
use crate::query::QueryOptions;
use crate::types::Page;
use serde_json::Value;

/// Placeholder substituted with the caller's parameter.
pub const PARAM: &str = "{param}";

/// Which fetcher serves an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    Item,
    List,
}

/// A route: logical name, URL template and fetcher kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub name: &'static str,
    pub template: &'static str,
    pub kind: EndpointKind,
}

impl Endpoint {
    const fn item(name: &'static str, template: &'static str) -> Self {
        Self {
            name,
            template,
            kind: EndpointKind::Item,
        }
    }

    const fn list(name: &'static str, template: &'static str) -> Self {
        Self {
            name,
            template,
            kind: EndpointKind::List,
        }
    }

    /// Whether the template expects a path parameter.
    pub fn takes_param(&self) -> bool {
        self.template.contains(PARAM)
    }

    /// Find an endpoint by its logical name.
    pub fn lookup(name: &str) -> Option<&'static Endpoint> {
        ENDPOINTS.iter().find(|e| e.name == name)
    }
}

pub const WORK: Endpoint = Endpoint::item("work", "works/{param}");
pub const FUNDER: Endpoint = Endpoint::item("funder", "funders/{param}");
pub const PREFIX: Endpoint = Endpoint::item("prefix", "prefixes/{param}");
pub const MEMBER: Endpoint = Endpoint::item("member", "members/{param}");
pub const TYPE: Endpoint = Endpoint::item("type", "types/{param}");
pub const JOURNAL: Endpoint = Endpoint::item("journal", "journals/{param}");

pub const FUNDER_WORKS: Endpoint = Endpoint::list("funderWorks", "funders/{param}/works");
pub const PREFIX_WORKS: Endpoint = Endpoint::list("prefixWorks", "prefixes/{param}/works");
pub const MEMBER_WORKS: Endpoint = Endpoint::list("memberWorks", "members/{param}/works");
pub const JOURNAL_WORKS: Endpoint = Endpoint::list("journalWorks", "journals/{param}/works");

pub const WORKS: Endpoint = Endpoint::list("works", "works");
pub const FUNDERS: Endpoint = Endpoint::list("funders", "funders");
pub const MEMBERS: Endpoint = Endpoint::list("members", "members");
pub const TYPES: Endpoint = Endpoint::list("types", "types");
pub const LICENSES: Endpoint = Endpoint::list("licenses", "licenses");
pub const JOURNALS: Endpoint = Endpoint::list("journals", "journals");

/// All endpoints, items first.
pub const ENDPOINTS: &[Endpoint] = &[
    WORK,
    FUNDER,
    PREFIX,
    MEMBER,
    TYPE,
    JOURNAL,
    FUNDER_WORKS,
    PREFIX_WORKS,
    MEMBER_WORKS,
    JOURNAL_WORKS,
    WORKS,
    FUNDERS,
    MEMBERS,
    TYPES,
    LICENSES,
    JOURNALS,
];

/// Substitute the first `{param}` in `template`.
///
/// Templates are expected to hold at most one placeholder; extra ones are
/// left in place. A template with a placeholder and no `param` is an error,
/// and a `param` for a template without one is ignored.
pub fn resolve(template: &str, param: Option<&str>) -> Result<String> {
    match param {
        Some(param) => Ok(template.replacen(PARAM, param, 1)),
        None if template.contains(PARAM) => Err(CrossRefError::InvalidRequest(format!(
            "`{}` needs a path parameter",
            template
        ))),
        None => Ok(template.to_string()),
    }
}

/// Result of [`CrossRefClient::fetch`].
#[derive(Debug, Clone, PartialEq)]
pub enum EndpointResult {
    Item(Value),
    Page(Page),
}

impl CrossRefClient {
    /// Fetch a single resource through an item template.
    pub async fn fetch_item(&self, template: &str, param: &str) -> Result<Value> {
        self.get(&resolve(template, Some(param))?).await
    }

    /// Fetch one page through a list template.
    pub async fn fetch_page(
        &self,
        template: &str,
        param: Option<&str>,
        options: &QueryOptions,
    ) -> Result<Page> {
        let path = options.apply_to(&resolve(template, param)?);
        let message = self.get(&path).await?;
        parse_page(message, options)
    }

    /// Call any endpoint from the table. `options` is ignored for items.
    pub async fn fetch(
        &self,
        endpoint: &Endpoint,
        param: Option<&str>,
        options: &QueryOptions,
    ) -> Result<EndpointResult> {
        match endpoint.kind {
            EndpointKind::Item => {
                let message = self.get(&resolve(endpoint.template, param)?).await?;
                Ok(EndpointResult::Item(message))
            }
            EndpointKind::List => self
                .fetch_page(endpoint.template, param, options)
                .await
                .map(EndpointResult::Page),
        }
    }
}
