//! Query options for CrossRef list endpoints.
//!
//! [`QueryOptions`] holds the parameters a list endpoint understands and
//! serializes them into CrossRef's query-string syntax.
//!
//! # Example
//!
//! ```
//! use crossref_client::QueryOptions;
//!
//! let options = QueryOptions::new()
//!     .query("climate")
//!     .filter("type", "journal-article")
//!     .filter("has-full-text", true)
//!     .rows(5);
//! assert_eq!(
//!     options.to_query_string(),
//!     "query=climate&filter=type:journal-article,has-full-text:true&rows=5"
//! );
//! ```

use crate::types::{Sort, SortDirection};
use url::form_urlencoded;

/// Longest free-text query forwarded to CrossRef, in characters.
///
/// CrossRef caps the URL (minus scheme) at 4096 characters; percent-encoding
/// can triple the query, so it is cut well below that.
pub const MAX_QUERY_CHARS: usize = 2000;

/// Options for a list request.
///
/// Serialization order is fixed: `query`, `filter`, `facet`, `offset`,
/// `rows`, `sort`/`order`, then [`extra`](Self::extra) in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Free-text query.
    pub query: Option<String>,
    /// Filter fields, each with one or more values, in insertion order.
    pub filter: Vec<(String, Vec<String>)>,
    /// Request facet counts.
    pub facet: bool,
    /// Start index of the page.
    pub offset: Option<u64>,
    /// Page size.
    pub rows: Option<u64>,
    /// Sort field and direction.
    pub sort: Option<Sort>,
    /// Passthrough parameters emitted verbatim as `key=value`.
    pub extra: Vec<(String, String)>,
}

impl QueryOptions {
    /// Create an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text query.
    pub fn query(mut self, text: impl Into<String>) -> Self {
        self.query = Some(text.into());
        self
    }

    /// Add a `field:value` filter clause. Repeated calls for the same field
    /// accumulate values.
    pub fn filter(mut self, field: impl Into<String>, value: impl ToString) -> Self {
        self.push_filter(field.into(), vec![value.to_string()]);
        self
    }

    /// Add one `field:value` filter clause per value.
    pub fn filter_any<I, V>(mut self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        let values = values.into_iter().map(|v| v.to_string()).collect();
        self.push_filter(field.into(), values);
        self
    }

    /// Request facet counts (`facet=t`).
    pub fn facet(mut self, enabled: bool) -> Self {
        self.facet = enabled;
        self
    }

    /// Set the start index.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the page size.
    pub fn rows(mut self, rows: u64) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Set the sort order.
    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Add a passthrough parameter. A later value for the same key replaces
    /// the earlier one in place.
    ///
    /// Keys naming a typed option (`query`, `filter`, `facet`, `offset`,
    /// `rows`, `sort`, `order`) go through that option instead, so they
    /// are never emitted twice. A `filter` value is read as comma-separated
    /// `field:value` clauses; an `offset` or `rows` that is not a number is
    /// dropped.
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        let key = key.into();
        let value = value.to_string();
        match key.as_str() {
            "query" => self.query(value),
            "facet" => self.facet(!matches!(value.as_str(), "" | "false" | "0")),
            "offset" | "rows" => match value.parse::<u64>() {
                Ok(n) if key == "offset" => self.offset(n),
                Ok(n) => self.rows(n),
                Err(_) => {
                    tracing::warn!(%key, %value, "ignoring non-numeric CrossRef parameter");
                    self
                }
            },
            "filter" => {
                for clause in value.split(',').filter(|c| !c.is_empty()) {
                    let (field, v) = clause.split_once(':').unwrap_or((clause, ""));
                    self.push_filter(field.to_string(), vec![v.to_string()]);
                }
                self
            }
            "sort" => {
                let direction = self
                    .sort
                    .as_ref()
                    .map_or(SortDirection::Desc, |s| s.direction);
                self.sort(Sort::new(value, direction))
            }
            "order" => {
                let direction = match value.as_str() {
                    "asc" => SortDirection::Asc,
                    _ => SortDirection::Desc,
                };
                let field = self
                    .sort
                    .take()
                    .map_or_else(|| "relevance".to_string(), |s| s.field);
                self.sort(Sort::new(field, direction))
            }
            _ => {
                match self.extra.iter_mut().find(|(k, _)| *k == key) {
                    Some(slot) => slot.1 = value,
                    None => self.extra.push((key, value)),
                }
                self
            }
        }
    }

    /// A copy of these options with `offset` replaced.
    pub fn with_offset(&self, offset: u64) -> Self {
        self.clone().offset(offset)
    }

    /// Serialize into a query-string fragment (without the leading `?`).
    ///
    /// Returns an empty string when no option produces a clause.
    pub fn to_query_string(&self) -> String {
        let mut opts: Vec<String> = Vec::new();

        if let Some(query) = &self.query {
            let query = truncate_query(query);
            let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
            opts.push(format!("query={}", encoded));
        }

        if !self.filter.is_empty() {
            let clauses: Vec<String> = self
                .filter
                .iter()
                .flat_map(|(field, values)| values.iter().map(move |v| format!("{}:{}", field, v)))
                .collect();
            opts.push(format!("filter={}", clauses.join(",")));
        }

        if self.facet {
            opts.push("facet=t".to_string());
        }
        if let Some(offset) = self.offset {
            opts.push(format!("offset={}", offset));
        }
        if let Some(rows) = self.rows {
            opts.push(format!("rows={}", rows));
        }
        if let Some(sort) = &self.sort {
            opts.push(format!("sort={}", sort.field));
            opts.push(format!("order={}", sort.direction.as_api_str()));
        }
        for (key, value) in &self.extra {
            opts.push(format!("{}={}", key, value));
        }

        opts.join("&")
    }

    /// Append the serialized options to `path`, adding `?` only when there
    /// is something to append.
    pub fn apply_to(&self, path: &str) -> String {
        let qs = self.to_query_string();
        if qs.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, qs)
        }
    }

    fn push_filter(&mut self, field: String, values: Vec<String>) {
        match self.filter.iter_mut().find(|(f, _)| *f == field) {
            Some((_, existing)) => existing.extend(values),
            None => self.filter.push((field, values)),
        }
    }
}

/// Cut a free-text query down to [`MAX_QUERY_CHARS`] characters.
fn truncate_query(query: &str) -> std::borrow::Cow<'_, str> {
    match query.char_indices().nth(MAX_QUERY_CHARS) {
        Some((cut, _)) => {
            tracing::warn!(
                chars = query.chars().count(),
                limit = MAX_QUERY_CHARS,
                "truncating over-long CrossRef query"
            );
            std::borrow::Cow::Owned(query[..cut].to_string())
        }
        None => std::borrow::Cow::Borrowed(query),
    }
}
