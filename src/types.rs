//! Public types for the CrossRef client.
//!
//! Endpoints hand back raw `serde_json::Value` resources; the typed views
//! here ([`Work`], [`Author`]) cover the commonly used work fields and can be
//! decoded from those values on demand.

use crate::error::Result;
use crate::query::QueryOptions;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// The upstream `items` array, in upstream order.
    pub items: Vec<Value>,
    /// Options for requesting the following page.
    pub next_options: QueryOptions,
    /// `true` once the result set has been exhausted.
    pub is_done: bool,
    /// The envelope message with `items` removed.
    pub message: Map<String, Value>,
}

impl Page {
    /// Decode the items into a typed view.
    pub fn items_as<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.items
            .iter()
            .map(|item| T::deserialize(item).map_err(Into::into))
            .collect()
    }

    /// `total-results` reported by CrossRef, if present.
    pub fn total_results(&self) -> Option<u64> {
        self.message.get("total-results").and_then(Value::as_u64)
    }
}

/// Sort specification for list queries (`sort=<field>&order=<dir>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// CrossRef `order` parameter value.
    pub fn as_api_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl Sort {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn published_desc() -> Self {
        Self::new("published", SortDirection::Desc)
    }

    pub fn cited_desc() -> Self {
        Self::new("is-referenced-by-count", SortDirection::Desc)
    }

    pub fn relevance() -> Self {
        Self::new("relevance", SortDirection::Desc)
    }
}

impl std::fmt::Display for Sort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.field, self.direction.as_api_str())
    }
}

/// A CrossRef work (the common subset of fields).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Work {
    #[serde(rename = "DOI")]
    pub doi: String,
    #[serde(default)]
    pub title: Vec<String>,
    #[serde(default)]
    pub author: Vec<Author>,
    #[serde(default)]
    pub container_title: Vec<String>,
    pub publisher: Option<String>,
    #[serde(rename = "type")]
    pub work_type: Option<String>,
    pub issued: Option<PartialDate>,
    #[serde(rename = "URL")]
    pub url: Option<String>,
    pub is_referenced_by_count: Option<u64>,
}

impl Work {
    /// First title, or empty.
    pub fn first_title(&self) -> &str {
        self.title.first().map(String::as_str).unwrap_or("")
    }

    /// Year of issue, when CrossRef knows it.
    pub fn year(&self) -> Option<i32> {
        self.issued.as_ref().and_then(PartialDate::year)
    }
}

/// A work contributor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub given: Option<String>,
    pub family: Option<String>,
    /// Organisational authors carry only a name.
    pub name: Option<String>,
    #[serde(rename = "ORCID")]
    pub orcid: Option<String>,
}

impl Author {
    /// Format as "Given Family" for display.
    pub fn display_name(&self) -> String {
        match (&self.given, &self.family) {
            (Some(given), Some(family)) => format!("{} {}", given, family),
            (None, Some(family)) => family.clone(),
            (Some(given), None) => given.clone(),
            (None, None) => self.name.clone().unwrap_or_default(),
        }
    }
}

/// CrossRef date: `{"date-parts": [[year, month?, day?]]}`.
///
/// The year may be `null` for undated works.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartialDate {
    #[serde(rename = "date-parts")]
    pub date_parts: Vec<Vec<Option<i32>>>,
}

impl PartialDate {
    pub fn year(&self) -> Option<i32> {
        self.date_parts.first().and_then(|p| p.first().copied().flatten())
    }
}
