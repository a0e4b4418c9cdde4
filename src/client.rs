//! The CrossRef API client.

use crate::error::{CrossRefError, Result};
use crate::parse::{error_message, parse_envelope_str};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Default CrossRef endpoint.
pub const DEFAULT_BASE_URL: &str = "http://api.crossref.org/";

/// Request timeout. CrossRef is slow; this is a ceiling, not a target.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const USER_AGENT: &str = concat!("crossref-client/", env!("CARGO_PKG_VERSION"));

/// Async client for the CrossRef REST API.
///
/// Each call issues exactly one GET request; there is no retry, caching or
/// rate limiting. The handle is cheap to clone and may be shared between
/// tasks.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> crossref_client::error::Result<()> {
/// use crossref_client::{CrossRefClient, QueryOptions};
///
/// let client = CrossRefClient::new()?;
/// let work = client.work("10.1145/1327452.1327492").await?;
/// println!("{}", work["title"][0]);
///
/// let mut options = QueryOptions::new().query("graphene").rows(20);
/// loop {
///     let page = client.works(&options).await?;
///     println!("{} works", page.items.len());
///     if page.is_done {
///         break;
///     }
///     options = page.next_options;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CrossRefClient {
    pub(crate) http: Client,
    pub(crate) base_url: String,
}

impl CrossRefClient {
    /// Create a client against the public CrossRef endpoint.
    pub fn new() -> Result<Self> {
        Self::with_user_agent(USER_AGENT.to_string())
    }

    /// Create a client, picking up `CROSSREF_MAILTO` if it is set.
    pub fn from_env() -> Result<Self> {
        match std::env::var("CROSSREF_MAILTO") {
            Ok(mailto) if !mailto.trim().is_empty() => Self::new()?.with_mailto(mailto.trim()),
            _ => Self::new(),
        }
    }

    /// Identify the caller to CrossRef ("polite pool") via the User-Agent.
    pub fn with_mailto(self, mailto: &str) -> Result<Self> {
        let agent = format!("{} (mailto:{})", USER_AGENT, mailto);
        let base_url = self.base_url;
        Ok(Self {
            base_url,
            ..Self::with_user_agent(agent)?
        })
    }

    /// Override the base URL (useful for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let mut url = url.into();
        if !url.ends_with('/') {
            url.push('/');
        }
        self.base_url = url;
        self
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn with_user_agent(agent: String) -> Result<Self> {
        let http = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent(agent)
            .build()?;

        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// GET `path` relative to the base URL and return the envelope's
    /// `message`.
    pub(crate) async fn get(&self, path: &str) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "CrossRef request");

        let response = self.http.get(&url).send().await?;
        handle_response(response, url).await
    }
}

/// Map the HTTP response to the envelope message or a typed error.
async fn handle_response(response: reqwest::Response, url: String) -> Result<Value> {
    let status = response.status();
    tracing::debug!(status = status.as_u16(), %url, "CrossRef response");

    match status.as_u16() {
        404 => Err(CrossRefError::NotFound { url }),
        code if code >= 400 => {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unspecified error")
                    .to_string()
            });
            Err(CrossRefError::Upstream {
                status: Some(code),
                message,
            })
        }
        _ => {
            let body = response.text().await?;
            parse_envelope_str(&body)
        }
    }
}
