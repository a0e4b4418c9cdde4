//! # crossref-client
//!
//! A Rust client for the public CrossRef REST API.
//!
//! Provides:
//! - **Library**: async bindings for works, funders, members, prefixes,
//!   types, journals and licenses, with explicit page-by-page pagination
//! - **CLI**: `crossref` binary for terminal use (feature `cli`)
//!
//! ## Quick Start
//!
//! ```no_run
//! # async fn example() -> crossref_client::error::Result<()> {
//! use crossref_client::{CrossRefClient, QueryOptions};
//!
//! let client = CrossRefClient::from_env()?;
//!
//! // A single work
//! let work = client.work_typed("10.1145/1327452.1327492").await?;
//! println!("{} ({:?})", work.first_title(), work.year());
//!
//! // A page of search results
//! let options = QueryOptions::new()
//!     .query("room temperature superconductor")
//!     .filter("type", "journal-article")
//!     .rows(10);
//! let page = client.works(&options).await?;
//! println!("{} of {:?}", page.items.len(), page.total_results());
//!
//! // The next page
//! if !page.is_done {
//!     let next = client.works(&page.next_options).await?;
//!     println!("{} more", next.items.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod endpoints;
pub mod error;
pub mod funders;
pub mod journals;
pub mod licenses;
pub mod members;
pub mod parse;
pub mod prefixes;
pub mod query;
pub mod types;
pub mod work_types;
pub mod works;

// Re-export key types at the crate root.
pub use client::CrossRefClient;
pub use endpoints::{Endpoint, EndpointKind, EndpointResult, ENDPOINTS};
pub use error::CrossRefError;
pub use query::QueryOptions;
pub use types::*;
