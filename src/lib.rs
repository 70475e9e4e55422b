//! # dexcat - MangaDex catalog search and chapter page resolution
//!
//! dexcat is an async client library for the MangaDex-style catalog API. It
//! resolves a user query and a set of structured filters into one page of
//! normalized catalog entries, and separately resolves a chapter response
//! into an ordered list of fetchable image locations, honoring the
//! data-saver bandwidth toggle.
//!
//! ## Features
//!
//! - **Query Classification**: free text, `id:` direct lookup and `group:`
//!   lookup resolved once into a sum type, each hitting its own endpoint
//! - **Deterministic Filters**: a closed set of filter kinds with stable,
//!   byte-identical URL encoding
//! - **Computed Pagination**: has-more derived from `limit + offset < total`,
//!   never trusted from the wire
//! - **Page Provenance**: every chapter page carries the token the
//!   image-delivery host needs to authorize the fetch
//! - **Pluggable Transport**: request execution behind an async trait, with
//!   a rate-limited, retrying reqwest implementation included
//!
//! ## Searching the catalog
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use dexcat::prelude::*;
//! use dexcat::error::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let transport = Arc::new(HttpTransport::new().with_rate_limit(1000));
//!     let client = SearchClient::new(transport).with_language("en");
//!
//!     let filters = FilterSelectionBuilder::default()
//!         .content_ratings(vec![ContentRating::Safe])
//!         .sort_by(Some(SortOrder::UpdatedAt))
//!         .build()
//!         .unwrap();
//!
//!     let page = client.search(1, "one piece", &filters, 1).await?;
//!     for entry in &page.items {
//!         println!("{} ({})", entry.title, entry.id);
//!     }
//!     println!("more pages: {}", page.has_more);
//!     Ok(())
//! }
//! ```
//!
//! ## Resolving chapter pages
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use dexcat::prelude::*;
//! use dexcat::error::Result;
//!
//! # async fn example() -> Result<()> {
//! let transport = Arc::new(HttpTransport::new());
//! let chapter_url = "https://api.mangadex.org/chapter/123";
//! let body = transport.execute(ApiRequest::get(chapter_url)).await?;
//!
//! let pages = PageResolver::new().resolve_pages(
//!     &body,
//!     chapter_url,
//!     "https://cdn.example.org",
//!     /* data_saver */ true,
//! )?;
//!
//! for page in &pages {
//!     println!("{} -> {}", page.index, page.image_url_fragment);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`search`]: the orchestrating catalog search client
//! - [`chapter`]: chapter page and external-pointer resolution
//! - [`filters`]: the closed filter vocabulary and its URL encoding
//! - [`util`]: endpoint URLs, pagination math, the shared JSON codec
//! - [`net`]: the transport seam and the reqwest-backed implementation
//! - [`types`]: catalog entries, pages, descriptors, the query sum type
//! - [`error`]: the crate error taxonomy

pub mod chapter;
pub mod error;
pub mod filters;
pub mod net;
pub mod search;
pub mod types;
pub mod util;

/// Prelude module for convenient imports.
///
/// Re-exports the types needed for the common search-then-resolve flow.
///
/// # Example
///
/// ```rust
/// use dexcat::prelude::*;
///
/// // Now you have access to:
/// // - SearchClient, PageResolver
/// // - FilterSelection and its builder, filter enums
/// // - CatalogEntry, Page, PageDescriptor, Query
/// // - Transport, HttpTransport, ApiRequest
/// ```
pub mod prelude {
    pub use crate::{
        chapter::PageResolver,
        filters::{
            ContentRating, Demographic, FilterSelection, FilterSelectionBuilder,
            PublicationStatus, SortOrder,
        },
        net::{ApiRequest, CachePolicy, HttpTransport, Transport},
        search::SearchClient,
        types::{CatalogEntry, Page, PageDescriptor, Query},
    };
}

// Re-export main types at crate root for direct access
pub use chapter::PageResolver;
pub use error::{Error, Result};
pub use filters::{FilterSelection, FilterSelectionBuilder};
pub use net::{ApiRequest, CachePolicy, HttpTransport, Transport};
pub use search::SearchClient;
pub use types::{CatalogEntry, Page, PageDescriptor, Query};
pub use util::JsonCodec;
