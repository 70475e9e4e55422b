//! Core data types for catalog entries, result pages and chapter pages.
//!
//! This module defines the request-scoped value objects produced by the
//! search client and the page resolver:
//!
//! - [`CatalogEntry`] - one normalized remote listing
//! - [`Page`] - one page of results plus a computed has-more flag
//! - [`PageDescriptor`] - one fetchable chapter page with provenance
//! - [`Query`] - the classified form of a raw search input
//!
//! None of these hold network state; they are plain values that do not
//! outlive the call that produced them.

use serde::{Deserialize, Serialize};

/// Literal prefix marking a direct-ID query.
pub const PREFIX_ID_SEARCH: &str = "id:";

/// Literal prefix marking a scanlation-group query.
pub const PREFIX_GROUP_SEARCH: &str = "group:";

/// The classified form of a raw search input.
///
/// A raw query string is resolved into exactly one of these variants once,
/// at the top of a search, and the rest of the call branches on the result.
/// Prefix recognition is case-sensitive and happens on the raw string,
/// before any whitespace normalization.
///
/// # Examples
///
/// ```rust
/// use dexcat::types::Query;
///
/// assert_eq!(Query::classify("id:abc123"), Query::ById("abc123".to_string()));
/// assert_eq!(Query::classify("group:xyz"), Query::ByGroup("xyz".to_string()));
/// // Case-sensitive: an uppercase prefix stays free text.
/// assert_eq!(Query::classify("ID:abc123"), Query::Text("ID:abc123".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Free-text title search, paginated and filterable.
    Text(String),
    /// Exact lookup of a single entry by identifier.
    ById(String),
    /// Lookup of entries belonging to a scanlation group.
    ByGroup(String),
}

impl Query {
    /// Classifies a raw query string into its variant.
    pub fn classify(raw: &str) -> Self {
        if let Some(id) = raw.strip_prefix(PREFIX_ID_SEARCH) {
            Query::ById(id.to_string())
        } else if let Some(group) = raw.strip_prefix(PREFIX_GROUP_SEARCH) {
            Query::ByGroup(group.to_string())
        } else {
            Query::Text(raw.to_string())
        }
    }
}

/// One normalized remote catalog listing.
///
/// The cover URL is quality-adjusted when the entry is built, according to
/// the search client's low-quality-covers flag; the original quality choice
/// cannot be re-derived from the entry afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Identifier of the entry within the remote catalog.
    pub id: String,

    /// Display title.
    pub title: String,

    /// Cover file reference as reported by the API, when present.
    pub cover_file: Option<String>,

    /// Quality-adjusted cover URL, when a cover reference exists.
    pub cover_url: Option<String>,

    /// Language the entry was normalized for.
    pub language: String,

    /// Numeric identifier of the requesting source, stamped at search time.
    pub source_id: i64,
}

/// One page of results plus a computed has-more flag.
///
/// `has_more` is never taken verbatim from the remote; it is computed from
/// the response's `limit + offset < total`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items in source order.
    pub items: Vec<T>,

    /// Whether pages exist beyond this one.
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Creates a page from items and a precomputed has-more flag.
    pub fn new(items: Vec<T>, has_more: bool) -> Self {
        Self { items, has_more }
    }

    /// An empty final page. Not an error: it signals "no results".
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            has_more: false,
        }
    }
}

/// One fetchable chapter page with the provenance a downstream image fetch
/// needs.
///
/// `fetch_token` is `"{host},{originating_request_url},{capture_millis}"`;
/// the image-delivery host splits it back apart to recover the referer
/// URL and issue time for its expiry and signature checks. Every
/// descriptor from one resolve call shares the same capture timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDescriptor {
    /// 0-based position in reading order.
    pub index: usize,

    /// Opaque provenance token for the image-delivery host.
    pub fetch_token: String,

    /// Server-relative image path, e.g. `/data/{hash}/{file}`.
    pub image_url_fragment: String,
}
