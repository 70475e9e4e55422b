//! Endpoint URLs, pagination math and the shared JSON codec.
//!
//! Everything request-shaping that is not filter-specific lives here: the
//! canonical API paths, the page-to-offset conversion, quality-adjusted
//! cover URLs and the decoding configuration shared by every component that
//! parses a response body.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Base URL of the catalog API.
pub const API_URL: &str = "https://api.mangadex.org";

/// Base URL of the image/cover upload CDN.
pub const CDN_URL: &str = "https://uploads.mangadex.org";

/// Fixed page size for listing searches.
pub const MANGA_LIMIT: u32 = 20;

/// Suffix appended to cover file names when low-quality covers are enabled.
const LOW_QUALITY_COVER_SUFFIX: &str = ".256.jpg";

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Canonical URL of a single manga resource.
///
/// # Examples
///
/// ```rust
/// use dexcat::util::manga_url;
///
/// assert_eq!(manga_url("abc123"), "https://api.mangadex.org/manga/abc123");
/// ```
pub fn manga_url(id: &str) -> String {
    format!("{API_URL}/manga/{id}")
}

/// Base URL of the listing search endpoint, before query parameters.
pub fn manga_list_url() -> String {
    format!("{API_URL}/manga")
}

/// Canonical URL for a scanlation group lookup.
pub fn group_search_url(group_id: &str) -> String {
    format!("{API_URL}/group/{group_id}")
}

/// Converts a 1-based page number into a listing offset.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for `page < 1`.
///
/// # Examples
///
/// ```rust
/// use dexcat::util::pagination_offset;
///
/// assert_eq!(pagination_offset(3, 20).unwrap(), 40);
/// assert!(pagination_offset(0, 20).is_err());
/// ```
pub fn pagination_offset(page: u32, limit: u32) -> Result<u32> {
    if page < 1 {
        return Err(Error::invalid_argument(format!(
            "page number must be at least 1, got {page}"
        )));
    }
    Ok((page - 1) * limit)
}

/// Builds the quality-adjusted cover URL for a manga.
///
/// The low-quality variant points at the CDN's pre-scaled thumbnail of the
/// same file. The choice is baked into the URL at normalization time; it is
/// not recoverable from the result.
pub fn cover_url(manga_id: &str, file_name: &str, low_quality: bool) -> String {
    if low_quality {
        format!("{CDN_URL}/covers/{manga_id}/{file_name}{LOW_QUALITY_COVER_SUFFIX}")
    } else {
        format!("{CDN_URL}/covers/{manga_id}/{file_name}")
    }
}

/// Collapses every whitespace run in a raw query to a single space.
///
/// Applied to free-text queries only, after prefix classification.
pub fn normalize_query(raw: &str) -> String {
    WHITESPACE.replace_all(raw, " ").into_owned()
}

/// Shared response-decoding configuration.
///
/// One codec value is passed to every component that parses API bodies, so
/// all of them get identical leniency: unknown fields are tolerated,
/// missing required fields are an error. Passing the codec explicitly keeps
/// the configuration out of global state.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    /// Decodes a response body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] when the body is not valid JSON or does not
    /// satisfy the target shape.
    pub fn decode<T>(&self, body: &[u8]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_slice(body).map_err(Into::into)
    }
}
