//! Chapter page resolution: from a chapter API response to an ordered list
//! of fetchable page descriptors.
//!
//! The resolver does no network work of its own. The caller fetches the
//! chapter body through the transport and hands it over together with the
//! URL it was fetched from and the image-delivery host assigned for it;
//! those two, plus a capture timestamp, become the provenance token each
//! descriptor carries for the downstream image fetch.
//!
//! # Examples
//!
//! ```rust
//! use dexcat::chapter::PageResolver;
//!
//! let body = br#"{"data":{"attributes":{
//!     "hash":"H","data":["a.png","b.png"],"dataSaver":["a.jpg","b.jpg"]}}}"#;
//!
//! let resolver = PageResolver::new();
//! let pages = resolver
//!     .resolve_pages(body, "https://api.mangadex.org/chapter/1", "https://cdn1", false)
//!     .unwrap();
//!
//! assert_eq!(pages.len(), 2);
//! assert_eq!(pages[0].image_url_fragment, "/data/H/a.png");
//! ```

use serde::Deserialize;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

use crate::{
    error::Result,
    types::PageDescriptor,
    util::JsonCodec,
};

/// Chapter response shape.
#[derive(Debug, Deserialize)]
struct ChapterResponse {
    data: ChapterData,
}

#[derive(Debug, Deserialize)]
struct ChapterData {
    attributes: ChapterAttributes,
}

#[derive(Debug, Deserialize)]
struct ChapterAttributes {
    hash: String,
    data: Vec<String>,
    #[serde(rename = "dataSaver")]
    data_saver: Vec<String>,
}

/// External-pointer response shape, for chapters hosted off-site.
#[derive(Debug, Deserialize)]
struct ExternalResponse {
    data: ExternalData,
}

#[derive(Debug, Deserialize)]
struct ExternalData {
    pages: String,
}

/// Resolves chapter responses into ordered page descriptors.
///
/// Stateless apart from the injected codec; one resolver can serve
/// concurrent chapters.
#[derive(Debug, Clone, Default)]
pub struct PageResolver {
    codec: JsonCodec,
}

impl PageResolver {
    /// Creates a resolver with the shared [`JsonCodec`].
    pub fn new() -> Self {
        Self { codec: JsonCodec }
    }

    /// Replaces the response-decoding configuration.
    pub fn with_codec(mut self, codec: JsonCodec) -> Self {
        self.codec = codec;
        self
    }

    /// Resolves a chapter body into page descriptors in reading order.
    ///
    /// `data_saver` selects the lower-fidelity file list; the selection is
    /// a pure function of the flag, with no fallback. An empty selected
    /// list yields an empty result, not an error. Source order is
    /// preserved and must round-trip into final image-fetch order.
    ///
    /// Every descriptor from one call shares a single capture timestamp
    /// inside its fetch token.
    ///
    /// # Errors
    ///
    /// [`Error::Json`](crate::error::Error::Json) when the body does not
    /// match the chapter shape.
    pub fn resolve_pages(
        &self,
        body: &[u8],
        request_url: &str,
        host: &str,
        data_saver: bool,
    ) -> Result<Vec<PageDescriptor>> {
        let response: ChapterResponse = self.codec.decode(body)?;
        let attributes = response.data.attributes;

        let (quality, files) = if data_saver {
            ("data-saver", &attributes.data_saver)
        } else {
            ("data", &attributes.data)
        };

        let now = capture_millis();
        let fetch_token = format!("{host},{request_url},{now}");

        let pages = files
            .iter()
            .enumerate()
            .map(|(index, file)| PageDescriptor {
                index,
                fetch_token: fetch_token.clone(),
                image_url_fragment: format!("/{quality}/{}/{file}", attributes.hash),
            })
            .collect::<Vec<_>>();

        debug!(pages = pages.len(), quality, "resolved chapter pages");

        Ok(pages)
    }

    /// Resolves an externally-hosted chapter pointer.
    ///
    /// Decodes the single-pointer payload and returns only the final path
    /// segment of the pointer URL.
    ///
    /// # Errors
    ///
    /// [`Error::Json`](crate::error::Error::Json) when the payload is
    /// malformed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dexcat::chapter::PageResolver;
    ///
    /// let body = br#"{"data":{"pages":"https://host/view/xyz987"}}"#;
    /// let key = PageResolver::new().resolve_external(body).unwrap();
    /// assert_eq!(key, "xyz987");
    /// ```
    pub fn resolve_external(&self, body: &[u8]) -> Result<String> {
        let response: ExternalResponse = self.codec.decode(body)?;
        let pointer = response.data.pages;

        let key = match pointer.rfind('/') {
            Some(idx) => pointer[idx + 1..].to_string(),
            None => pointer,
        };
        Ok(key)
    }
}

/// Milliseconds since the Unix epoch, captured once per resolve call.
fn capture_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}
