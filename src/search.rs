//! Catalog search client: query classification, request construction and
//! response normalization.
//!
//! [`SearchClient`] is the orchestrator of the crate. One call to
//! [`search`](SearchClient::search) classifies the raw query, picks the
//! matching endpoint and response shape, issues the request through the
//! transport, and normalizes the body into a [`Page`] of
//! [`CatalogEntry`] values plus a computed has-more flag.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use dexcat::filters::FilterSelection;
//! use dexcat::net::HttpTransport;
//! use dexcat::search::SearchClient;
//!
//! # async fn example() -> dexcat::error::Result<()> {
//! let client = SearchClient::new(Arc::new(HttpTransport::new()))
//!     .with_language("en")
//!     .with_low_quality_covers(false);
//!
//! let page = client
//!     .search(1, "one piece", &FilterSelection::default(), 1)
//!     .await?;
//! println!("{} entries, more: {}", page.items.len(), page.has_more);
//!
//! // Direct-ID lookup: always exactly one result, never more pages.
//! let single = client
//!     .search(1, "id:a96676e5-8ae2-425e-b549-7f15dd34a6d8", &FilterSelection::default(), 1)
//!     .await?;
//! assert_eq!(single.items.len(), 1);
//! # Ok(())
//! # }
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use url::Url;

use crate::{
    error::{Error, Result},
    filters::FilterSelection,
    net::{ApiRequest, Transport},
    types::{CatalogEntry, Page, Query},
    util::{self, JsonCodec},
};

/// Listing response shape: entities plus the pagination window.
#[derive(Debug, Deserialize)]
struct MangaListResponse {
    results: Vec<MangaEntity>,
    limit: u32,
    offset: u32,
    total: u32,
}

/// One catalog entity, as returned both standalone and inside listings.
#[derive(Debug, Deserialize)]
struct MangaEntity {
    data: MangaData,
    #[serde(default)]
    relationships: Vec<Relationship>,
}

#[derive(Debug, Deserialize)]
struct MangaData {
    id: String,
    attributes: MangaAttributes,
}

#[derive(Debug, Deserialize)]
struct MangaAttributes {
    title: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct Relationship {
    #[serde(rename = "type")]
    kind: String,
    attributes: Option<RelationshipAttributes>,
}

#[derive(Debug, Deserialize)]
struct RelationshipAttributes {
    #[serde(rename = "fileName")]
    file_name: Option<String>,
}

/// Remote catalog search client.
///
/// Holds only constructor-injected configuration (transport handle,
/// language, cover quality flag, codec); no state survives a call, so one
/// client can serve concurrent searches.
pub struct SearchClient {
    transport: Arc<dyn Transport>,
    codec: JsonCodec,
    language: String,
    use_low_quality_covers: bool,
}

impl SearchClient {
    /// Creates a search client over the given transport.
    ///
    /// Defaults: language `en`, full-quality covers, the shared
    /// [`JsonCodec`].
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            codec: JsonCodec,
            language: "en".to_string(),
            use_low_quality_covers: false,
        }
    }

    /// Sets the language entries are normalized for.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Selects low-quality cover URLs for every normalized entry.
    ///
    /// Fixed at construction; applied when entries are built, not later.
    pub fn with_low_quality_covers(mut self, low_quality: bool) -> Self {
        self.use_low_quality_covers = low_quality;
        self
    }

    /// Replaces the response-decoding configuration.
    pub fn with_codec(mut self, codec: JsonCodec) -> Self {
        self.codec = codec;
        self
    }

    /// Resolves one page of catalog entries for a raw query.
    ///
    /// The raw query is classified once: an `id:`-prefixed query becomes a
    /// direct lookup that bypasses filters and pagination and returns
    /// exactly one entry with `has_more == false`; a `group:`-prefixed
    /// query hits the group lookup endpoint; anything else is a paginated,
    /// filterable title search.
    ///
    /// An empty item list with a successful response is not an error.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] for `page < 1` on the listing path;
    /// transport and decode failures propagate unmodified.
    pub async fn search(
        &self,
        page: u32,
        raw_query: &str,
        filters: &FilterSelection,
        source_id: i64,
    ) -> Result<Page<CatalogEntry>> {
        match Query::classify(raw_query) {
            Query::ById(id) => self.search_by_id(&id, source_id).await,
            Query::ByGroup(group) => self.search_by_group(&group, source_id).await,
            Query::Text(text) => self.search_listing(page, &text, filters, source_id).await,
        }
    }

    /// Direct lookup of a single entry by exact identifier.
    async fn search_by_id(&self, id: &str, source_id: i64) -> Result<Page<CatalogEntry>> {
        let request = ApiRequest::force_network(util::manga_url(id));
        let body = self.transport.execute(request).await?;

        let entity: MangaEntity = self.codec.decode(&body)?;
        let entry = self.normalize_entity(&entity, source_id);

        // An ID search is one conceptual result, never a page window.
        Ok(Page::new(vec![entry], false))
    }

    /// Lookup of entries belonging to a scanlation group.
    async fn search_by_group(&self, group: &str, source_id: i64) -> Result<Page<CatalogEntry>> {
        let request = ApiRequest::force_network(util::group_search_url(group));
        let body = self.transport.execute(request).await?;

        self.normalize_listing(&body, source_id)
    }

    /// Paginated, filterable title search.
    async fn search_listing(
        &self,
        page: u32,
        query: &str,
        filters: &FilterSelection,
        source_id: i64,
    ) -> Result<Page<CatalogEntry>> {
        let offset = util::pagination_offset(page, util::MANGA_LIMIT)?;

        let mut url = Url::parse(&util::manga_list_url())
            .map_err(|e| Error::parse(format!("invalid listing URL: {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("limit", &util::MANGA_LIMIT.to_string());
            pairs.append_pair("offset", &offset.to_string());

            let normalized = util::normalize_query(query);
            if !normalized.trim().is_empty() {
                pairs.append_pair("title", &normalized);
            }
        }
        let url = filters.apply_to_url(&url);

        let request = ApiRequest::force_network(url);
        let body = self.transport.execute(request).await?;

        self.normalize_listing(&body, source_id)
    }

    /// Decodes a listing body and normalizes it into a page.
    fn normalize_listing(&self, body: &[u8], source_id: i64) -> Result<Page<CatalogEntry>> {
        let response: MangaListResponse = self.codec.decode(body)?;

        let has_more = response.limit + response.offset < response.total;
        let entries = response
            .results
            .iter()
            .map(|entity| self.normalize_entity(entity, source_id))
            .collect::<Vec<_>>();

        debug!(
            entries = entries.len(),
            total = response.total,
            has_more,
            "normalized listing page"
        );

        Ok(Page::new(entries, has_more))
    }

    /// Builds one normalized entry from a raw entity.
    fn normalize_entity(&self, entity: &MangaEntity, source_id: i64) -> CatalogEntry {
        let title = self.pick_title(&entity.data.attributes.title);
        let cover_file = cover_file_name(&entity.relationships);
        let cover_url = cover_file.as_ref().map(|file| {
            util::cover_url(&entity.data.id, file, self.use_low_quality_covers)
        });

        CatalogEntry {
            id: entity.data.id.clone(),
            title,
            cover_file,
            cover_url,
            language: self.language.clone(),
            source_id,
        }
    }

    /// Picks a display title from the multi-language title map.
    ///
    /// Tries the client language, then English, then romanized and native
    /// Japanese, then the first non-empty value.
    fn pick_title(&self, titles: &HashMap<String, String>) -> String {
        let priority = [self.language.as_str(), "en", "ja-ro", "ja"];

        for lang in priority {
            if let Some(title) = titles.get(lang) {
                if !title.trim().is_empty() {
                    return title.trim().to_string();
                }
            }
        }

        titles
            .values()
            .find(|title| !title.trim().is_empty())
            .map(|title| title.trim().to_string())
            .unwrap_or_else(|| "Unknown Title".to_string())
    }
}

/// Extracts the cover file reference from entity relationships.
fn cover_file_name(relationships: &[Relationship]) -> Option<String> {
    relationships
        .iter()
        .find(|rel| rel.kind == "cover_art")
        .and_then(|rel| {
            rel.attributes
                .as_ref()
                .and_then(|attrs| attrs.file_name.clone())
        })
}
