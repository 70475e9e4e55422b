//! Common test utilities
//!
//! Shared mock transport and response fixtures used across test modules.

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::json;
use std::sync::Mutex;

use dexcat::error::{Error, Result};
use dexcat::net::{ApiRequest, Transport};

/// In-process transport double.
///
/// Answers requests from canned bodies matched by URL prefix and records
/// every request it sees, so tests can assert on the exact URLs and cache
/// directives the client constructed.
pub struct MockTransport {
    routes: Vec<(String, Bytes)>,
    requests: Mutex<Vec<ApiRequest>>,
    failure: Option<String>,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            requests: Mutex::new(Vec::new()),
            failure: None,
        }
    }

    /// Serves `body` for every URL starting with `url_prefix`.
    pub fn with_route(mut self, url_prefix: &str, body: impl Into<String>) -> Self {
        self.routes.push((url_prefix.to_string(), Bytes::from(body.into())));
        self
    }

    /// Makes every request fail with an HTTP error carrying `status_text`.
    pub fn with_failure(mut self, status_text: &str) -> Self {
        self.failure = Some(status_text.to_string());
        self
    }

    /// Every request executed so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Bytes> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(status) = &self.failure {
            return Err(Error::http(status.clone()));
        }

        for (prefix, body) in &self.routes {
            if request.url.starts_with(prefix.as_str()) {
                return Ok(body.clone());
            }
        }

        Err(Error::http(format!("404 Not Found: {}", request.url)))
    }
}

/// Single-entity response body with one English title and an optional
/// cover relationship.
#[allow(dead_code)]
pub fn entity_body(id: &str, title: &str, cover_file: Option<&str>) -> String {
    let relationships = match cover_file {
        Some(file) => json!([{
            "type": "cover_art",
            "attributes": { "fileName": file }
        }]),
        None => json!([]),
    };

    json!({
        "result": "ok",
        "data": {
            "id": id,
            "type": "manga",
            "attributes": {
                "title": { "en": title }
            }
        },
        "relationships": relationships
    })
    .to_string()
}

/// Listing response body with generated entries and an explicit
/// pagination window.
#[allow(dead_code)]
pub fn list_body(count: usize, limit: u32, offset: u32, total: u32) -> String {
    let results: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            json!({
                "data": {
                    "id": format!("entry-{i}"),
                    "type": "manga",
                    "attributes": {
                        "title": { "en": format!("Entry {i}") }
                    }
                },
                "relationships": []
            })
        })
        .collect();

    json!({
        "results": results,
        "limit": limit,
        "offset": offset,
        "total": total
    })
    .to_string()
}
