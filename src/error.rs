//! Error types and result handling for dexcat operations.
//!
//! All public operations return a [`Result<T>`], a type alias for
//! `std::result::Result<T, Error>`.
//!
//! # Error Categories
//!
//! - **Network Errors**: connection failures, timeouts, TLS problems
//! - **HTTP Errors**: non-2xx responses from the API
//! - **Parse Errors**: response bodies that do not match the expected shape
//! - **JSON Errors**: decode failures at the codec layer
//! - **Invalid Arguments**: malformed caller input such as a zero page number
//! - **Rate Limiting**: the backend throttled the request past all retries
//!
//! An empty-but-successful search page is deliberately *not* an error: it
//! comes back as `Ok` with an empty item list, so callers can always tell
//! "no results" apart from "the request failed".
//!
//! # Examples
//!
//! ```rust
//! use dexcat::error::Error;
//!
//! let err = Error::http("404 Not Found");
//! assert!(err.to_string().starts_with("HTTP error"));
//! ```

use thiserror::Error;

/// Type alias for Results with dexcat errors.
///
/// All public APIs in dexcat return this Result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all dexcat operations.
///
/// Parse and transport failures propagate to the caller unmodified; no
/// component retries or silently recovers above the transport layer.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed caller input.
    ///
    /// Raised before any request is issued, e.g. for a pagination page
    /// number below 1.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Non-2xx response from the API.
    ///
    /// Carries the raw status text so callers can classify the condition
    /// themselves. The rendered message always starts with `HTTP error`,
    /// which callers match on to append a "this may be transient" hint.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Transport-level errors from the underlying HTTP client.
    ///
    /// Wraps reqwest errors: connection timeouts, DNS resolution failures,
    /// TLS certificate problems and the like.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response shape errors detected above the codec.
    ///
    /// Used when a body decodes as JSON but does not carry the expected
    /// structure, such as a missing payload field.
    #[error("Parse error: {0}")]
    Parse(String),

    /// JSON decode failures from the codec layer.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend throttled the request and retries were exhausted.
    ///
    /// `retry_after` is taken from the `Retry-After` header when the
    /// backend provides one.
    #[error("Rate limited, retry after {retry_after:?} seconds")]
    RateLimit { retry_after: Option<u64> },
}

impl Error {
    /// Creates an [`Error::InvalidArgument`] with the given message.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Creates an [`Error::Http`] carrying the raw status text.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dexcat::error::Error;
    ///
    /// let error = Error::http("503 Service Unavailable");
    /// ```
    pub fn http(msg: impl Into<String>) -> Self {
        Error::Http(msg.into())
    }

    /// Creates an [`Error::Parse`] with the given message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dexcat::error::Error;
    ///
    /// let error = Error::parse("missing external pointer payload");
    /// ```
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// Creates an [`Error::RateLimit`] with an optional retry-after time.
    pub fn rate_limit(retry_after: Option<u64>) -> Self {
        Error::RateLimit { retry_after }
    }
}
