//! Wire contract for the book assistant `/query/` endpoint.
//!
//! DESIGN
//! ======
//! Transports only move bytes: they return the raw HTTP status and body as an
//! [`HttpReply`]. Deciding whether that reply is a usable answer happens once,
//! in [`classify_reply`], so the browser and terminal clients agree on every
//! failure case.

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;

use serde::{Deserialize, Serialize};

/// Path appended to the service base URL for every query.
pub const QUERY_PATH: &str = "/query/";

/// Payload `status` value that marks a usable answer.
pub const SUCCESS_STATUS: &str = "success";

// =============================================================================
// ERROR
// =============================================================================

/// Why a query round trip did not produce an answer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The request never produced an HTTP response (network, DNS, CORS).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The service answered with a non-2xx status.
    #[error("HTTP error status {status}")]
    Http { status: u16 },

    /// The service answered 2xx but the payload reports a failure.
    #[error("query rejected with status `{status}`: {error}")]
    Application { status: String, error: String },

    /// The body was not the expected JSON object.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl QueryError {
    /// Stable short code used in diagnostic logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "E_TRANSPORT",
            Self::Http { .. } => "E_HTTP_STATUS",
            Self::Application { .. } => "E_APPLICATION",
            Self::Malformed(_) => "E_MALFORMED",
        }
    }
}

// =============================================================================
// ENDPOINT
// =============================================================================

/// Normalised service location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base_url: String,
}

impl Endpoint {
    /// Build an endpoint from a base URL.
    ///
    /// Trailing slashes are dropped, and a base URL that already ends in the
    /// query path is accepted as-is so `https://host/query/` and
    /// `https://host` address the same endpoint.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = trimmed
            .strip_suffix(QUERY_PATH.trim_end_matches('/'))
            .unwrap_or(trimmed)
            .to_owned();
        Self { base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL the query is posted to.
    #[must_use]
    pub fn query_url(&self) -> String {
        format!("{}{QUERY_PATH}", self.base_url)
    }

    /// `scheme://host[:port]` of the service, used for the `Origin` header.
    ///
    /// Returns `None` when the base URL has no scheme or host.
    #[must_use]
    pub fn origin(&self) -> Option<String> {
        let (scheme, rest) = self.base_url.split_once("://")?;
        let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
        if scheme.is_empty() || host.is_empty() {
            return None;
        }
        Some(format!("{scheme}://{host}"))
    }
}

// =============================================================================
// DTOS
// =============================================================================

/// Request body: `{ "query": <text> }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QueryRequest<'a> {
    pub query: &'a str,
}

/// Response body as sent by the service.
///
/// Error payloads may omit `response`; a success payload without it is
/// malformed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QueryReply {
    pub status: String,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl QueryReply {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }
}

/// Raw HTTP result handed back by a [`QueryTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    #[must_use]
    pub fn is_http_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Turn a raw reply into the answer text, or the reason there is none.
///
/// The HTTP status is checked before the body is parsed, matching how the
/// hosted widget treats error pages that are not JSON.
///
/// # Errors
///
/// Returns [`QueryError::Http`] for non-2xx statuses, [`QueryError::Malformed`]
/// when the body is not a reply object or a success payload carries no
/// `response`, and [`QueryError::Application`] when the payload status is not
/// `"success"`.
pub fn classify_reply(reply: &HttpReply) -> Result<String, QueryError> {
    if !reply.is_http_success() {
        return Err(QueryError::Http { status: reply.status });
    }

    let parsed: QueryReply =
        serde_json::from_str(&reply.body).map_err(|e| QueryError::Malformed(e.to_string()))?;

    if !parsed.is_success() {
        return Err(QueryError::Application {
            status: parsed.status,
            error: parsed.error.unwrap_or_default(),
        });
    }

    parsed.response.ok_or_else(|| QueryError::Malformed("missing response".to_owned()))
}

// =============================================================================
// TRANSPORT
// =============================================================================

/// Sends one query to the service.
///
/// Futures are not required to be `Send`: the browser transport lives on the
/// single UI thread.
#[async_trait::async_trait(?Send)]
pub trait QueryTransport {
    /// Post `{ "query": query }` and return the raw HTTP reply.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Transport`] when no HTTP response was received.
    async fn post_query(&self, query: &str) -> Result<HttpReply, QueryError>;
}
