//! HTTP transport for the `/query/` endpoint.
//!
//! Client-side (csr): real `fetch` calls via `gloo-net`.
//! Native builds: a stub that always reports a transport failure, since the
//! widget only talks to the service from the browser.
//!
//! The browser owns the `Origin` header, so only `Content-Type` and `Accept`
//! are set here.

#![allow(clippy::unused_async)]

use chat_core::{Endpoint, HttpReply, QueryError, QueryTransport};

/// `fetch`-backed transport bound to one query URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlooTransport {
    url: String,
}

impl GlooTransport {
    pub fn new(endpoint: &Endpoint) -> Self {
        Self { url: endpoint.query_url() }
    }
}

#[async_trait::async_trait(?Send)]
impl QueryTransport for GlooTransport {
    async fn post_query(&self, query: &str) -> Result<HttpReply, QueryError> {
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::post(&self.url)
                .header("Accept", "application/json")
                .json(&chat_core::QueryRequest { query })
                .map_err(|e| QueryError::Transport(e.to_string()))?
                .send()
                .await
                .map_err(|e| QueryError::Transport(e.to_string()))?;
            let status = resp.status();
            let body = resp.text().await.map_err(|e| QueryError::Transport(e.to_string()))?;
            Ok(HttpReply { status, body })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = query;
            Err(QueryError::Transport("fetch is only available in the browser".to_owned()))
        }
    }
}
