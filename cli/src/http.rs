//! `reqwest` transport for the `/query/` endpoint.

use std::time::Duration;

use chat_core::{Endpoint, HttpReply, QueryError, QueryRequest, QueryTransport};
use reqwest::header::{ACCEPT, ORIGIN};

use crate::CliError;

pub struct ReqwestTransport {
    http: reqwest::Client,
    url: String,
    origin: Option<String>,
}

impl ReqwestTransport {
    /// Build a transport for `endpoint`.
    ///
    /// `timeout` bounds each request at the HTTP client level; `None` leaves
    /// requests unbounded.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidBaseUrl`] when an `Origin` header is requested
    /// but cannot be derived, and [`CliError::Http`] if the client fails to build.
    pub fn new(endpoint: &Endpoint, send_origin: bool, timeout: Option<Duration>) -> Result<Self, CliError> {
        let origin = if send_origin {
            let origin = endpoint
                .origin()
                .ok_or_else(|| CliError::InvalidBaseUrl(endpoint.base_url().to_owned()))?;
            Some(origin)
        } else {
            None
        };

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self { http, url: endpoint.query_url(), origin })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }
}

#[async_trait::async_trait(?Send)]
impl QueryTransport for ReqwestTransport {
    async fn post_query(&self, query: &str) -> Result<HttpReply, QueryError> {
        let mut request = self
            .http
            .post(&self.url)
            .header(ACCEPT, "application/json")
            .json(&QueryRequest { query });
        if let Some(origin) = &self.origin {
            request = request.header(ORIGIN, origin);
        }

        let response = request
            .send()
            .await
            .map_err(|e| QueryError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| QueryError::Transport(e.to_string()))?;

        Ok(HttpReply { status, body })
    }
}
