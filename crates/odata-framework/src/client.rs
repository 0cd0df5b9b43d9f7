//! # HTTP Client
//!
//! [`HttpRequestClient`] is the production [`RequestClient`]: a thin adapter over
//! `reqwest::Client`. It is cheap to clone and safe to share across tasks.

use crate::client_trait::RequestClient;
use crate::error::FetchError;
use crate::request::{ApiRequest, ApiResponse, Method};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use std::time::Duration;
use tracing::debug;

/// `reqwest`-backed request client.
#[derive(Clone)]
pub struct HttpRequestClient {
    http: reqwest::Client,
}

impl HttpRequestClient {
    /// Builds a client that asks for JSON and gives up on a request after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| FetchError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { http })
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl RequestClient for HttpRequestClient {
    #[tracing::instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn request(&self, request: ApiRequest) -> Result<ApiResponse, FetchError> {
        let mut builder = self
            .http
            .request(to_reqwest(request.method), &request.url)
            .query(&request.query);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        // Reading the body consumes the response and hands the connection back.
        let body = response.bytes().await?.to_vec();
        debug!(status, bytes = body.len(), "Response received");

        Ok(ApiResponse { status, body })
    }
}
