//! # Mock Framework & Testing Guide
//!
//! Test doubles for the two seams of the framework: [`RequestClient`] and
//! [`FetchLogger`]. They let you exercise fetch chains without a network.
//!
//! ## When to use which double
//!
//! | Double | Answers requests | Use Case |
//! |--------|------------------|----------|
//! | [`MockRequestClient`] | Immediately, from expectations | Chain logic, call counting, error injection |
//! | [`channel_client`] | When the test decides | Holding one request while others complete |
//! | [`MemoryLogger`] | n/a | Asserting on log entries |
//!
//! ## Pattern 0: Expectations (Pure Mock)
//!
//! Expectations are matched by URL (and filter, when given), not by arrival
//! order, because concurrently running branches issue requests in any order.
//!
//! ```rust
//! use odata_framework::mock::{MemoryLogger, MockRequestClient};
//! use odata_framework::{ApiRequest, Fetcher, ODataEntity};
//! use serde::Deserialize;
//! use std::sync::Arc;
//!
//! #[derive(Debug, Deserialize)]
//! #[serde(rename_all = "PascalCase")]
//! struct Plant { plant: String }
//! impl ODataEntity for Plant { const ENTITY_SET: &'static str = "A_Plant"; }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockRequestClient::new();
//!     mock.expect_get("http://host/A_Plant")
//!         .with_filter("Plant eq '1010'")
//!         .return_body(r#"{"d":{"results":[{"Plant":"1010"}]}}"#);
//!
//!     let logger = Arc::new(MemoryLogger::new());
//!     let fetcher = Fetcher::new(Arc::new(mock.clone()), logger.clone());
//!
//!     let request = ApiRequest::get("http://host/A_Plant").with_filter("Plant eq '1010'");
//!     let plants = fetcher.step::<Plant>(request).await.unwrap();
//!
//!     assert_eq!(plants[0].plant, "1010");
//!     assert_eq!(logger.len(), 1);
//!     mock.verify();
//! }
//! ```
//!
//! ## Pattern 1: Manual responses
//!
//! ```rust
//! use odata_framework::mock::{channel_client, expect_request};
//! use odata_framework::{ApiRequest, ApiResponse, RequestClient};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (client, mut receiver) = channel_client(8);
//!     let call = tokio::spawn(async move { client.request(ApiRequest::get("http://host/x")).await });
//!
//!     let pending = expect_request(&mut receiver).await.unwrap();
//!     assert_eq!(pending.request.url, "http://host/x");
//!     pending.respond_to.send(Ok(ApiResponse::ok("{}"))).unwrap();
//!
//!     assert!(call.await.unwrap().is_ok());
//! }
//! ```

use crate::client_trait::RequestClient;
use crate::error::FetchError;
use crate::log::{FetchLogger, LogEntry};
use crate::request::{ApiRequest, ApiResponse, Method};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

struct Expectation {
    method: Method,
    url: String,
    filter: Option<String>,
    response: Result<ApiResponse, FetchError>,
}

impl Expectation {
    fn matches(&self, request: &ApiRequest) -> bool {
        self.method == request.method
            && self.url == request.url
            && self
                .filter
                .as_deref()
                .map_or(true, |f| request.filter() == Some(f))
    }
}

#[derive(Default)]
struct MockState {
    expectations: Vec<Expectation>,
    calls: Vec<ApiRequest>,
    unexpected: Vec<ApiRequest>,
}

/// A request client with expectation tracking and call recording.
///
/// Clones share state, so a test can keep one handle for assertions and give
/// another to the code under test.
///
/// A request that matches no expectation is answered with
/// [`FetchError::Transport`] and remembered; [`verify`](Self::verify) then fails.
#[derive(Clone, Default)]
pub struct MockRequestClient {
    state: Arc<Mutex<MockState>>,
}

impl MockRequestClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a `GET` on exactly `url`.
    pub fn expect_get(&self, url: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            method: Method::Get,
            url: url.into(),
            filter: None,
            state: self.state.clone(),
        }
    }

    /// Every request received so far, in arrival order.
    pub fn calls(&self) -> Vec<ApiRequest> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }

    /// Number of requests whose URL contains `fragment`.
    pub fn calls_to(&self, fragment: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|r| r.url.contains(fragment))
            .count()
    }

    /// Verifies that all expectations were met and nothing unexpected arrived.
    pub fn verify(&self) {
        let state = self.state.lock().unwrap();
        if !state.unexpected.is_empty() {
            panic!("Unexpected requests: {:?}", state.unexpected);
        }
        if !state.expectations.is_empty() {
            let pending: Vec<_> = state.expectations.iter().map(|e| &e.url).collect();
            panic!(
                "Not all expectations were met. {} remaining: {:?}",
                pending.len(),
                pending
            );
        }
    }
}

#[async_trait]
impl RequestClient for MockRequestClient {
    async fn request(&self, request: ApiRequest) -> Result<ApiResponse, FetchError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(request.clone());

        match state.expectations.iter().position(|e| e.matches(&request)) {
            Some(index) => state.expectations.remove(index).response,
            None => {
                let message = format!("unexpected request: {} {}", request.method, request.url);
                state.unexpected.push(request);
                Err(FetchError::Transport(message))
            }
        }
    }
}

/// Builder for a single expectation.
pub struct ExpectationBuilder {
    method: Method,
    url: String,
    filter: Option<String>,
    state: Arc<Mutex<MockState>>,
}

impl ExpectationBuilder {
    /// Only match requests whose `$filter` equals `filter`.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Answer with `200 OK` and `body`.
    pub fn return_body(self, body: impl Into<Vec<u8>>) {
        self.return_response(ApiResponse::ok(body));
    }

    /// Answer with an arbitrary status and body.
    pub fn return_status(self, status: u16, body: impl Into<Vec<u8>>) {
        self.return_response(ApiResponse::new(status, body));
    }

    pub fn return_response(self, response: ApiResponse) {
        self.push(Ok(response));
    }

    /// Fail the request with `error`.
    pub fn return_err(self, error: FetchError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<ApiResponse, FetchError>) {
        let mut state = self.state.lock().unwrap();
        state.expectations.push(Expectation {
            method: self.method,
            url: self.url,
            filter: self.filter,
            response,
        });
    }
}

// =============================================================================
// MANUAL RESPONSES
// =============================================================================

/// A request waiting for the test to answer it.
pub struct PendingRequest {
    pub request: ApiRequest,
    pub respond_to: oneshot::Sender<Result<ApiResponse, FetchError>>,
}

/// Request client that forwards every request to a channel the test controls.
#[derive(Clone)]
pub struct ChannelClient {
    sender: mpsc::Sender<PendingRequest>,
}

/// Creates a [`ChannelClient`] and the receiver its requests arrive on.
///
/// Dropping a [`PendingRequest`] without answering fails that request with
/// [`FetchError::Transport`].
pub fn channel_client(buffer_size: usize) -> (ChannelClient, mpsc::Receiver<PendingRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ChannelClient { sender }, receiver)
}

/// Waits for the next request sent through a [`ChannelClient`].
pub async fn expect_request(
    receiver: &mut mpsc::Receiver<PendingRequest>,
) -> Option<PendingRequest> {
    receiver.recv().await
}

#[async_trait]
impl RequestClient for ChannelClient {
    async fn request(&self, request: ApiRequest) -> Result<ApiResponse, FetchError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(PendingRequest {
                request,
                respond_to,
            })
            .await
            .map_err(|_| FetchError::Transport("client channel closed".to_string()))?;
        response
            .await
            .map_err(|_| FetchError::Transport("request dropped".to_string()))?
    }
}

// =============================================================================
// LOGGER
// =============================================================================

/// Logger that keeps every entry in memory.
#[derive(Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn failures(&self) -> Vec<LogEntry> {
        self.entries()
            .into_iter()
            .filter(LogEntry::is_failure)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FetchLogger for MemoryLogger {
    fn record(&self, entry: LogEntry) {
        self.entries.lock().unwrap().push(entry);
    }
}
