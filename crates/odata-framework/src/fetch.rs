//! # Fetch Step
//!
//! This module defines the [`Fetcher`], which performs a single request/decode
//! round-trip for a typed entity set and reports the outcome.
//!
//! ## Operations
//!
//! * **fetch**:
//!     1. Sends the request through the shared [`RequestClient`].
//!     2. Turns a non-success status into [`FetchError::Transport`].
//!     3. Decodes the body with [`decode_collection`] into `Vec<T>`.
//!
//! * **step**:
//!     1. Runs `fetch`.
//!     2. Records exactly one [`LogEntry`] with the outcome.
//!     3. Returns `Some(records)` on success and `None` on failure, so the caller
//!        can stop its chain with `?`.

use crate::client_trait::RequestClient;
use crate::entity::{decode_collection, ODataEntity};
use crate::error::{FetchError, FetchResult};
use crate::log::{FetchLogger, LogEntry, Outcome};
use crate::request::ApiRequest;
use std::sync::Arc;
use tracing::debug;

const ERROR_BODY_SNIPPET: usize = 200;

/// Dependency bundle for fetch steps: the request client and the logger.
///
/// Cloning is cheap (two `Arc`s), so every concurrently running branch gets its
/// own handle to the same client and logger.
#[derive(Clone)]
pub struct Fetcher {
    client: Arc<dyn RequestClient>,
    logger: Arc<dyn FetchLogger>,
}

impl Fetcher {
    pub fn new(client: Arc<dyn RequestClient>, logger: Arc<dyn FetchLogger>) -> Self {
        Self { client, logger }
    }

    /// Performs one request and decodes the response into records of shape `T`.
    pub async fn fetch<T: ODataEntity>(&self, request: ApiRequest) -> FetchResult<T> {
        debug!(entity_set = T::ENTITY_SET, url = %request.url, filter = ?request.filter(), "Fetch");
        let response = self.client.request(request).await?;

        if !response.is_success() {
            let body = String::from_utf8_lossy(&response.body);
            return Err(FetchError::Transport(format!(
                "HTTP {}: {}",
                response.status,
                body.chars().take(ERROR_BODY_SNIPPET).collect::<String>()
            )));
        }

        decode_collection(&response.body)
    }

    /// Runs [`fetch`](Self::fetch), logs the outcome and converts a failure into `None`.
    pub async fn step<T: ODataEntity>(&self, request: ApiRequest) -> Option<Vec<T>> {
        let url = request.url.clone();
        let result = self.fetch::<T>(request).await;

        let outcome = match &result {
            Ok(records) => Outcome::Fetched {
                records: records.len(),
                payload: format!("{records:?}"),
            },
            Err(e) => Outcome::Failed(e.clone()),
        };
        self.logger.record(LogEntry {
            entity_set: T::ENTITY_SET,
            url,
            outcome,
        });

        result.ok()
    }
}
