//! # OData Framework
//!
//! Building blocks for reading entity sets from an OData v2 service and chaining
//! reads along the relation links embedded in each response.
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into three layers:
//!
//! 1. **Shape Layer** ([`ODataEntity`], [`decode_collection`]) - what a record looks like
//!    and which entity set it comes from
//! 2. **Step Layer** ([`Fetcher`]) - one request/decode round-trip, logged exactly once
//! 3. **Transport Layer** ([`RequestClient`], [`HttpRequestClient`]) - the network
//!
//! Callers write their chain logic once against [`Fetcher`]; swapping the
//! [`RequestClient`] or [`FetchLogger`] is how tests take over the network and
//! the log.
//!
//! ## Example
//!
//! ```rust
//! use odata_framework::{ApiRequest, Fetcher, ODataEntity, TracingLogger};
//! use odata_framework::mock::MockRequestClient;
//! use serde::Deserialize;
//! use std::sync::Arc;
//!
//! #[derive(Debug, Deserialize)]
//! #[serde(rename_all = "PascalCase")]
//! struct Supplier { supplier: String }
//!
//! impl ODataEntity for Supplier {
//!     const ENTITY_SET: &'static str = "A_Supplier";
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockRequestClient::new();
//!     mock.expect_get("http://host/A_Supplier")
//!         .return_body(r#"{"d":{"results":[{"Supplier":"17300001"}]}}"#);
//!
//!     let fetcher = Fetcher::new(Arc::new(mock), Arc::new(TracingLogger));
//!     let suppliers = fetcher
//!         .step::<Supplier>(ApiRequest::get("http://host/A_Supplier"))
//!         .await
//!         .unwrap_or_default();
//!     assert_eq!(suppliers[0].supplier, "17300001");
//! }
//! ```
//!
//! ## Errors
//!
//! A fetch step fails with [`FetchError::Transport`] or [`FetchError::Decode`].
//! [`Fetcher::step`] records the failure and returns `None`; nothing is propagated.
//!
//! ## Testing
//!
//! See the [`mock`] module for request client and logger doubles.

pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod fetch;
pub mod log;
pub mod mock;
pub mod request;
pub mod tracing;

// Re-export core types for convenience
pub use client::HttpRequestClient;
pub use client_trait::RequestClient;
pub use entity::{decode_collection, ODataEntity};
pub use error::{FetchError, FetchResult};
pub use fetch::Fetcher;
pub use log::{FetchLogger, LogEntry, Outcome, TracingLogger};
pub use request::{ApiRequest, ApiResponse, Method, FILTER_PARAM};
