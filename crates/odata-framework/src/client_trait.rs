//! # RequestClient Trait
//!
//! The seam between fetch steps and the network. Production code uses
//! [`HttpRequestClient`](crate::HttpRequestClient); tests plug in the doubles from
//! [`mock`](crate::mock).
use crate::error::FetchError;
use crate::request::{ApiRequest, ApiResponse};
use async_trait::async_trait;

/// Performs one request and returns the fully read response.
///
/// Implementations are shared by every concurrently running branch, so they
/// must be `Send + Sync` and must not rely on exclusive access.
///
/// # Example
///
/// ```rust
/// use odata_framework::{ApiRequest, ApiResponse, FetchError, RequestClient};
/// use async_trait::async_trait;
///
/// struct Canned;
///
/// #[async_trait]
/// impl RequestClient for Canned {
///     async fn request(&self, _request: ApiRequest) -> Result<ApiResponse, FetchError> {
///         Ok(ApiResponse::ok(r#"{"d":{"results":[]}}"#))
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let response = Canned.request(ApiRequest::get("http://host/Set")).await.unwrap();
///     assert!(response.is_success());
/// }
/// ```
#[async_trait]
pub trait RequestClient: Send + Sync {
    /// Sends `request`.
    ///
    /// Only failures to send or read are errors here; a non-success status is
    /// returned as a normal [`ApiResponse`] and judged by the caller.
    async fn request(&self, request: ApiRequest) -> Result<ApiResponse, FetchError>;
}
