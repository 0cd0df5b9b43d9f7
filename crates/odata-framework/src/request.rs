//! # Requests and Responses
//!
//! Plain data types exchanged between a fetch step and a [`RequestClient`](crate::RequestClient).
//! Keeping them free of any HTTP library types lets tests answer requests with
//! canned bodies and lets the production client stay a thin adapter.

use std::fmt;

/// HTTP method of an outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query parameter carrying an OData filter predicate.
pub const FILTER_PARAM: &str = "$filter";

/// A request as seen by a [`RequestClient`](crate::RequestClient).
///
/// Query parameters keep their insertion order; the client is responsible for
/// URL-encoding them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: Option<String>,
}

impl ApiRequest {
    /// A `GET` request for `url` with no query parameters.
    ///
    /// This is the shape used when following a relation link, whose URL already
    /// carries everything the server needs.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Shorthand for `with_query("$filter", predicate)`.
    pub fn with_filter(self, predicate: impl Into<String>) -> Self {
        self.with_query(FILTER_PARAM, predicate)
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// The value of the `$filter` parameter, if any.
    pub fn filter(&self) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == FILTER_PARAM)
            .map(|(_, v)| v.as_str())
    }
}

/// A fully read response. The body is owned, so the underlying connection has
/// already been released by the time a caller sees this value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// A `200 OK` response with the given body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
