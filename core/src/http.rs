//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. `CardcastClient` builds
//! `HttpRequest` values and parses `HttpResponse` values without touching the
//! network; a `Transport` (blocking) or `AsyncTransport` (non-blocking)
//! performs the round-trip. The two backends differ only in which of these
//! traits they are generic over.
//!
//! Every request the API needs is a GET, so no method is carried.

use std::fmt;

/// A GET request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    /// Query parameters, not yet percent-encoded. Unset filters never appear.
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    /// Filled by the bundled transports for callers driving a `Transport`
    /// directly; `CardcastClient` never reads them.
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// The request never produced a status: connection refused, unreadable
/// body, and the like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError(pub String);

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transport failure: {}", self.0)
    }
}

impl std::error::Error for TransportError {}

/// Performs a request on the calling thread.
///
/// Non-2xx statuses must be returned as `Ok`; interpreting them is the
/// client's job.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Performs a request, suspending until the response arrives.
#[allow(async_fn_in_trait)]
pub trait AsyncTransport {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

impl<T: AsyncTransport + ?Sized> AsyncTransport for &T {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request).await
    }
}
