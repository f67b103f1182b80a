//! Captured HTTP responses.
//!
//! An [`HttpResponseCapture`] is the value an assertion inspects: the status
//! code and the body text of a request that has already completed. The HTTP
//! client that produced it is not part of this crate; adapters are provided
//! for the `http` crate's response type, which covers the common Rust clients
//! and in-process test servers.

use serde::{Deserialize, Serialize};

/// A completed HTTP response under test.
///
/// Captures are immutable once built. Assertions only ever borrow them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponseCapture {
    status_code: u16,
    body: String,
}

impl HttpResponseCapture {
    /// Creates a capture from a status code and body text.
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }

    /// Creates a capture from raw body bytes.
    ///
    /// Invalid UTF-8 sequences are replaced, so a binary body still reaches the
    /// decode step and is reported as malformed there.
    pub fn from_bytes(status_code: u16, body: &[u8]) -> Self {
        Self {
            status_code,
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }

    /// Returns the HTTP status code.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Returns the body text.
    pub fn body(&self) -> &str {
        &self.body
    }
}

impl<B> From<http::Response<B>> for HttpResponseCapture
where
    B: AsRef<[u8]>,
{
    fn from(response: http::Response<B>) -> Self {
        let status = response.status().as_u16();
        Self::from_bytes(status, response.body().as_ref())
    }
}

impl<B> From<&http::Response<B>> for HttpResponseCapture
where
    B: AsRef<[u8]>,
{
    fn from(response: &http::Response<B>) -> Self {
        Self::from_bytes(response.status().as_u16(), response.body().as_ref())
    }
}
