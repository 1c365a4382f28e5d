//! HTTP transport abstraction layer for Authgate.
//!
//! Provides the [`HttpTransport`] trait that abstracts over whatever
//! actually puts bytes on the network, plus the plain request/response
//! values that cross that seam.
//!
//! The transport knows nothing about status-code meaning. A `409` or a
//! `500` is a perfectly good response here; only "no response at all"
//! (DNS, refused connection, timeout) is a [`TransportError`].
//!
//! # Feature Flags
//!
//! - `reqwest` (default): HTTP transport via `reqwest`

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "reqwest")]
mod reqwest_backend;

pub use error::TransportError;
#[cfg(feature = "reqwest")]
pub use reqwest_backend::ReqwestTransport;

use std::fmt;
use std::sync::Arc;

/// Header carrying the bearer credential.
pub const AUTHORIZATION: &str = "Authorization";

/// Header describing the request body format.
pub const CONTENT_TYPE: &str = "Content-Type";

/// HTTP methods the client issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    /// Returns the method as it appears on the request line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// HttpRequest
// ---------------------------------------------------------------------------

/// One outbound HTTP request.
///
/// Built with the fluent helpers below; consumed by
/// [`HttpTransport::send`].
#[derive(Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Creates a bodiless `GET` request.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Creates a `POST` request carrying an already-encoded JSON body.
    pub fn post_json(url: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers: vec![(CONTENT_TYPE.to_string(), "application/json".to_string())],
            body: Some(body),
        }
    }

    /// Adds a header.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Adds an `Authorization: Bearer <token>` header.
    pub fn bearer(self, token: &str) -> Self {
        self.header(AUTHORIZATION, &format!("Bearer {token}"))
    }

    /// Looks up a header value (case-insensitive name match).
    pub fn header_value(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// Credentials travel in headers and bodies, so neither is printed.
impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header_names: Vec<&str> =
            self.headers.iter().map(|(name, _)| name.as_str()).collect();
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &header_names)
            .field("body_len", &self.body.as_ref().map(Vec::len))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// HttpResponse
// ---------------------------------------------------------------------------

/// A response that was actually received, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response with no headers.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Creates a response with an empty body.
    pub fn empty(status: u16) -> Self {
        Self::new(status, Vec::new())
    }

    /// Looks up a header value (case-insensitive name match).
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

// ---------------------------------------------------------------------------
// HttpTransport
// ---------------------------------------------------------------------------

/// Sends a single HTTP request and waits for its response.
///
/// Implementations make exactly one attempt. Retrying is the caller's
/// decision, never the transport's.
pub trait HttpTransport: Send + Sync + 'static {
    /// Sends `request` and returns whatever response came back.
    ///
    /// # Errors
    /// Returns a [`TransportError`] only when no response was received.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: HttpTransport> HttpTransport for Arc<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_json_sets_content_type() {
        let req = HttpRequest::post_json("http://api/users", b"{}".to_vec());
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.header_value("content-type"), Some("application/json"));
        assert_eq!(req.body.as_deref(), Some(&b"{}"[..]));
    }

    #[test]
    fn test_bearer_adds_authorization_header() {
        let req = HttpRequest::get("http://api/user").bearer("T");
        assert_eq!(req.header_value("authorization"), Some("Bearer T"));
    }

    #[test]
    fn test_debug_hides_header_values_and_body() {
        let req = HttpRequest::post_json("http://api/auth", b"{\"password\":\"hunter2\"}".to_vec())
            .bearer("secret-token");
        let printed = format!("{req:?}");
        assert!(!printed.contains("hunter2"));
        assert!(!printed.contains("secret-token"));
        assert!(printed.contains("Authorization"));
    }

    #[test]
    fn test_response_header_lookup_is_case_insensitive() {
        let mut res = HttpResponse::empty(200);
        res.headers.push(("Content-Type".into(), "application/json".into()));
        assert_eq!(res.header("CONTENT-TYPE"), Some("application/json"));
        assert_eq!(res.header("x-missing"), None);
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.to_string(), "POST");
    }
}
