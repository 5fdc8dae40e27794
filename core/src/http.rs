//! Request descriptors for the dispatcher.
//!
//! # Design
//! A call is first described as plain data (`HttpRequest`) and only then
//! handed to the network. Building the descriptor resolves the URL, renders
//! the query string and awaits the header hook, so everything except the
//! exchange itself can be inspected and tested without a server.

use std::fmt;

use url::Url;

use crate::headers::ApiHeaders;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Ordered query parameters.
///
/// Absent values are dropped when they are added, so a parameter the caller
/// did not supply never reaches the query string, not even as `key=`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pairs: Vec<(String, String)>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `key` if `value` is present.
    pub fn opt<V: ToString>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.pairs.push((key.to_string(), value.to_string()));
        }
        self
    }

    /// Add `key` unconditionally.
    pub fn with<V: ToString>(mut self, key: &str, value: V) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// The standard Searchlight query parameters shared by every `query_*` call.
    pub fn searchlight(
        filter: Option<&str>,
        include: Option<&str>,
        order: Option<&str>,
        page_size: Option<u32>,
        page_number: Option<u32>,
    ) -> Self {
        Self::new()
            .opt("filter", filter)
            .opt("include", include)
            .opt("order", order)
            .opt("pageSize", page_size)
            .opt("pageNumber", page_number)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Empty,
    /// Pre-serialized JSON bytes.
    Json(Vec<u8>),
    /// A file sent as the multipart form field `file`.
    File { file_name: String, bytes: Vec<u8> },
}

/// An outgoing request, fully resolved.
///
/// `url` already carries the query string; `headers` is the final header
/// set, after the hook (if any) has run.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: ApiHeaders,
    pub body: RequestBody,
}

/// Raw result of an exchange, before it is wrapped in an envelope.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: bytes::Bytes,
}

/// Resolve `path` against `base` with standard URL-join semantics and append
/// the query parameters.
///
/// The base is parsed on every call, so a malformed base surfaces here as a
/// `ParseError` rather than when the client was configured.
pub fn resolve_url(base: &str, path: &str, query: &QueryOptions) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(base)?.join(path)?;
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query.pairs());
    }
    Ok(url)
}
