use bytes::Bytes;
use std::collections::HashMap;

pub const HEADER_CONTENT_LENGTH: &str = "content-length";
pub const HEADER_USER_AGENT: &str = "user-agent";
pub const HEADER_ACCEPT_ENCODING: &str = "accept-encoding";

/// HTTP request methods.
///
/// Only GET and POST are served. Anything else is kept verbatim as
/// `Unsupported` so routing can decide how to answer it; an unknown method
/// is never a parse failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    /// Any other method token, as received
    Unsupported(String),
}

/// Represents a parsed HTTP request from a client.
///
/// Header names are always stored lower-cased and values trimmed, so
/// lookups through [`Request::header`] are case-insensitive.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The raw request path, not percent-decoded (e.g. "/echo/abc")
    pub path: String,
    /// Third token of the request line, empty when absent. Never validated.
    pub version: String,
    /// Request headers keyed by lower-case name
    pub headers: HashMap<String, String>,
    /// Request body, exactly Content-Length bytes
    pub body: Bytes,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Option<Method>,
    path: Option<String>,
    headers: HashMap<String, String>,
    body: Bytes,
}

impl From<&str> for Method {
    /// Parses an HTTP method token (case-sensitive).
    ///
    /// ```
    /// # use tinyhttp::http::request::Method;
    /// assert_eq!(Method::from("GET"), Method::GET);
    /// assert_eq!(Method::from("get"), Method::Unsupported("get".to_string()));
    /// ```
    fn from(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "POST" => Method::POST,
            other => Method::Unsupported(other.to_string()),
        }
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            path: None,
            headers: HashMap::new(),
            body: Bytes::new(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Names are lower-cased on insert, matching what the parser produces.
    pub fn header(mut self, key: &str, value: impl Into<String>) -> Self {
        self.headers.insert(key.to_ascii_lowercase(), value.into());
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        Ok(Request {
            method: self.method.ok_or("method missing")?,
            path: self.path.ok_or("path missing")?,
            version: "HTTP/1.1".to_string(),
            headers: self.headers,
            body: self.body,
        })
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Request {
    /// Retrieves a header value by name, ignoring ASCII case.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&key.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.header(HEADER_USER_AGENT)
    }

    /// Checks whether `encoding` is one of the comma-separated entries of
    /// the Accept-Encoding header. Entries are trimmed and compared exactly;
    /// quality parameters are not interpreted.
    pub fn accepts_encoding(&self, encoding: &str) -> bool {
        self.header(HEADER_ACCEPT_ENCODING)
            .map(|v| v.split(',').any(|e| e.trim() == encoding))
            .unwrap_or(false)
    }
}
