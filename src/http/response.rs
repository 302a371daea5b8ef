use bytes::Bytes;
use std::fmt;

pub const CONTENT_TYPE_PLAIN: &str = "text/plain";
pub const CONTENT_TYPE_OCTET_STREAM: &str = "application/octet-stream";
pub const ENCODING_GZIP: &str = "gzip";

/// HTTP status codes supported by the server.
///
/// - `Ok` (200): Request successful
/// - `Created` (201): Resource created successfully
/// - `NotFound` (404): Resource not found, also used for most failures
/// - `MethodNotAllowed` (405): Only sent when strict method status is enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 201 Created
    Created,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use tinyhttp::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Created => 201,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}

/// A complete HTTP response ready to be serialized.
///
/// Framing headers are derived from these fields by the writer: a response
/// only carries Content-Type, Content-Encoding and Content-Length when both
/// `content_type` and `body` are set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,
    pub content_type: Option<String>,
    /// Only ever "gzip"
    pub content_encoding: Option<String>,
    /// Body as transmitted, i.e. already compressed when encoded
    pub body: Option<Bytes>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```
/// # use tinyhttp::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .content_type("text/plain")
///     .body("hi")
///     .build();
/// assert_eq!(response.body.as_deref(), Some(&b"hi"[..]));
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    content_type: Option<String>,
    content_encoding: Option<String>,
    body: Option<Bytes>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            content_type: None,
            content_encoding: None,
            body: None,
        }
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn content_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.content_encoding = Some(encoding.into());
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn build(self) -> Response {
        Response {
            status: self.status,
            content_type: self.content_type,
            content_encoding: self.content_encoding,
            body: self.body,
        }
    }
}

impl Response {
    /// 200 OK without a body.
    pub fn ok() -> Self {
        ResponseBuilder::new(StatusCode::Ok).build()
    }

    /// 201 Created without a body.
    pub fn created() -> Self {
        ResponseBuilder::new(StatusCode::Created).build()
    }

    /// 404 Not Found without a body.
    pub fn not_found() -> Self {
        ResponseBuilder::new(StatusCode::NotFound).build()
    }

    /// 405 Method Not Allowed without a body.
    pub fn method_not_allowed() -> Self {
        ResponseBuilder::new(StatusCode::MethodNotAllowed).build()
    }

    /// 200 OK with a `text/plain` body.
    pub fn text(body: impl Into<Bytes>) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .content_type(CONTENT_TYPE_PLAIN)
            .body(body)
            .build()
    }

    /// 200 OK with an `application/octet-stream` body.
    pub fn octet_stream(body: impl Into<Bytes>) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .content_type(CONTENT_TYPE_OCTET_STREAM)
            .body(body)
            .build()
    }

    /// Content type and body to put on the wire. Framing headers and body
    /// bytes are only sent when both are set.
    pub fn payload(&self) -> Option<(&str, &Bytes)> {
        match (&self.content_type, &self.body) {
            (Some(content_type), Some(body)) => Some((content_type.as_str(), body)),
            _ => None,
        }
    }
}
