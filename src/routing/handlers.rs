use std::io;

use bytes::Bytes;
use tracing::{debug, warn};

use crate::config::Config;
use crate::http::compression::gzip_compress;
use crate::http::request::Request;
use crate::http::response::{
    CONTENT_TYPE_PLAIN, ENCODING_GZIP, Response, ResponseBuilder, StatusCode,
};
use crate::routing::router::{RouteTarget, route};
use crate::routing::storage::FileStore;

/// The fixed set of route behaviors.
///
/// Holds only read-only configuration, so one instance is shared by every
/// connection task.
#[derive(Debug, Clone)]
pub struct Handlers {
    files: Option<FileStore>,
    strict_method_status: bool,
}

impl Handlers {
    pub fn new(cfg: &Config) -> Self {
        Self {
            files: cfg.directory.clone().map(FileStore::new),
            strict_method_status: cfg.strict_method_status,
        }
    }

    /// Routes `req` and runs the matching handler.
    pub async fn handle(&self, req: &Request) -> Response {
        let target = route(req);
        debug!(method = ?req.method, path = %req.path, ?target, "Routed request");
        self.dispatch(target, req).await
    }

    pub async fn dispatch(&self, target: RouteTarget, req: &Request) -> Response {
        match target {
            RouteTarget::Root => Response::ok(),
            RouteTarget::Echo(text) => text_response(req, Bytes::from(text)),
            RouteTarget::UserAgent => {
                let agent = req.user_agent().unwrap_or_default().to_string();
                text_response(req, Bytes::from(agent))
            }
            RouteTarget::FileRead(name) => self.read_file(&name).await,
            RouteTarget::FileWrite(name, body) => self.write_file(&name, &body).await,
            RouteTarget::NotFound => Response::not_found(),
            RouteTarget::MethodNotAllowed if self.strict_method_status => {
                Response::method_not_allowed()
            }
            RouteTarget::MethodNotAllowed => Response::not_found(),
        }
    }

    async fn read_file(&self, name: &str) -> Response {
        let Some(files) = &self.files else {
            return Response::not_found();
        };

        match files.read(name).await {
            Ok(content) => Response::octet_stream(content),
            Err(e) => {
                warn!(file = name, error = %e, "File read failed");
                Response::not_found()
            }
        }
    }

    async fn write_file(&self, name: &str, body: &[u8]) -> Response {
        let Some(files) = &self.files else {
            return Response::not_found();
        };

        // Write failures are reported as 404 too
        match files.write(name, body).await {
            Ok(()) => Response::created(),
            Err(e) => {
                warn!(file = name, error = %e, "File write failed");
                Response::not_found()
            }
        }
    }
}

/// 200 `text/plain`, gzip-compressed when the client accepts it.
fn text_response(req: &Request, body: Bytes) -> Response {
    encode_text(req, body, gzip_compress)
}

/// A failed compression falls back to the plain body.
fn encode_text<F>(req: &Request, body: Bytes, compress: F) -> Response
where
    F: FnOnce(&[u8]) -> io::Result<Bytes>,
{
    if req.accepts_encoding(ENCODING_GZIP) {
        match compress(&body) {
            Ok(compressed) => {
                return ResponseBuilder::new(StatusCode::Ok)
                    .content_type(CONTENT_TYPE_PLAIN)
                    .content_encoding(ENCODING_GZIP)
                    .body(compressed)
                    .build();
            }
            Err(e) => warn!(error = %e, "Gzip compression failed, sending plain body"),
        }
    }

    Response::text(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::request::{Method, RequestBuilder};

    fn gzip_request() -> Request {
        RequestBuilder::new()
            .method(Method::GET)
            .path("/echo/abc")
            .header("Accept-Encoding", "gzip")
            .build()
            .unwrap()
    }

    #[test]
    fn test_failed_compression_sends_plain_body() {
        let resp = encode_text(&gzip_request(), Bytes::from_static(b"abc"), |_| {
            Err(io::Error::other("encoder broke"))
        });

        assert_eq!(resp, Response::text("abc"));
        assert!(resp.content_encoding.is_none());
    }

    #[test]
    fn test_compressor_not_called_without_gzip() {
        let req = RequestBuilder::new()
            .method(Method::GET)
            .path("/echo/abc")
            .build()
            .unwrap();

        let resp = encode_text(&req, Bytes::from_static(b"abc"), |_| {
            panic!("compressor called for a client that did not ask for gzip")
        });

        assert_eq!(resp, Response::text("abc"));
    }

    #[test]
    fn test_compressed_body_is_sent_as_is() {
        let resp = encode_text(&gzip_request(), Bytes::from_static(b"abc"), |_| {
            Ok(Bytes::from_static(b"squeezed"))
        });

        assert_eq!(resp.content_encoding.as_deref(), Some("gzip"));
        assert_eq!(resp.body.as_deref(), Some(&b"squeezed"[..]));
    }
}
