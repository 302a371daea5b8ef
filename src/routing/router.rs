use bytes::Bytes;

use crate::http::request::{Method, Request};

const ECHO_PREFIX: &str = "/echo/";
const FILES_PREFIX: &str = "/files/";
const USER_AGENT_PATH: &str = "/user-agent";

/// Where a request should go. Built per request and dropped once the
/// handler has produced a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    Root,
    /// Text to echo back, taken verbatim from the path
    Echo(String),
    UserAgent,
    FileRead(String),
    FileWrite(String, Bytes),
    NotFound,
    /// Known path, method it does not implement
    MethodNotAllowed,
}

/// Maps a request to its target. First match wins:
/// `/`, `/echo/*`, `/user-agent`, `/files/*`, then everything else.
pub fn route(req: &Request) -> RouteTarget {
    let path = req.path.as_str();

    if path == "/" {
        return match req.method {
            Method::GET => RouteTarget::Root,
            _ => RouteTarget::MethodNotAllowed,
        };
    }

    if let Some(text) = path.strip_prefix(ECHO_PREFIX) {
        return match req.method {
            Method::GET => RouteTarget::Echo(text.to_string()),
            _ => RouteTarget::MethodNotAllowed,
        };
    }

    if path == USER_AGENT_PATH {
        return match req.method {
            Method::GET => RouteTarget::UserAgent,
            _ => RouteTarget::MethodNotAllowed,
        };
    }

    if let Some(name) = path.strip_prefix(FILES_PREFIX) {
        return match req.method {
            Method::GET => RouteTarget::FileRead(name.to_string()),
            Method::POST => RouteTarget::FileWrite(name.to_string(), req.body.clone()),
            Method::Unsupported(_) => RouteTarget::MethodNotAllowed,
        };
    }

    RouteTarget::NotFound
}
