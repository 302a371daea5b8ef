use std::io::Read;

use flate2::read::GzDecoder;
use tempfile::TempDir;
use tinyhttp::config::Config;
use tinyhttp::http::request::{Method, Request, RequestBuilder};
use tinyhttp::http::response::{Response, StatusCode};
use tinyhttp::routing::Handlers;

fn handlers_for(dir: &TempDir) -> Handlers {
    let mut cfg = Config::default();
    cfg.set_directory(dir.path());
    Handlers::new(&cfg)
}

fn get(path: &str) -> Request {
    RequestBuilder::new().method(Method::GET).path(path).build().unwrap()
}

fn post(path: &str, body: &'static [u8]) -> Request {
    RequestBuilder::new()
        .method(Method::POST)
        .path(path)
        .body(body)
        .build()
        .unwrap()
}

fn gunzip(data: &[u8]) -> String {
    let mut decoded = String::new();
    GzDecoder::new(data).read_to_string(&mut decoded).unwrap();
    decoded
}

#[tokio::test]
async fn test_root_is_empty_ok() {
    let handlers = Handlers::new(&Config::default());

    assert_eq!(handlers.handle(&get("/")).await, Response::ok());
}

#[tokio::test]
async fn test_echo_plain() {
    let handlers = Handlers::new(&Config::default());

    let resp = handlers.handle(&get("/echo/abc")).await;

    assert_eq!(resp.status, StatusCode::Ok);
    assert_eq!(resp.content_type.as_deref(), Some("text/plain"));
    assert_eq!(resp.content_encoding, None);
    assert_eq!(resp.body.as_deref(), Some(&b"abc"[..]));
}

#[tokio::test]
async fn test_echo_gzip() {
    let handlers = Handlers::new(&Config::default());
    let req = RequestBuilder::new()
        .method(Method::GET)
        .path("/echo/abc")
        .header("Accept-Encoding", "br, gzip")
        .build()
        .unwrap();

    let resp = handlers.handle(&req).await;

    assert_eq!(resp.status, StatusCode::Ok);
    assert_eq!(resp.content_encoding.as_deref(), Some("gzip"));
    assert_eq!(gunzip(resp.body.as_deref().unwrap()), "abc");
}

#[tokio::test]
async fn test_echo_unsupported_encoding_is_plain() {
    let handlers = Handlers::new(&Config::default());
    let req = RequestBuilder::new()
        .method(Method::GET)
        .path("/echo/abc")
        .header("Accept-Encoding", "invalid-encoding")
        .build()
        .unwrap();

    let resp = handlers.handle(&req).await;

    assert_eq!(resp.content_encoding, None);
    assert_eq!(resp.body.as_deref(), Some(&b"abc"[..]));
}

#[tokio::test]
async fn test_user_agent() {
    let handlers = Handlers::new(&Config::default());
    let req = RequestBuilder::new()
        .method(Method::GET)
        .path("/user-agent")
        .header("User-Agent", "test-client/1.0")
        .build()
        .unwrap();

    let resp = handlers.handle(&req).await;

    assert_eq!(resp, Response::text("test-client/1.0"));
}

#[tokio::test]
async fn test_user_agent_missing_is_empty_body() {
    let handlers = Handlers::new(&Config::default());

    let resp = handlers.handle(&get("/user-agent")).await;

    assert_eq!(resp, Response::text(""));
}

#[tokio::test]
async fn test_user_agent_gzip() {
    let handlers = Handlers::new(&Config::default());
    let req = RequestBuilder::new()
        .method(Method::GET)
        .path("/user-agent")
        .header("User-Agent", "agent/2")
        .header("Accept-Encoding", "gzip")
        .build()
        .unwrap();

    let resp = handlers.handle(&req).await;

    assert_eq!(resp.content_encoding.as_deref(), Some("gzip"));
    assert_eq!(gunzip(resp.body.as_deref().unwrap()), "agent/2");
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let handlers = Handlers::new(&Config::default());

    assert_eq!(handlers.handle(&get("/does-not-exist")).await, Response::not_found());
}

#[tokio::test]
async fn test_files_without_directory_are_not_found() {
    let handlers = Handlers::new(&Config::default());

    assert_eq!(handlers.handle(&get("/files/a")).await, Response::not_found());
    assert_eq!(
        handlers.handle(&post("/files/a", b"x")).await,
        Response::not_found()
    );
}

#[tokio::test]
async fn test_file_post_then_get() {
    let dir = TempDir::new().unwrap();
    let handlers = handlers_for(&dir);

    let created = handlers.handle(&post("/files/note.txt", b"hello")).await;
    assert_eq!(created, Response::created());
    assert_eq!(std::fs::read(dir.path().join("note.txt")).unwrap(), b"hello");

    let read = handlers.handle(&get("/files/note.txt")).await;
    assert_eq!(read, Response::octet_stream("hello"));
}

#[tokio::test]
async fn test_file_post_overwrites() {
    let dir = TempDir::new().unwrap();
    let handlers = handlers_for(&dir);

    handlers.handle(&post("/files/note.txt", b"first version")).await;
    handlers.handle(&post("/files/note.txt", b"second")).await;

    let read = handlers.handle(&get("/files/note.txt")).await;
    assert_eq!(read.body.as_deref(), Some(&b"second"[..]));
}

#[tokio::test]
async fn test_file_get_is_repeatable() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("data.bin"), [1u8, 2, 3, 0, 255]).unwrap();
    let handlers = handlers_for(&dir);

    let first = handlers.handle(&get("/files/data.bin")).await;
    let second = handlers.handle(&get("/files/data.bin")).await;

    assert_eq!(first.status, StatusCode::Ok);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_file_get_missing_is_not_found() {
    let dir = TempDir::new().unwrap();
    let handlers = handlers_for(&dir);

    assert_eq!(handlers.handle(&get("/files/nope")).await, Response::not_found());
}

#[tokio::test]
async fn test_file_traversal_is_not_found() {
    let parent = TempDir::new().unwrap();
    std::fs::write(parent.path().join("secret"), b"top secret").unwrap();
    let root = parent.path().join("public");
    std::fs::create_dir(&root).unwrap();

    let mut cfg = Config::default();
    cfg.set_directory(&root);
    let handlers = Handlers::new(&cfg);

    assert_eq!(handlers.handle(&get("/files/../secret")).await, Response::not_found());
    assert_eq!(handlers.handle(&get("/files/..%2fsecret")).await, Response::not_found());
    assert_eq!(
        handlers.handle(&post("/files/../escaped", b"x")).await,
        Response::not_found()
    );
    assert!(!parent.path().join("escaped").exists());
}

#[tokio::test]
async fn test_file_write_failure_is_not_found() {
    let dir = TempDir::new().unwrap();
    let handlers = handlers_for(&dir);

    // Parent directory does not exist
    let resp = handlers.handle(&post("/files/missing/dir/note.txt", b"x")).await;

    assert_eq!(resp, Response::not_found());
}

#[tokio::test]
async fn test_wrong_method_is_not_found_by_default() {
    let handlers = Handlers::new(&Config::default());

    assert_eq!(handlers.handle(&post("/echo/abc", b"")).await, Response::not_found());
}

#[tokio::test]
async fn test_wrong_method_is_405_when_strict() {
    let cfg = Config {
        strict_method_status: true,
        ..Config::default()
    };
    let handlers = Handlers::new(&cfg);

    assert_eq!(
        handlers.handle(&post("/echo/abc", b"")).await,
        Response::method_not_allowed()
    );
    assert_eq!(handlers.handle(&post("/nowhere", b"")).await, Response::not_found());
}
