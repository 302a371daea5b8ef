//! HTTP/1.1 wire protocol.
//!
//! One request per connection, framed by Content-Length only.
//!
//! # Architecture
//!
//! - **`connection`**: Per-connection state machine driving parse, handle and write
//! - **`parser`**: Reads a request off a buffered byte stream
//! - **`request`**: Request representation and header helpers
//! - **`response`**: Response representation with builder pattern
//! - **`writer`**: Serializes and writes responses to the client
//! - **`compression`**: Gzip encoding for negotiated response bodies
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Parse one request (bounded by the read timeout)
//!        └──────┬──────┘
//!               │ Request parsed          (parse error / timeout → drop, no reply)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Route and run the handler
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!        ┌──────────────────┐
//!        │     Closed       │
//!        └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tinyhttp::config::Config;
//! use tinyhttp::http::connection::Connection;
//! use tinyhttp::routing::Handlers;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:4221").await?;
//!     let handlers = Arc::new(Handlers::new(&Config::default()));
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let handlers = handlers.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, handlers, Duration::from_secs(30));
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod compression;
pub mod connection;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
