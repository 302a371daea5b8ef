//! tinyhttp - Minimal HTTP/1.1 server
//!
//! Core library for request parsing, response formatting and routing.

pub mod config;
pub mod http;
pub mod routing;
pub mod server;
