//! Request routing and the route handlers.
//!
//! Routing is a pure function from a request to a [`RouteTarget`]; the
//! handlers turn a target into a response, touching the file store only for
//! the `/files/` routes.

pub mod handlers;
pub mod router;
pub mod storage;

pub use handlers::Handlers;
pub use router::{RouteTarget, route};
pub use storage::{FileStore, StorageError};
