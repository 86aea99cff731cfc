//! HTTP server implementation for minihttp-rs.
//!
//! This module provides a simple HTTP server that parses one request per
//! connection, dispatches it to a fixed set of routes, and closes the
//! connection after writing the response.

mod response;
mod config;
mod error;
mod store;
mod router;
mod http_server;

#[cfg(test)]
mod tests;

// Re-export public items
pub use response::{ResponseMessage, StatusCode};
pub use config::ServerConfig;
pub use error::Error;
pub use store::{FileStore, StoreError};
pub use router::route_request;
pub use http_server::HttpServer;
