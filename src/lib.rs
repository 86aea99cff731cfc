//! A minimal HTTP/1.1 file server.
//!
//! This crate implements a small educational HTTP server: one request per
//! connection, a handful of hardcoded routes (root page, echo, user-agent
//! reflection, file read/write), and a close after every response.
//!
//! # Features
//!
//! - Parse HTTP requests from byte slices into a typed record
//! - Exact wire-format response building with byte-accurate `Content-Length`
//! - Fixed routing: `/`, `/echo/<text>`, `/user-agent`, `/files/<name>`
//! - File-backed byte store for uploads and downloads
//! - One async task per connection, graceful Ctrl+C shutdown
//! - Proper error handling with descriptive error messages
//!
//! # Examples
//!
//! ## Parsing a request
//!
//! ```
//! use minihttp_rs::parse_request;
//!
//! let request_bytes = b"GET /echo/hello HTTP/1.1\r\nHost: example.com\r\n\r\n";
//!
//! match parse_request(request_bytes) {
//!     Ok(request) => {
//!         println!("Method: {}", request.method);
//!         println!("Path: {}", request.path);
//!         println!("Headers: {:?}", request.headers);
//!     },
//!     Err(err) => {
//!         println!("Error parsing request: {}", err);
//!     }
//! }
//! ```
//!
//! ## Building a response
//!
//! ```
//! use minihttp_rs::{ResponseMessage, StatusCode};
//!
//! let response = ResponseMessage::new(StatusCode::Ok).with_body_string("hello");
//! let wire = response.to_bytes();
//! assert!(wire.starts_with(b"HTTP/1.1 200 OK\r\n"));
//! ```
//!
//! ## Running a server
//!
//! ```no_run
//! use minihttp_rs::{HttpServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let server = HttpServer::new(ServerConfig::default());
//!     if let Err(err) = server.start().await {
//!         eprintln!("Server error: {err}");
//!     }
//! }
//! ```

// Export the parser module
pub mod parser;

// Export the server module
pub mod server;

// Re-export commonly used items for convenience
pub use parser::{Error as ParserError, ParsedRequest, parse_request};
pub use server::{
    Error as ServerError, FileStore, HttpServer, ResponseMessage, ServerConfig, StatusCode,
    StoreError, route_request,
};
