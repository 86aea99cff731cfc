//! HTTP request parser module.
//!
//! This module provides functionality for parsing HTTP/1.1 requests with a
//! focus on simplicity and correctness.

mod request;
mod error;


// Re-export public items
pub use request::ParsedRequest;
pub use error::Error;

// Re-export the parse_request function
pub use request::parse_request;
