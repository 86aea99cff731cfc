//! Error types for the HTTP server.

use thiserror::Error;

use crate::parser::Error as ParserError;

/// Errors that can occur while serving a connection.
///
/// Every variant is terminal to the single request it occurs in; none of them
/// is fatal to the listening process.
#[derive(Debug, Error)]
pub enum Error {
    /// Error parsing an HTTP request.
    #[error("Parse error: {0}")]
    Parse(#[from] ParserError),

    /// I/O error on the connection.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The request exceeded the configured maximum size.
    #[error("Request too large: {0} bytes")]
    RequestTooLarge(usize),
}
