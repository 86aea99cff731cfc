//! HTTP response types and wire serialization.

use std::fmt;

/// HTTP status codes with their standard reason phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Ok = 200,
    Created = 201,
    BadRequest = 400,
    NotFound = 404,
    MethodNotAllowed = 405,
    PayloadTooLarge = 413,
    InternalServerError = 500,
}

impl StatusCode {
    /// Get the reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::PayloadTooLarge => "Payload Too Large",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", *self as u16, self.reason_phrase())
    }
}

/// Represents an HTTP response.
///
/// The serialized form is deliberately asymmetric: a response with a body
/// carries exactly a `Content-Type` and a `Content-Length` header, while a
/// response without one is just the status line and the blank line, with no
/// headers at all.
#[derive(Debug, Clone)]
pub struct ResponseMessage {
    /// The HTTP status code
    pub status: StatusCode,
    /// The Content-Type emitted when the body is non-empty
    pub content_type: String,
    /// The response body
    pub body: Vec<u8>,
}

impl ResponseMessage {
    /// Create a new response with the given status code, an empty body, and
    /// the default `text/plain` content type.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            content_type: "text/plain".to_string(),
            body: Vec::new(),
        }
    }

    /// Set the response body from a string.
    pub fn with_body_string(mut self, body: impl Into<String>) -> Self {
        self.body = body.into().into_bytes();
        self
    }

    /// Set the response body from bytes.
    pub fn with_body_bytes(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Set the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Convert the response to wire bytes.
    ///
    /// `Content-Length` is the exact byte length of the body, not its
    /// character count.
    pub fn to_bytes(&self) -> Vec<u8> {
        let status_line = format!("HTTP/1.1 {status}\r\n", status = self.status);

        if self.body.is_empty() {
            return format!("{status_line}\r\n").into_bytes();
        }

        let mut bytes = Vec::with_capacity(status_line.len() + self.body.len() + 64);
        bytes.extend_from_slice(status_line.as_bytes());
        bytes.extend_from_slice(
            format!(
                "Content-Type: {ctype}\r\nContent-Length: {len}\r\n\r\n",
                ctype = self.content_type,
                len = self.body.len()
            )
            .as_bytes(),
        );
        bytes.extend_from_slice(&self.body);
        bytes
    }
}
