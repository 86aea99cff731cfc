//! HTTP request parsing and representation.

use std::collections::HashMap;

use crate::parser::error::Error;

/// Represents a parsed HTTP request.
///
/// Constructed once per connection from the raw request bytes and never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct ParsedRequest {
    /// The HTTP method token, case-preserved (e.g. "GET", "POST")
    pub method: String,
    /// The request path
    pub path: String,
    /// The HTTP headers, names lowercased; a duplicate name overwrites the
    /// earlier value
    pub headers: HashMap<String, String>,
    /// The request body, may be empty
    pub body: String,
}

impl ParsedRequest {
    /// Get a header value by name. Lookup is case-insensitive since header
    /// names are stored lowercased.
    pub fn get_header(&self, name: &str) -> Option<&String> {
        self.headers.get(&name.to_ascii_lowercase())
    }

    /// Check if a header exists.
    pub fn has_header(&self, name: &str) -> bool {
        self.get_header(name).is_some()
    }

    /// The declared `Content-Length`, if present and numeric.
    pub fn content_length(&self) -> Option<usize> {
        self.headers.get("content-length").and_then(|v| v.parse().ok())
    }
}

/// Parse an HTTP request from a byte slice.
///
/// The head is split from the body at the first blank line (`\r\n\r\n`); a
/// request without one is tolerated and gets an empty body. The first head
/// line must carry at least a method and a path; the protocol version token
/// is ignored. Header lines without a `": "` separator are skipped. The body
/// is the entire remainder after the blank line, capped at the declared
/// `Content-Length` when one is present.
///
/// # Arguments
///
/// * `input` - A byte slice containing the HTTP request to parse
///
/// # Returns
///
/// The parsed HTTP request, or an error if the request is invalid
pub fn parse_request(input: &[u8]) -> Result<ParsedRequest, Error> {
    // Convert the input to a string
    let input_str = match std::str::from_utf8(input) {
        Ok(s) => s,
        Err(_) => return Err(Error::MalformedRequestLine("Invalid UTF-8".to_string())),
    };

    if input_str.is_empty() {
        return Err(Error::EmptyRequest);
    }

    // Split head from body at the first blank line
    let (head, raw_body) = match input_str.split_once("\r\n\r\n") {
        Some((head, body)) => (head, body),
        None => (input_str, ""),
    };

    let mut lines = head.split("\r\n");

    // Parse the request line
    let request_line = lines.next().unwrap_or_default();
    let parts: Vec<&str> = request_line.split_whitespace().collect();
    if parts.len() < 2 {
        return Err(Error::MalformedRequestLine(request_line.to_string()));
    }

    let method = parts[0].to_string();
    let path = parts[1].to_string();

    // Parse the headers; names are lowercased, the last duplicate wins
    let mut headers = HashMap::new();
    for line in lines {
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(": ") {
            headers.insert(name.to_ascii_lowercase(), value.to_string());
        }
        // Lines without a ": " separator are ignored
    }

    let mut body = raw_body.to_string();

    // Cap the body at the declared Content-Length, backing off to a char
    // boundary so multi-byte content never splits mid-character
    if let Some(len) = headers.get("content-length").and_then(|v| v.parse::<usize>().ok()) {
        if len < body.len() {
            let mut cut = len;
            while cut > 0 && !body.is_char_boundary(cut) {
                cut -= 1;
            }
            body.truncate(cut);
        }
    }

    Ok(ParsedRequest {
        method,
        path,
        headers,
        body,
    })
}
