//! Tests for the HTTP server implementation.

use std::io::{self, Cursor};
use std::path::PathBuf;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

use crate::server::{
    Error, FileStore, HttpServer, ResponseMessage, StatusCode, StoreError, route_request,
};

// Mock TcpStream for testing
struct MockTcpStream {
    read_data: Cursor<Vec<u8>>,
    write_data: Vec<u8>,
}

impl MockTcpStream {
    fn new(read_data: Vec<u8>) -> Self {
        Self {
            read_data: Cursor::new(read_data),
            write_data: Vec::new(),
        }
    }

    fn written_data(&self) -> &[u8] {
        &self.write_data
    }
}

impl AsyncRead for MockTcpStream {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        let n = std::io::Read::read(&mut this.read_data, buf.initialize_unfilled())?;
        buf.advance(n);
        Poll::Ready(Ok(()))
    }
}

impl AsyncWrite for MockTcpStream {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        this.write_data.extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

/// A file store rooted at a fresh per-test temp directory.
fn temp_store(tag: &str) -> FileStore {
    let root: PathBuf = std::env::temp_dir().join(format!("minihttp-test-{pid}-{tag}", pid = std::process::id()));
    let _ = std::fs::remove_dir_all(&root);
    FileStore::new(root)
}

/// Drive a single connection through the server with a raw request.
async fn serve(request: &[u8], store: &FileStore) -> (Result<(), Error>, Vec<u8>) {
    let mut stream = MockTcpStream::new(request.to_vec());
    let result = HttpServer::handle_connection(&mut stream, store, 8192, 1024 * 1024).await;
    let written = stream.written_data().to_vec();
    (result, written)
}

// --- Response builder ---

#[test]
fn test_response_with_body_wire_format() {
    let response = ResponseMessage::new(StatusCode::Ok).with_body_string("hello");
    assert_eq!(
        response.to_bytes(),
        b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 5\r\n\r\nhello".to_vec()
    );
}

#[test]
fn test_empty_body_response_is_bare_status_line() {
    let response = ResponseMessage::new(StatusCode::NotFound);
    let wire = response.to_bytes();
    assert_eq!(wire, b"HTTP/1.1 404 Not Found\r\n\r\n".to_vec());
    let text = String::from_utf8(wire).unwrap();
    assert!(!text.contains("Content-Type"));
    assert!(!text.contains("Content-Length"));
}

#[test]
fn test_content_length_counts_bytes_not_chars() {
    // "héllo" is 5 chars but 6 bytes on the wire
    let response = ResponseMessage::new(StatusCode::Ok).with_body_string("héllo");
    let text = String::from_utf8(response.to_bytes()).unwrap();
    assert!(text.contains("Content-Length: 6\r\n"));
}

#[test]
fn test_response_custom_content_type() {
    let response = ResponseMessage::new(StatusCode::Ok)
        .with_content_type("application/octet-stream")
        .with_body_bytes(vec![1u8, 2, 3]);
    let wire = response.to_bytes();
    let text = String::from_utf8_lossy(&wire);
    assert!(text.contains("Content-Type: application/octet-stream\r\n"));
    assert!(text.contains("Content-Length: 3\r\n"));
}

#[test]
fn test_status_code_display() {
    assert_eq!(StatusCode::Ok.to_string(), "200 OK");
    assert_eq!(StatusCode::Created.to_string(), "201 Created");
    assert_eq!(StatusCode::MethodNotAllowed.to_string(), "405 Method Not Allowed");
    assert_eq!(StatusCode::InternalServerError.to_string(), "500 Internal Server Error");
}

// --- Routes through a full connection ---

#[tokio::test]
async fn test_get_root() {
    let store = temp_store("root");
    let (result, written) = serve(b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n", &store).await;
    assert!(result.is_ok());
    assert_eq!(written, b"HTTP/1.1 200 OK\r\n\r\n".to_vec());
}

#[tokio::test]
async fn test_echo() {
    let store = temp_store("echo");
    let (result, written) = serve(b"GET /echo/hello HTTP/1.1\r\nHost: localhost\r\n\r\n", &store).await;
    assert!(result.is_ok());
    assert_eq!(
        written,
        b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 5\r\n\r\nhello".to_vec()
    );
}

#[tokio::test]
async fn test_user_agent_reflected() {
    let store = temp_store("ua");
    let (result, written) =
        serve(b"GET /user-agent HTTP/1.1\r\nUser-Agent: curl/8.0\r\n\r\n", &store).await;
    assert!(result.is_ok());
    let text = String::from_utf8(written).unwrap();
    assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(text.ends_with("\r\n\r\ncurl/8.0"));
}

#[tokio::test]
async fn test_user_agent_missing_is_unknown() {
    let store = temp_store("ua-missing");
    let (result, written) = serve(b"GET /user-agent HTTP/1.1\r\nHost: localhost\r\n\r\n", &store).await;
    assert!(result.is_ok());
    let text = String::from_utf8(written).unwrap();
    assert!(text.ends_with("\r\n\r\nUnknown"));
}

#[tokio::test]
async fn test_unmatched_path_is_not_found() {
    let store = temp_store("nope");
    let (result, written) = serve(b"GET /nope HTTP/1.1\r\nHost: localhost\r\n\r\n", &store).await;
    assert!(result.is_ok());
    assert_eq!(written, b"HTTP/1.1 404 Not Found\r\n\r\n".to_vec());
}

#[tokio::test]
async fn test_files_post_then_get_round_trip() {
    let store = temp_store("roundtrip");

    let (result, written) = serve(
        b"POST /files/a.txt HTTP/1.1\r\nContent-Length: 2\r\n\r\nhi",
        &store,
    )
    .await;
    assert!(result.is_ok());
    let text = String::from_utf8(written).unwrap();
    assert!(text.starts_with("HTTP/1.1 201 Created\r\n"));
    assert!(text.ends_with("\r\n\r\nhi"));

    let (result, written) = serve(b"GET /files/a.txt HTTP/1.1\r\nHost: localhost\r\n\r\n", &store).await;
    assert!(result.is_ok());
    assert_eq!(
        written,
        b"HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\nContent-Length: 2\r\n\r\nhi"
            .to_vec()
    );
}

#[tokio::test]
async fn test_files_get_missing_is_not_found() {
    let store = temp_store("missing");
    let (result, written) =
        serve(b"GET /files/missing.txt HTTP/1.1\r\nHost: localhost\r\n\r\n", &store).await;
    assert!(result.is_ok());
    assert_eq!(written, b"HTTP/1.1 404 Not Found\r\n\r\n".to_vec());
}

#[tokio::test]
async fn test_files_other_method_is_not_allowed() {
    let store = temp_store("method");
    let (result, written) =
        serve(b"DELETE /files/a.txt HTTP/1.1\r\nHost: localhost\r\n\r\n", &store).await;
    assert!(result.is_ok());
    assert_eq!(written, b"HTTP/1.1 405 Method Not Allowed\r\n\r\n".to_vec());
}

#[tokio::test]
async fn test_files_post_multiline_body() {
    let store = temp_store("multiline");
    let body = "line one\r\nline two";
    let request = format!(
        "POST /files/notes.txt HTTP/1.1\r\nContent-Length: {len}\r\n\r\n{body}",
        len = body.len()
    );
    let (result, _) = serve(request.as_bytes(), &store).await;
    assert!(result.is_ok());

    let stored = store.read("notes.txt").await.unwrap();
    assert_eq!(stored, body.as_bytes());
}

// --- Connection boundary behavior ---

#[tokio::test]
async fn test_malformed_request_gets_bad_request() {
    let store = temp_store("malformed");
    let (result, written) = serve(b"GET\r\n\r\n", &store).await;
    assert!(matches!(result, Err(Error::Parse(_))));
    let text = String::from_utf8(written).unwrap();
    assert!(text.starts_with("HTTP/1.1 400 Bad Request\r\n"));
}

#[tokio::test]
async fn test_connection_closed_without_data() {
    let store = temp_store("empty");
    let (result, written) = serve(b"", &store).await;
    assert!(result.is_ok());
    assert!(written.is_empty());
}

#[tokio::test]
async fn test_oversized_request_is_rejected() {
    let store = temp_store("oversized");
    let mut stream = MockTcpStream::new(vec![b'a'; 256]);
    let result = HttpServer::handle_connection(&mut stream, &store, 64, 128).await;
    assert!(matches!(result, Err(Error::RequestTooLarge(_))));
    let text = String::from_utf8(stream.written_data().to_vec()).unwrap();
    assert!(text.starts_with("HTTP/1.1 413 Payload Too Large\r\n"));
}

// --- Router unit behavior ---

#[tokio::test]
async fn test_route_echo_empty_rest() {
    let store = temp_store("echo-empty");
    let request = crate::parser::parse_request(b"GET /echo/ HTTP/1.1\r\n\r\n").unwrap();
    let response = route_request(&request, &store).await;
    assert_eq!(response.status, StatusCode::Ok);
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn test_route_echo_without_trailing_slash_is_not_found() {
    let store = temp_store("echo-no-slash");
    let request = crate::parser::parse_request(b"GET /echo HTTP/1.1\r\n\r\n").unwrap();
    let response = route_request(&request, &store).await;
    assert_eq!(response.status, StatusCode::NotFound);
}

// --- File store ---

#[tokio::test]
async fn test_store_write_creates_root_directory() {
    let store = temp_store("store-create");
    assert!(!store.root().exists());
    store.write("a.txt", b"hi").await.unwrap();
    assert!(store.root().exists());
    assert_eq!(store.read("a.txt").await.unwrap(), b"hi".to_vec());
}

#[tokio::test]
async fn test_store_read_missing_is_not_found() {
    let store = temp_store("store-missing");
    let result = store.read("nope.txt").await;
    assert!(matches!(result, Err(StoreError::NotFound(ref name)) if name == "nope.txt"));
}

#[tokio::test]
async fn test_store_last_writer_wins() {
    let store = temp_store("store-overwrite");
    store.write("a.txt", b"first").await.unwrap();
    store.write("a.txt", b"second").await.unwrap();
    assert_eq!(store.read("a.txt").await.unwrap(), b"second".to_vec());
}
