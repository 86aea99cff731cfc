//! Fixed route dispatch.

use log::{info, warn};

use crate::parser::ParsedRequest;
use crate::server::response::{ResponseMessage, StatusCode};
use crate::server::store::{FileStore, StoreError};

/// Dispatch a parsed request to one of the hardcoded routes and produce the
/// response. Route prefixes are disjoint, so match order does not matter.
///
/// This function is total: store failures are mapped to error responses here
/// rather than propagated.
pub async fn route_request(request: &ParsedRequest, store: &FileStore) -> ResponseMessage {
    info!("{method} {path}", method = request.method, path = request.path);

    if request.path == "/" {
        return ResponseMessage::new(StatusCode::Ok);
    }

    if let Some(text) = request.path.strip_prefix("/echo/") {
        return ResponseMessage::new(StatusCode::Ok).with_body_string(text);
    }

    if request.path == "/user-agent" {
        let agent = request
            .get_header("user-agent")
            .map(String::as_str)
            .unwrap_or("Unknown");
        return ResponseMessage::new(StatusCode::Ok).with_body_string(agent);
    }

    if let Some(name) = request.path.strip_prefix("/files/") {
        return handle_files(request, store, name).await;
    }

    ResponseMessage::new(StatusCode::NotFound)
}

/// Handle the `/files/<name>` routes: GET reads from the store, POST writes
/// the request body, anything else is rejected.
async fn handle_files(request: &ParsedRequest, store: &FileStore, name: &str) -> ResponseMessage {
    match request.method.as_str() {
        "GET" => match store.read(name).await {
            Ok(bytes) => ResponseMessage::new(StatusCode::Ok)
                .with_content_type("application/octet-stream")
                .with_body_bytes(bytes),
            Err(StoreError::NotFound(_)) => ResponseMessage::new(StatusCode::NotFound),
            Err(e) => {
                warn!("Failed to read {name}: {e}");
                ResponseMessage::new(StatusCode::InternalServerError)
            }
        },
        "POST" => match store.write(name, request.body.as_bytes()).await {
            Ok(()) => {
                ResponseMessage::new(StatusCode::Created).with_body_string(request.body.clone())
            }
            Err(e) => {
                warn!("Failed to write {name}: {e}");
                ResponseMessage::new(StatusCode::InternalServerError)
            }
        },
        _ => ResponseMessage::new(StatusCode::MethodNotAllowed),
    }
}
