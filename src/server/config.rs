//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

/// HTTP server configuration.
///
/// Built once at startup and handed to the server by ownership; there is no
/// process-wide mutable configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The address to bind to.
    pub addr: SocketAddr,
    /// The directory backing the `/files/` routes.
    pub files_dir: PathBuf,
    /// The read buffer size for a single receive.
    pub read_buffer_size: usize,
    /// The maximum accepted request size in bytes.
    pub max_request_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:4221".parse().unwrap(),
            files_dir: PathBuf::from("files"),
            read_buffer_size: 8192,
            max_request_size: 1024 * 1024,
        }
    }
}
