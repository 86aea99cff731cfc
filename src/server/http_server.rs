//! HTTP server implementation.

use std::sync::Arc;

use log::{error, info};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::parser::parse_request;
use crate::server::config::ServerConfig;
use crate::server::error::Error;
use crate::server::response::{ResponseMessage, StatusCode};
use crate::server::router::route_request;
use crate::server::store::FileStore;

/// An HTTP server serving one request per connection.
pub struct HttpServer {
    /// The server configuration.
    pub config: ServerConfig,
    /// The byte store backing the `/files/` routes.
    pub store: Arc<FileStore>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        let store = Arc::new(FileStore::new(config.files_dir.clone()));
        Self { config, store }
    }

    /// Set up the TCP listener.
    async fn setup_listener(&self) -> Result<TcpListener, Error> {
        let listener = TcpListener::bind(&self.config.addr).await?;
        info!("Server listening on http://{addr}", addr = self.config.addr);
        info!("Serving files from {dir}", dir = self.store.root().display());
        Ok(listener)
    }

    /// Set up a Ctrl+C handler for graceful shutdown.
    fn setup_ctrl_c_handler(shutdown_tx: mpsc::Sender<()>, tasks: &mut JoinSet<()>) {
        tasks.spawn(async move {
            match signal::ctrl_c().await {
                Ok(()) => {
                    info!("Received Ctrl+C, initiating graceful shutdown");
                    let _ = shutdown_tx.send(()).await;
                }
                Err(e) => {
                    error!("Error setting up Ctrl+C handler: {e}");
                }
            }
        });
    }

    /// Handle accept errors. Returns true if the accept loop should stop.
    async fn handle_accept_error(e: std::io::Error) -> bool {
        error!("Error accepting connection: {e}");

        if e.kind() == std::io::ErrorKind::BrokenPipe {
            error!("Critical error accepting connection, shutting down");
            return true;
        }

        // For transient errors, wait a bit before retrying
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
        false
    }

    /// Perform graceful shutdown.
    async fn perform_shutdown(tasks: &mut JoinSet<()>) {
        info!("Waiting for {len} active connections to complete...", len = tasks.len());
        let shutdown_timeout = tokio::time::Duration::from_secs(30);
        let _ = tokio::time::timeout(shutdown_timeout, async {
            while let Some(res) = tasks.join_next().await {
                if let Err(e) = res {
                    error!("Task failed during shutdown: {e}");
                }
            }
        })
        .await;

        info!("Server shutdown complete");
    }

    /// Start the server and listen for incoming connections.
    pub async fn start(&self) -> Result<(), Error> {
        let listener = self.setup_listener().await?;

        // Create a channel for shutdown signaling
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        // Use JoinSet to keep track of all spawned tasks
        let mut tasks = JoinSet::new();

        Self::setup_ctrl_c_handler(shutdown_tx, &mut tasks);

        loop {
            tokio::select! {
                // Check for shutdown signal
                _ = shutdown_rx.recv() => {
                    info!("Shutting down server...");
                    break;
                }

                // Accept new connections
                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((mut socket, addr)) => {
                            let store = self.store.clone();
                            let read_buffer_size = self.config.read_buffer_size;
                            let max_request_size = self.config.max_request_size;

                            // One task per connection; the socket is dropped
                            // (and closed) when the task completes. A failed
                            // connection never stops the accept loop.
                            tasks.spawn(async move {
                                if let Err(e) = Self::handle_connection(
                                    &mut socket,
                                    &store,
                                    read_buffer_size,
                                    max_request_size,
                                ).await {
                                    error!("Error handling connection from {addr}: {e}");
                                }
                            });
                        },
                        Err(e) => {
                            if Self::handle_accept_error(e).await {
                                break;
                            }
                        }
                    }
                }
            }
        }

        Self::perform_shutdown(&mut tasks).await;

        Ok(())
    }

    /// Read one request from the socket.
    ///
    /// Reads until the header terminator has been seen and the declared
    /// `Content-Length` bytes of body have arrived, or the peer closes the
    /// connection. A request growing past `max_request_size` fails instead of
    /// being silently truncated.
    async fn read_request(
        socket: &mut (impl AsyncRead + Unpin),
        read_buffer_size: usize,
        max_request_size: usize,
    ) -> Result<Vec<u8>, Error> {
        let mut data = Vec::new();
        let mut buf = vec![0; read_buffer_size];

        loop {
            let n = socket.read(&mut buf).await?;
            if n == 0 {
                break; // Connection closed by the peer
            }
            data.extend_from_slice(&buf[..n]);

            if data.len() > max_request_size {
                return Err(Error::RequestTooLarge(data.len()));
            }
            if request_is_complete(&data) {
                break;
            }
        }

        Ok(data)
    }

    /// Handle a single connection: read one request, parse, route, write the
    /// response. Errors are answered best-effort and returned for logging;
    /// they never propagate past the accept loop.
    pub async fn handle_connection(
        socket: &mut (impl AsyncRead + AsyncWrite + Unpin),
        store: &FileStore,
        read_buffer_size: usize,
        max_request_size: usize,
    ) -> Result<(), Error> {
        let raw = match Self::read_request(socket, read_buffer_size, max_request_size).await {
            Ok(raw) => raw,
            Err(Error::RequestTooLarge(n)) => {
                let response = ResponseMessage::new(StatusCode::PayloadTooLarge);
                let _ = socket.write_all(&response.to_bytes()).await;
                return Err(Error::RequestTooLarge(n));
            }
            Err(e) => return Err(e),
        };

        if raw.is_empty() {
            return Ok(()); // Connection closed without sending a request
        }

        let request = match parse_request(&raw) {
            Ok(req) => req,
            Err(e) => {
                let response = ResponseMessage::new(StatusCode::BadRequest)
                    .with_body_string(format!("Error parsing request: {e}"));
                socket.write_all(&response.to_bytes()).await?;
                return Err(Error::Parse(e));
            }
        };

        let response = route_request(&request, store).await;
        socket.write_all(&response.to_bytes()).await?;

        Ok(())
    }
}

/// Whether `data` holds a complete request: the header terminator has been
/// seen and at least `Content-Length` bytes of body follow it.
fn request_is_complete(data: &[u8]) -> bool {
    let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") else {
        return false;
    };
    let body_len = data.len() - (pos + 4);
    body_len >= declared_content_length(&data[..pos])
}

/// Scan the raw header block for a `Content-Length` declaration. Absent or
/// unparseable declarations count as zero.
fn declared_content_length(head: &[u8]) -> usize {
    let head = String::from_utf8_lossy(head);
    head.split("\r\n")
        .skip(1)
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.trim().eq_ignore_ascii_case("content-length") {
                value.trim().parse().ok()
            } else {
                None
            }
        })
        .unwrap_or(0)
}
