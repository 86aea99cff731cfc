use std::io;
use std::net::ToSocketAddrs;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::error;

use minihttp_rs::{HttpServer, ServerConfig};

/// A minimal HTTP/1.1 file server.
#[derive(Debug, Parser)]
#[command(name = "minihttp", version, about)]
struct Cli {
    /// Host/IP to bind to
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "4221", env = "HTTP_PORT")]
    port: u16,

    /// Directory backing the /files/ routes
    #[arg(short, long, default_value = "files", env = "FILES_DIR")]
    directory: PathBuf,

    /// Read buffer size in bytes
    #[arg(long, default_value = "8192", env = "READ_BUFFER_SIZE")]
    read_buffer_size: usize,

    /// Maximum accepted request size in bytes
    #[arg(long, default_value = "1048576", env = "MAX_REQUEST_SIZE")]
    max_request_size: usize,
}

impl Cli {
    fn into_config(self) -> io::Result<ServerConfig> {
        let addr = format!("{host}:{port}", host = self.host, port = self.port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "address resolved to nothing"))?;
        Ok(ServerConfig {
            addr,
            files_dir: self.directory,
            read_buffer_size: self.read_buffer_size,
            max_request_size: self.max_request_size,
        })
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid bind address: {e}");
            process::exit(1);
        }
    };

    let server = HttpServer::new(config);
    if let Err(e) = server.start().await {
        error!("Server error: {e}");
        process::exit(1);
    }
}
