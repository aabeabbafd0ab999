// Server loop module
// Accepts connections forever; accept errors are logged and the loop
// continues. There is no shutdown path, the loop only ends with the
// process.

use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use crate::config::ServerConfig;
use crate::logger;

/// Run the accept loop on `listener`, serving files per `config`.
/// Never returns under normal operation.
pub async fn run(
    listener: TcpListener,
    config: Arc<ServerConfig>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                accept_connection(stream, peer_addr, &config);
            }
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection: {e}"));
            }
        }
    }
}
