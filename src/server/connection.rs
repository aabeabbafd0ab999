// Connection handling module
// Serves a single accepted TCP connection on its own task

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::handler;
use crate::logger;

/// Accept a connection and hand it to a spawned task.
///
/// Requests never share mutable state, so connections need no
/// coordination beyond the shared read-only config.
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: std::net::SocketAddr,
    config: &Arc<ServerConfig>,
) {
    logger::log_connection_accepted(&peer_addr);
    handle_connection(stream, Arc::clone(config));
}

/// Serve a single connection in a spawned task.
///
/// Wraps the TCP stream in `TokioIo`, builds an HTTP/1.1 connection
/// with keep-alive, and serves it with the request handler. Blocking
/// on filesystem reads is isolated to this task.
fn handle_connection(stream: tokio::net::TcpStream, config: Arc<ServerConfig>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let conn = http1::Builder::new()
            .keep_alive(true)
            .serve_connection(
                io,
                service_fn(move |req| {
                    let config = Arc::clone(&config);
                    async move { handler::handle_request(req, config).await }
                }),
            );

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}
