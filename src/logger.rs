//! Logging helpers
//!
//! Info and access lines go to stdout, errors and warnings to stderr.
//! Access lines carry a local timestamp in Common Log Format style.

use crate::config::ServerConfig;
use chrono::Local;
use hyper::Method;
use std::net::SocketAddr;

pub fn log_server_start(addr: &SocketAddr, config: &ServerConfig) {
    println!("======================================");
    println!("Static file server started");
    println!("Listening on: http://{addr}");
    println!("Serving root: {}", config.root.display());
    println!("Using Tokio runtime for concurrency");
    println!("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

pub fn log_bind_failed(addr: &SocketAddr, err: &std::io::Error) {
    eprintln!("[FATAL] Failed to bind {addr}: {err}");
}

/// One line per handled request, access-log style.
pub fn log_access(method: &Method, path: &str, status: u16, body_bytes: usize) {
    println!("{}", format_access_line(method, path, status, body_bytes));
}

fn format_access_line(method: &Method, path: &str, status: u16, body_bytes: usize) -> String {
    format!(
        "[{}] \"{method} {path}\" {status} {body_bytes}",
        Local::now().format("%d/%b/%Y:%H:%M:%S %z"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_line_contains_request_fields() {
        let line = format_access_line(&Method::GET, "/hello.txt", 200, 2);
        assert!(line.contains("\"GET /hello.txt\""));
        assert!(line.contains(" 200 2"));
    }
}
