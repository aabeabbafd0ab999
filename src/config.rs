//! Server configuration
//!
//! Configuration is an explicit value handed to the server at startup.
//! There is no config file and no environment surface: the port is a
//! fixed constant and the root is the process working directory.

use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Port the listener binds on all interfaces.
pub const DEFAULT_PORT: u16 = 5000;

/// Immutable server configuration: the directory files are served
/// from and the port the listener binds.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory all servable files must reside under.
    pub root: PathBuf,
    /// TCP port to bind, all interfaces.
    pub port: u16,
}

impl ServerConfig {
    /// Build the default configuration: serve the current working
    /// directory on [`DEFAULT_PORT`].
    pub fn from_cwd() -> io::Result<Self> {
        Ok(Self {
            root: std::env::current_dir()?,
            port: DEFAULT_PORT,
        })
    }

    /// Socket address the listener binds (all interfaces).
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr_uses_port() {
        let cfg = ServerConfig {
            root: PathBuf::from("/tmp"),
            port: 5000,
        };
        assert_eq!(cfg.socket_addr().to_string(), "0.0.0.0:5000");
    }

    #[test]
    fn test_from_cwd_resolves_root() {
        let cfg = ServerConfig::from_cwd().unwrap();
        assert!(cfg.root.is_absolute());
        assert_eq!(cfg.port, DEFAULT_PORT);
    }
}
