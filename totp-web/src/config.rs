//! Server settings read from the environment.

use log::warn;
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Environment variable holding the address to bind to.
pub const HOST_VAR: &str = "TOTP_WEB_HOST";
/// Environment variable holding the port to listen on.
pub const PORT_VAR: &str = "TOTP_WEB_PORT";
/// Port used when none is configured.
pub const DEFAULT_PORT: u16 = 5000;

/// Where the server listens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind to. Defaults to all interfaces.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Reads `TOTP_WEB_HOST` and `TOTP_WEB_PORT`, keeping the default for
    /// anything unset or unparsable.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`ServerConfig::from_env`], with a custom variable source.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: parse_or(lookup(HOST_VAR), HOST_VAR, defaults.host),
            port: parse_or(lookup(PORT_VAR), PORT_VAR, defaults.port),
        }
    }

    /// The socket address to bind.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr + std::fmt::Display>(value: Option<String>, key: &str, default: T) -> T {
    match value {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {key}={raw:?}; using {default}.");
            default
        }),
        None => default,
    }
}
