//! Listener configuration for the push receiver.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use teams_relay::ConfigError;

pub const PORT_VAR: &str = "PORT";
pub const BIND_ADDR_VAR: &str = "BIND_ADDR";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  pub host: IpAddr,
  pub port: u16,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host: IpAddr::V4(Ipv4Addr::LOCALHOST),
      port: DEFAULT_PORT,
    }
  }
}

impl ServerConfig {
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let mut config = Self::default();
    if let Some(port) = lookup(PORT_VAR) {
      config.port = port
        .trim()
        .parse()
        .map_err(|_| ConfigError::invalid(PORT_VAR, format!("`{}` is not a valid port", port)))?;
    }
    if let Some(host) = lookup(BIND_ADDR_VAR) {
      config.host = host
        .trim()
        .parse()
        .map_err(|_| ConfigError::invalid(BIND_ADDR_VAR, format!("`{}` is not an IP address", host)))?;
    }
    Ok(config)
  }

  pub fn socket_addr(&self) -> SocketAddr {
    SocketAddr::new(self.host, self.port)
  }
}
