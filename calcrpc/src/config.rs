//! Server configuration.
//!
//! Set once at startup. [`ServerConfig::from_env`] reads:
//!
//! | Variable | Meaning |
//! |---|---|
//! | `CALCRPC_ADDR` | full socket address to bind, e.g. `127.0.0.1:8080` |
//! | `PORT` | port to bind on `0.0.0.0`, used when `CALCRPC_ADDR` is unset |
//! | `CALCRPC_MAX_MESSAGE_BYTES` | request size limit in bytes, `0` for unlimited |

use std::net::{AddrParseError, Ipv4Addr, SocketAddr};
use std::num::ParseIntError;

use crate::limits::MessageLimits;

/// Default port when neither `CALCRPC_ADDR` nor `PORT` is set.
pub const DEFAULT_PORT: u16 = 3000;

/// Invalid configuration value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var} value {value:?}: {source}")]
    InvalidAddr {
        var: &'static str,
        value: String,
        #[source]
        source: AddrParseError,
    },

    #[error("invalid {var} value {value:?}: {source}")]
    InvalidNumber {
        var: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Server-wide configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    bind_addr: SocketAddr,
    limits: MessageLimits,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            limits: MessageLimits::default(),
        }
    }
}

impl ServerConfig {
    /// Default configuration: `0.0.0.0:3000`, 4 MB message limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps variable names to values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("CALCRPC_ADDR") {
            config.bind_addr = value.parse().map_err(|source| ConfigError::InvalidAddr {
                var: "CALCRPC_ADDR",
                value: value.clone(),
                source,
            })?;
        } else if let Some(value) = lookup("PORT") {
            let port: u16 = value.parse().map_err(|source| ConfigError::InvalidNumber {
                var: "PORT",
                value: value.clone(),
                source,
            })?;
            config.bind_addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
        }

        if let Some(value) = lookup("CALCRPC_MAX_MESSAGE_BYTES") {
            let max: usize = value.parse().map_err(|source| ConfigError::InvalidNumber {
                var: "CALCRPC_MAX_MESSAGE_BYTES",
                value: value.clone(),
                source,
            })?;
            config.limits = match max {
                0 => MessageLimits::unlimited(),
                max => MessageLimits::new(max),
            };
        }

        Ok(config)
    }

    /// Set the address to bind.
    pub fn bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Set custom message size limits.
    ///
    /// Default is 4 MB.
    pub fn message_limits(mut self, limits: MessageLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn addr(&self) -> SocketAddr {
        self.bind_addr
    }

    pub fn limits(&self) -> MessageLimits {
        self.limits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ServerConfig::new());
        assert_eq!(config.addr().to_string(), "0.0.0.0:3000");
        assert_eq!(config.limits(), MessageLimits::default());
    }

    #[test]
    fn test_port() {
        let config = ServerConfig::from_lookup(lookup_from(&[("PORT", "8081")])).unwrap();
        assert_eq!(config.addr().to_string(), "0.0.0.0:8081");
    }

    #[test]
    fn test_addr_takes_precedence_over_port() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("CALCRPC_ADDR", "127.0.0.1:9000"),
            ("PORT", "8081"),
        ]))
        .unwrap();
        assert_eq!(config.addr().to_string(), "127.0.0.1:9000");
    }

    #[test]
    fn test_max_message_bytes() {
        let config =
            ServerConfig::from_lookup(lookup_from(&[("CALCRPC_MAX_MESSAGE_BYTES", "128")]))
                .unwrap();
        assert_eq!(config.limits(), MessageLimits::new(128));

        let config =
            ServerConfig::from_lookup(lookup_from(&[("CALCRPC_MAX_MESSAGE_BYTES", "0")])).unwrap();
        assert_eq!(config.limits(), MessageLimits::unlimited());
    }

    #[test]
    fn test_invalid_values() {
        let err = ServerConfig::from_lookup(lookup_from(&[("CALCRPC_ADDR", "nowhere")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAddr { .. }));
        assert!(err.to_string().contains("CALCRPC_ADDR"));

        let err = ServerConfig::from_lookup(lookup_from(&[("PORT", "70000")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { var: "PORT", .. }));
    }

    #[test]
    fn test_builder() {
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        let config = ServerConfig::new()
            .bind_addr(addr)
            .message_limits(MessageLimits::new(10));
        assert_eq!(config.addr(), addr);
        assert_eq!(config.limits().max_message_size(), Some(10));
    }
}
