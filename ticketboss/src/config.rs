//! Configuration management for TicketBoss.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::net::{AddrParseError, SocketAddr};
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when the loaded configuration cannot be used
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `EVENT_ID` was set to an empty string
    #[error("EVENT_ID must not be empty")]
    EmptyEventId,

    /// Host and port do not form a socket address
    #[error("Invalid {which} address '{addr}': {reason}")]
    InvalidAddress {
        /// Which listener (server or metrics)
        which: &'static str,
        /// The offending `host:port`
        addr: String,
        /// Parser message
        reason: String,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Prometheus exporter configuration
    pub metrics: MetricsConfig,
    /// The event seeded at startup
    pub event: EventConfig,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Metrics exporter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Whether to start the Prometheus exporter
    pub enabled: bool,
    /// Exporter host
    pub host: String,
    /// Exporter port
    pub port: u16,
}

/// The single event being sold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventConfig {
    /// Event identifier
    pub event_id: String,
    /// Display name
    pub name: String,
    /// Capacity
    pub total_seats: u32,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            event_id: "node-meetup-2025".to_string(),
            name: "Node.js Meet-up".to_string(),
            total_seats: 500,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Missing or unparsable values fall back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let string = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let defaults = EventConfig::default();

        Self {
            server: ServerConfig {
                host: string("SERVER_HOST", "0.0.0.0"),
                port: parsed(&lookup, "SERVER_PORT", 8080),
                log_level: string("LOG_LEVEL", "info"),
            },
            metrics: MetricsConfig {
                enabled: parsed(&lookup, "METRICS_ENABLED", false),
                host: string("METRICS_HOST", "0.0.0.0"),
                port: parsed(&lookup, "METRICS_PORT", 9090),
            },
            event: EventConfig {
                event_id: string("EVENT_ID", &defaults.event_id),
                name: string("EVENT_NAME", &defaults.name),
                total_seats: parsed(&lookup, "TOTAL_SEATS", defaults.total_seats),
            },
        }
    }

    /// Check the configuration before starting.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the event id is empty or either listener
    /// address does not parse.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.event.event_id.trim().is_empty() {
            return Err(ConfigError::EmptyEventId);
        }
        self.server_addr()?;
        self.metrics_addr()?;
        Ok(())
    }

    /// Address the HTTP server binds to.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidAddress`] if host and port do not parse.
    pub fn server_addr(&self) -> Result<SocketAddr, ConfigError> {
        socket_addr("server", &self.server.host, self.server.port)
    }

    /// Address the Prometheus exporter binds to.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidAddress`] if host and port do not parse.
    pub fn metrics_addr(&self) -> Result<SocketAddr, ConfigError> {
        socket_addr("metrics", &self.metrics.host, self.metrics.port)
    }
}

fn parsed<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn socket_addr(which: &'static str, host: &str, port: u16) -> Result<SocketAddr, ConfigError> {
    let addr = format!("{host}:{port}");
    addr.parse()
        .map_err(|e: AddrParseError| ConfigError::InvalidAddress {
            which,
            reason: e.to_string(),
            addr,
        })
}
