//! Runtime configuration.
//!
//! Values come from environment variables (a `.env` file is loaded by the
//! binary at startup). Anything missing or unparseable falls back to the
//! defaults below; CLI flags override both.

use std::env;
use std::str::FromStr;

/// Default HTTP port for `numgroup serve`.
pub const DEFAULT_PORT: u16 = 3000;

/// Maximum request or upload body size (50 MB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 50 * 1024 * 1024;

/// Log entries buffered for slow SSE subscribers.
pub const DEFAULT_LOG_CAPACITY: usize = 100;

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// HTTP port (`NUMGROUP_PORT`)
    pub port: u16,
    /// Body size limit in bytes (`NUMGROUP_MAX_INPUT_BYTES`)
    pub max_input_bytes: usize,
    /// Log broadcast channel capacity (`NUMGROUP_LOG_CAPACITY`)
    pub log_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            log_capacity: DEFAULT_LOG_CAPACITY,
        }
    }
}

impl Settings {
    /// Load settings from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            port: parse_or(lookup("NUMGROUP_PORT"), defaults.port),
            max_input_bytes: parse_or(lookup("NUMGROUP_MAX_INPUT_BYTES"), defaults.max_input_bytes),
            // broadcast::channel panics on zero
            log_capacity: parse_or(lookup("NUMGROUP_LOG_CAPACITY"), defaults.log_capacity).max(1),
        }
    }

    /// Override the port, e.g. from a CLI flag.
    pub fn with_port(mut self, port: Option<u16>) -> Self {
        if let Some(port) = port {
            self.port = port;
        }
        self
    }
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
