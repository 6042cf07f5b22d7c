//! # Runtime Configuration Module
//!
//! Environment-variable configuration for the coroutine runtime and the
//! listener limits.
//!
//! ## Environment Variables
//!
//! ### `RESTAM_STACK_SIZE`
//!
//! Stack size for every coroutine (listener and connections). Accepts values in:
//! - Decimal: `32768`
//! - Hexadecimal: `0x8000`
//!
//! Default: `0x8000` (32 KB). Parsing a request and running a controller is
//! shallow, but serde and tracing both like some headroom.
//!
//! ### `RESTAM_MAX_CONNECTIONS`
//!
//! Maximum number of connections served at once. Unset or `0` means no limit,
//! which is the default.
//!
//! ### `RESTAM_READ_TIMEOUT_MS`
//!
//! Socket read timeout per connection in milliseconds. Unset or `0` means
//! reads never time out, which is the default.
//!
//! ## Usage
//!
//! ```rust
//! use restam::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Stack size: {} bytes", config.stack_size);
//! ```

use std::env;
use std::time::Duration;

use crate::server::ServerConfig;

const DEFAULT_STACK_SIZE: usize = 0x8000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Stack size for coroutines in bytes
    pub stack_size: usize,
    /// Connection cap, `None` for unbounded
    pub max_connections: Option<usize>,
    /// Socket read timeout, `None` to block indefinitely
    pub read_timeout: Option<Duration>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            stack_size: DEFAULT_STACK_SIZE,
            max_connections: None,
            read_timeout: None,
        }
    }
}

fn parse_size(val: &str) -> Option<usize> {
    let val = val.trim();
    if let Some(hex) = val.strip_prefix("0x").or_else(|| val.strip_prefix("0X")) {
        usize::from_str_radix(hex, 16).ok()
    } else {
        val.parse().ok()
    }
}

/// Positive integer, with `0` and garbage both meaning "not set"
fn parse_limit(val: &str) -> Option<u64> {
    val.trim().parse::<u64>().ok().filter(|n| *n > 0)
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; `from_env` uses the process environment.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let stack_size = lookup("RESTAM_STACK_SIZE")
            .and_then(|v| parse_size(&v))
            .unwrap_or(DEFAULT_STACK_SIZE);
        let max_connections = lookup("RESTAM_MAX_CONNECTIONS")
            .and_then(|v| parse_limit(&v))
            .and_then(|n| usize::try_from(n).ok());
        let read_timeout = lookup("RESTAM_READ_TIMEOUT_MS")
            .and_then(|v| parse_limit(&v))
            .map(Duration::from_millis);
        Self {
            stack_size,
            max_connections,
            read_timeout,
        }
    }

    /// Apply the coroutine settings to the global `may` runtime.
    ///
    /// Call once at startup, before the server spawns any coroutine.
    pub fn apply(&self) {
        may::config().set_stack_size(self.stack_size);
    }

    /// Listener settings derived from this configuration
    #[must_use]
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            max_connections: self.max_connections,
            read_timeout: self.read_timeout,
        }
    }
}
