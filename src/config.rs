//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::notes::expiry::{max_ttl_secs, now_millis};
use crate::notes::DEFAULT_NOTE_TTL_SECS;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// SQLite database URL
    pub database_url: String,
    /// Note time-to-live in seconds
    pub note_ttl: u64,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 3001)
    /// - `DATABASE_URL` - SQLite database URL (default: sqlite://notes.db)
    /// - `NOTE_TTL` - Note TTL in seconds (default: 86400)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 60)
    ///
    /// Unparseable values, and zero for the durations, fall back to defaults.
    /// So does a `NOTE_TTL` that would push expiries past year 9999.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let ttl_limit = max_ttl_secs(now_millis());
        Self {
            server_port: parse_var::<u16>("PORT").unwrap_or(defaults.server_port),
            database_url: env::var("DATABASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.database_url),
            note_ttl: parse_var::<u64>("NOTE_TTL")
                .filter(|&v| v > 0 && v <= ttl_limit)
                .unwrap_or(defaults.note_ttl),
            cleanup_interval: parse_var::<u64>("CLEANUP_INTERVAL")
                .filter(|&v| v > 0)
                .unwrap_or(defaults.cleanup_interval),
        }
    }

    /// Note TTL as a duration
    pub fn note_ttl(&self) -> Duration {
        Duration::from_secs(self.note_ttl)
    }

    /// Cleanup interval as a duration
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3001,
            database_url: "sqlite://notes.db".to_string(),
            note_ttl: DEFAULT_NOTE_TTL_SECS,
            cleanup_interval: 60,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
