//! Connection and behaviour configuration

use std::collections::HashMap;
use std::time::Duration;

/// TCP connection settings for a receiver
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Receiver hostname or IP address
    pub host: String,
    /// IP control port (8102 on most models, 23 on older ones)
    pub port: u16,
    /// Delay before a reconnection attempt after a lost connection; a
    /// zero delay disables reconnection entirely
    pub reconnect_delay: Duration,
    /// Maximum consecutive reconnection attempts before giving up,
    /// `0` for no ceiling
    pub max_retries: u32,
    /// TCP keepalive probe interval, `None` to leave the OS default
    pub keep_alive: Option<Duration>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 8102,
            reconnect_delay: Duration::from_secs(30),
            max_retries: 5,
            keep_alive: Some(Duration::from_secs(30)),
        }
    }
}

impl ConnectionConfig {
    /// Convenience constructor with default timings
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }
}

/// Tunable behaviour applied by the value hooks
///
/// Can be changed at any time; the engine reads the current values on
/// each affected operation.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Substitute input names for input ids on both the read and write
    /// path; off, `general.selectedInput` carries the raw id
    pub custom_input_names: bool,
    /// Lower bound for volume writes, in dB; the limiter only runs when
    /// both bounds are set
    pub volume_min: Option<f64>,
    /// Upper bound for volume writes, in dB
    pub volume_max: Option<f64>,
    /// User-assigned input names by input id, overriding names reported
    /// by the device; only consulted with `custom_input_names` on
    pub input_names: HashMap<i64, String>,
}
