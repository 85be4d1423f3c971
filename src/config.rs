//! Configuration loading.

use std::path::Path;

use fixterm_wire::{FixConfig, FixVersion};
use serde::Deserialize;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown FIX version: {0}")]
    Version(String),
}

/// Client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// FIX session settings.
    pub fix: FixSection,
    /// Transport buffer sizing.
    #[serde(default)]
    pub buffers: BuffersSection,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Protocol-level configuration handed to the session engine.
    pub fn fix_config(&self) -> Result<FixConfig, ConfigError> {
        let version: FixVersion = self
            .fix
            .version
            .parse()
            .map_err(|_| ConfigError::Version(self.fix.version.clone()))?;
        Ok(FixConfig {
            version,
            sender_comp_id: self.fix.sender_comp_id.clone(),
            target_comp_id: self.fix.target_comp_id.clone(),
            heart_bt_int: self.fix.heart_bt_int,
            rx_buffer_capacity: self.buffers.rx,
            tx_buffer_capacity: self.buffers.tx,
        })
    }
}

/// FIX session settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FixSection {
    /// Protocol version string (e.g. "FIX.4.2").
    pub version: String,
    /// SenderCompID(49) for outgoing messages.
    pub sender_comp_id: String,
    /// TargetCompID(56) for outgoing messages.
    pub target_comp_id: String,
    /// HeartBtInt(108): heartbeat interval in seconds.
    pub heart_bt_int: u64,
    /// Counterparty host name or address.
    pub address: String,
    /// Counterparty port.
    pub port: u16,
}

/// Transport buffer sizing.
#[derive(Debug, Clone, Deserialize)]
pub struct BuffersSection {
    /// Receive buffer capacity in bytes (default: 1 MiB).
    #[serde(default = "default_buffer_capacity")]
    pub rx: usize,
    /// Transmit buffer capacity in bytes (default: 1 MiB).
    #[serde(default = "default_buffer_capacity")]
    pub tx: usize,
}

impl Default for BuffersSection {
    fn default() -> Self {
        Self {
            rx: default_buffer_capacity(),
            tx: default_buffer_capacity(),
        }
    }
}

fn default_buffer_capacity() -> usize {
    fixterm_wire::config::DEFAULT_BUFFER_CAPACITY
}
