//! Session-level protocol configuration.

use std::str::FromStr;

use crate::error::WireError;

/// Supported FIX protocol versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixVersion {
    /// FIX 4.0
    Fix40,
    /// FIX 4.1
    Fix41,
    /// FIX 4.2
    Fix42,
    /// FIX 4.3
    Fix43,
    /// FIX 4.4
    Fix44,
    /// FIXT 1.1 (transport for FIX 5.0+)
    Fixt11,
}

impl FixVersion {
    /// The BeginString(8) value for this version.
    pub fn begin_string(self) -> &'static str {
        match self {
            Self::Fix40 => "FIX.4.0",
            Self::Fix41 => "FIX.4.1",
            Self::Fix42 => "FIX.4.2",
            Self::Fix43 => "FIX.4.3",
            Self::Fix44 => "FIX.4.4",
            Self::Fixt11 => "FIXT.1.1",
        }
    }
}

impl FromStr for FixVersion {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FIX.4.0" => Ok(Self::Fix40),
            "FIX.4.1" => Ok(Self::Fix41),
            "FIX.4.2" => Ok(Self::Fix42),
            "FIX.4.3" => Ok(Self::Fix43),
            "FIX.4.4" => Ok(Self::Fix44),
            "FIXT.1.1" => Ok(Self::Fixt11),
            other => Err(WireError::UnknownVersion(other.to_string())),
        }
    }
}

/// Configuration for one FIX session.
///
/// Opaque to the console core; consumed by the session engine and the codec.
#[derive(Debug, Clone)]
pub struct FixConfig {
    /// Protocol version (determines BeginString).
    pub version: FixVersion,
    /// SenderCompID(49) stamped on outgoing messages.
    pub sender_comp_id: String,
    /// TargetCompID(56) stamped on outgoing messages.
    pub target_comp_id: String,
    /// HeartBtInt(108): heartbeat interval in seconds.
    pub heart_bt_int: u64,
    /// Receive buffer capacity in bytes.
    pub rx_buffer_capacity: usize,
    /// Transmit buffer capacity in bytes.
    pub tx_buffer_capacity: usize,
}

/// Default buffer capacity (1 MiB), matching typical engine defaults.
pub const DEFAULT_BUFFER_CAPACITY: usize = 1024 * 1024;

impl FixConfig {
    /// Create a configuration with default buffer sizing.
    pub fn new(
        version: FixVersion,
        sender_comp_id: impl Into<String>,
        target_comp_id: impl Into<String>,
        heart_bt_int: u64,
    ) -> Self {
        Self {
            version,
            sender_comp_id: sender_comp_id.into(),
            target_comp_id: target_comp_id.into(),
            heart_bt_int,
            rx_buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            tx_buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}
