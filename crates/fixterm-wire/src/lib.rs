//! # fixterm-wire
//!
//! A small FIX protocol library for the `fixterm` terminal client.
//!
//! ## Features
//!
//! - Owned tag=value message type preserving field order
//! - SOH-framed tokio codec with BodyLength and CheckSum validation
//! - Session-level configuration (version, comp IDs, HeartBtInt)
//! - Well-known tag and MsgType constants
//!
//! ## Quick Start
//!
//! ```rust
//! use fixterm_wire::{tags, FixMessage};
//!
//! let order: FixMessage = "35=D|55=ACME|44=10".parse().expect("valid field list");
//! assert_eq!(order.msg_type(), Some("D"));
//! assert_eq!(order.get(tags::SYMBOL), Some("ACME"));
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod codec;
pub mod config;
pub mod error;
pub mod message;
pub mod tags;

pub use codec::{FixCodec, SOH};
pub use config::{FixConfig, FixVersion};
pub use error::WireError;
pub use message::FixMessage;
