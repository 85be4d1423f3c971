//! In-memory log of session traffic.
//!
//! The store is the message sink shared between the session's background
//! reader, the session's send path, and the `messages`/`wait` commands.
//! Messages are kept in arrival order for the lifetime of the process.

use std::sync::Arc;

use fixterm_wire::FixMessage;
use parking_lot::Mutex;

/// Which way a stored message travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Received from the counterparty.
    Inbound,
    /// Sent by this client.
    Outbound,
}

/// One recorded message.
#[derive(Debug, Clone)]
pub struct StoredMessage {
    /// Direction of travel.
    pub direction: Direction,
    /// The full message as it crossed the wire.
    pub message: FixMessage,
}

/// Append-only, ordered log of inbound and outbound messages.
#[derive(Default)]
pub struct MessageStore {
    log: Mutex<Vec<StoredMessage>>,
}

impl MessageStore {
    /// Create an empty store.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Record a message.
    pub fn record(&self, direction: Direction, message: FixMessage) {
        self.log.lock().push(StoredMessage { direction, message });
    }

    /// A copy of the full log in arrival order.
    pub fn snapshot(&self) -> Vec<StoredMessage> {
        self.log.lock().clone()
    }

    /// The first inbound message with the given MsgType(35), if any.
    pub fn find_inbound(&self, msg_type: &str) -> Option<FixMessage> {
        self.log
            .lock()
            .iter()
            .find(|stored| {
                stored.direction == Direction::Inbound
                    && stored.message.msg_type() == Some(msg_type)
            })
            .map(|stored| stored.message.clone())
    }
}
