//! The `wait` command: block until a message of a given type arrives.

use std::time::Duration;

use async_trait::async_trait;

use super::Command;
use crate::console::Console;
use crate::error::{CommandError, CommandResult};

/// How often the message log is re-checked while waiting.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Blocks the loop until an inbound message with the given MsgType(35) is
/// in the log. A message that arrived before the command runs satisfies
/// the wait immediately. Fails with ConnectionClosed if the session goes
/// away while no matching message exists.
pub struct WaitCommand;

#[async_trait]
impl Command for WaitCommand {
    fn usage(&self) -> &'static str {
        "wait <message-type>"
    }

    async fn execute(&self, console: &mut Console, args: &[&str]) -> CommandResult {
        let [msg_type] = args else {
            return Err(CommandError::Usage);
        };

        loop {
            if console.store().find_inbound(msg_type).is_some() {
                return Ok(());
            }
            if console.session().is_closed() {
                return Err(CommandError::ConnectionClosed);
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}
