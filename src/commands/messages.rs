//! The `messages` command: print the session's message log.

use async_trait::async_trait;

use super::Command;
use crate::console::Console;
use crate::error::{CommandError, CommandResult};
use crate::store::Direction;

/// Prints recorded messages, oldest first, optionally filtered by
/// direction (`sent` or `received`).
pub struct MessagesCommand;

#[async_trait]
impl Command for MessagesCommand {
    fn usage(&self) -> &'static str {
        "messages [sent|received]"
    }

    async fn execute(&self, console: &mut Console, args: &[&str]) -> CommandResult {
        let filter = match args {
            [] => None,
            ["sent"] => Some(Direction::Outbound),
            ["received"] => Some(Direction::Inbound),
            _ => return Err(CommandError::Usage),
        };

        for stored in console.store().snapshot() {
            if filter.is_some_and(|direction| direction != stored.direction) {
                continue;
            }
            console.output().line(stored.message.to_string());
        }
        Ok(())
    }
}
