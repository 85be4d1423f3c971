//! The `exit` command: close the session and leave the console.

use async_trait::async_trait;

use super::Command;
use crate::console::Console;
use crate::error::{CommandError, CommandResult};

/// Closes the console; the run loop observes the closed flag and stops.
pub struct ExitCommand;

#[async_trait]
impl Command for ExitCommand {
    fn usage(&self) -> &'static str {
        "exit"
    }

    async fn execute(&self, console: &mut Console, args: &[&str]) -> CommandResult {
        if !args.is_empty() {
            return Err(CommandError::Usage);
        }
        console.close().await;
        Ok(())
    }
}
