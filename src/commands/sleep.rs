//! The `sleep` command: pause the loop for a number of milliseconds.
//!
//! Useful in scripts to give the counterparty time to respond before the
//! next command runs.

use std::time::Duration;

use async_trait::async_trait;

use super::Command;
use crate::console::Console;
use crate::error::{CommandError, CommandResult};

/// Suspends the loop; no other command runs during the pause.
pub struct SleepCommand;

#[async_trait]
impl Command for SleepCommand {
    fn usage(&self) -> &'static str {
        "sleep <milliseconds>"
    }

    async fn execute(&self, _console: &mut Console, args: &[&str]) -> CommandResult {
        let [millis] = args else {
            return Err(CommandError::Usage);
        };
        let millis: u64 = millis.parse().map_err(|_| CommandError::Usage)?;
        tokio::time::sleep(Duration::from_millis(millis)).await;
        Ok(())
    }
}
