//! The `help` command.

use async_trait::async_trait;

use super::Command;
use crate::console::Console;
use crate::error::{CommandError, CommandResult};

/// Lists the available commands, or the usage of one command.
///
/// Holds a snapshot of every registered (name, usage) pair taken when the
/// registry was built; the registry never changes afterwards, so the
/// snapshot stays accurate.
pub struct HelpCommand {
    entries: Vec<(&'static str, &'static str)>,
}

impl HelpCommand {
    /// Usage string, needed before the command itself exists so the
    /// registry can include help in help.
    pub const USAGE: &'static str = "help [<command>]";

    /// Create the command with the registry's (name, usage) snapshot.
    pub fn new(entries: Vec<(&'static str, &'static str)>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl Command for HelpCommand {
    fn usage(&self) -> &'static str {
        Self::USAGE
    }

    async fn execute(&self, console: &mut Console, args: &[&str]) -> CommandResult {
        match args {
            [] => {
                console.output().line("Commands:");
                for (_, usage) in &self.entries {
                    console.output().line(format!("  {}", usage));
                }
                Ok(())
            }
            [name] => match self.entries.iter().find(|(n, _)| n == name) {
                Some((_, usage)) => {
                    console.output().line(format!("Usage: {}", usage));
                    Ok(())
                }
                None => {
                    console.output().line("error: Unknown command");
                    Ok(())
                }
            },
            _ => Err(CommandError::Usage),
        }
    }
}
