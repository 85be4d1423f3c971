//! Console commands.
//!
//! Each command is a [`Command`] implementation dispatched by name through
//! the [`Registry`]. The registry is built once at startup and never
//! mutated; lookup is exact-match and case-sensitive.

mod exit;
mod help;
mod messages;
mod send;
mod sleep;
mod wait;

pub use exit::ExitCommand;
pub use help::HelpCommand;
pub use messages::MessagesCommand;
pub use send::SendCommand;
pub use sleep::SleepCommand;
pub use wait::WaitCommand;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::console::Console;
use crate::error::CommandResult;

/// Trait implemented by all console commands.
#[async_trait]
pub trait Command: Send + Sync {
    /// Usage string, shown on a malformed invocation.
    fn usage(&self) -> &'static str;

    /// Execute the command against the console with the remaining
    /// whitespace-separated tokens of the input line.
    async fn execute(&self, console: &mut Console, args: &[&str]) -> CommandResult;
}

/// Registry of console commands, keyed by name.
pub struct Registry {
    commands: HashMap<&'static str, Box<dyn Command>>,
}

impl Registry {
    /// Create a registry with all commands registered.
    pub fn new() -> Self {
        let mut commands: HashMap<&'static str, Box<dyn Command>> = HashMap::new();

        commands.insert("exit", Box::new(ExitCommand));
        commands.insert("messages", Box::new(MessagesCommand));
        commands.insert("send", Box::new(SendCommand));
        commands.insert("sleep", Box::new(SleepCommand));
        commands.insert("wait", Box::new(WaitCommand));

        // The help command carries a snapshot of every (name, usage) pair,
        // including its own.
        let mut entries: Vec<(&'static str, &'static str)> = commands
            .iter()
            .map(|(name, command)| (*name, command.usage()))
            .collect();
        entries.push(("help", HelpCommand::USAGE));
        entries.sort_by_key(|(name, _)| *name);
        commands.insert("help", Box::new(HelpCommand::new(entries)));

        Self { commands }
    }

    /// Look up a command by name. Absent is not an error; callers decide
    /// how to report an unknown command.
    pub fn find(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|boxed| boxed.as_ref())
    }

    /// All registered command names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.commands.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Advisory prefix-completion suggestions, sorted.
    pub fn complete(&self, prefix: &str) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self
            .commands
            .keys()
            .copied()
            .filter(|name| name.starts_with(prefix))
            .collect();
        names.sort_unstable();
        names
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_is_exact_and_case_sensitive() {
        let registry = Registry::new();
        assert!(registry.find("help").is_some());
        assert!(registry.find("HELP").is_none());
        assert!(registry.find("hel").is_none());
        assert!(registry.find("bogus").is_none());
    }

    #[test]
    fn test_names_are_sorted() {
        let registry = Registry::new();
        assert_eq!(
            registry.names(),
            vec!["exit", "help", "messages", "send", "sleep", "wait"]
        );
    }

    #[test]
    fn test_complete_filters_by_prefix() {
        let registry = Registry::new();
        assert_eq!(registry.complete("s"), vec!["send", "sleep"]);
        assert_eq!(registry.complete("wait"), vec!["wait"]);
        assert!(registry.complete("z").is_empty());
        assert_eq!(registry.complete("").len(), 6);
    }
}
