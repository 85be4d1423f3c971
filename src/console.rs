//! The console run loop and session lifecycle.
//!
//! One logical task drives the loop: read one line, dispatch it, repeat.
//! The closed flag is checked before every line, so nothing is dispatched
//! once the console is closed, and every exit path (the `exit` command,
//! end of input, script exhaustion) funnels through the single idempotent
//! [`Console::close`].

use std::sync::Arc;

use tracing::{debug, info};

use crate::commands::Registry;
use crate::error::CommandError;
use crate::input::LineSource;
use crate::output::Output;
use crate::session::Session;
use crate::store::MessageStore;

/// The console aggregate: the live session, the shared message store, the
/// operator output sink, and the one-way closed flag.
pub struct Console {
    session: Arc<Session>,
    store: Arc<MessageStore>,
    registry: Arc<Registry>,
    output: Output,
    closed: bool,
}

impl Console {
    /// Wire up a console around an open session.
    pub fn new(session: Arc<Session>, store: Arc<MessageStore>, output: Output) -> Self {
        Self {
            session,
            store,
            registry: Arc::new(Registry::new()),
            output,
            closed: false,
        }
    }

    /// The active session.
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// The shared message store.
    pub fn store(&self) -> &Arc<MessageStore> {
        &self.store
    }

    /// The command registry.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// The operator output sink.
    pub fn output(&self) -> &Output {
        &self.output
    }

    /// Whether the console has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Drive the loop over the given line source until the console closes
    /// or input ends. Scripted lines are echoed as `< line` so scripted
    /// runs stay legible in a transcript.
    pub async fn run(&mut self, mut lines: LineSource) -> anyhow::Result<()> {
        if !lines.has_script() {
            self.output.line("Type 'help' for help.");
        }

        while !self.is_closed() {
            let Some(line) = lines.next().await? else {
                break;
            };
            if line.scripted {
                self.output.line(format!("< {}", line.text));
            }
            self.execute(&line.text).await?;
        }

        self.close().await;
        Ok(())
    }

    /// Parse and dispatch one line.
    ///
    /// Comments and blank lines are skipped. An unknown command, a
    /// malformed invocation, and a closed connection are reported and
    /// absorbed; the loop continues. A ConnectionClosed failure does not
    /// flip the closed flag: the operator may keep issuing commands (for
    /// example `messages`) against the broken session, and termination
    /// stays with `exit` or end-of-input. Any other failure is fatal and
    /// propagates.
    pub async fn execute(&mut self, line: &str) -> anyhow::Result<()> {
        let trimmed = line.trim();
        if trimmed.starts_with('#') {
            return Ok(());
        }

        let mut tokens = trimmed.split_whitespace();
        let Some(name) = tokens.next() else {
            return Ok(());
        };
        let args: Vec<&str> = tokens.collect();

        let registry = Arc::clone(&self.registry);
        let Some(command) = registry.find(name) else {
            debug!(
                command = name,
                suggestions = ?registry.complete(name),
                "unknown command"
            );
            self.output.line("error: Unknown command");
            return Ok(());
        };

        match command.execute(self, &args).await {
            Ok(()) => Ok(()),
            Err(err @ CommandError::Usage) => {
                debug!(command = name, code = err.error_code(), "command failed");
                self.output.line(format!("Usage: {}", command.usage()));
                Ok(())
            }
            Err(err @ CommandError::ConnectionClosed) => {
                debug!(command = name, code = err.error_code(), "command failed");
                self.output.line("error: Connection closed");
                Ok(())
            }
            Err(CommandError::Internal(e)) => Err(e),
        }
    }

    /// Close the console: close the session and set the flag. Idempotent;
    /// the flag never reverts, and the session close itself is a no-op the
    /// second time.
    pub async fn close(&mut self) {
        if self.closed {
            return;
        }
        self.session.close().await;
        self.closed = true;
        info!("console closed");
    }
}
