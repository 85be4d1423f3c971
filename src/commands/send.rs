//! The `send` command: build a message from tag=value fields and send it.

use async_trait::async_trait;
use fixterm_wire::FixMessage;

use super::Command;
use crate::console::Console;
use crate::error::{CommandError, CommandResult};

/// Sends one application message.
///
/// The argument is the operator text form: pipe-separated `tag=value`
/// fields, e.g. `send 35=D|55=ACME|44=10`. MsgType(35) is required; the
/// session stamps the rest of the standard header.
pub struct SendCommand;

#[async_trait]
impl Command for SendCommand {
    fn usage(&self) -> &'static str {
        "send <message>"
    }

    async fn execute(&self, console: &mut Console, args: &[&str]) -> CommandResult {
        let [text] = args else {
            return Err(CommandError::Usage);
        };
        let msg: FixMessage = text.parse().map_err(|_| CommandError::Usage)?;
        if msg.msg_type().is_none() {
            return Err(CommandError::Usage);
        }
        console.session().send(msg).await?;
        Ok(())
    }
}
