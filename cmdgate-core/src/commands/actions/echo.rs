use async_trait::async_trait;
use crate::commands::actions::{CommandAction, Invocation};
use crate::commands::failure::CommandFailure;

/// Repeats whatever followed the alias.
pub struct EchoAction;

#[async_trait]
impl CommandAction for EchoAction {
    async fn invoke(&self, invocation: &Invocation<'_>) -> Result<(), CommandFailure> {
        if invocation.suffix.is_empty() {
            return Err(CommandFailure::custom(
                "Say something after the command and I'll repeat it.",
                true,
                "Nothing to echo",
            ));
        }
        invocation.reply(invocation.suffix).await
    }
}
