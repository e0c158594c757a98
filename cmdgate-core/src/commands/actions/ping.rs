use async_trait::async_trait;
use crate::commands::actions::{CommandAction, Invocation};
use crate::commands::failure::CommandFailure;

pub struct PingAction;

#[async_trait]
impl CommandAction for PingAction {
    async fn invoke(&self, invocation: &Invocation<'_>) -> Result<(), CommandFailure> {
        invocation.reply("pong").await
    }
}
