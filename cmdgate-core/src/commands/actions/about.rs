use async_trait::async_trait;
use crate::commands::actions::{CommandAction, Invocation};
use crate::commands::failure::CommandFailure;

pub struct AboutAction;

#[async_trait]
impl CommandAction for AboutAction {
    async fn invoke(&self, invocation: &Invocation<'_>) -> Result<(), CommandFailure> {
        let text = format!(
            "{} v{}. Commands are gated by cooldowns, admin checks and per-channel settings.",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
        );
        invocation.reply(&text).await
    }
}
