use std::sync::Arc;
use async_trait::async_trait;
use tracing::info;
use crate::commands::actions::{CommandAction, Invocation};
use crate::commands::builtin::{apply_toggles, restrictable};
use crate::commands::command::Command;
use crate::commands::failure::CommandFailure;

/// `]unrestrict`: re-enables every restrictable command in this channel.
pub struct UnrestrictAction {
    user_commands: Arc<[Arc<Command>]>,
}

impl UnrestrictAction {
    pub fn new(user_commands: Arc<[Arc<Command>]>) -> Self {
        Self { user_commands }
    }
}

#[async_trait]
impl CommandAction for UnrestrictAction {
    async fn invoke(&self, invocation: &Invocation<'_>) -> Result<(), CommandFailure> {
        let toggles: Vec<(&Arc<Command>, bool)> = restrictable(&self.user_commands)
            .map(|command| (command, true))
            .collect();
        apply_toggles(invocation, &toggles).await?;

        info!(
            "Re-enabled {} command(s) in channel {}",
            toggles.len(),
            invocation.context.channel
        );
        invocation
            .reply("All commands can be used in this channel again.")
            .await
    }
}
