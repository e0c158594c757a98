use std::collections::HashSet;
use std::sync::Arc;
use async_trait::async_trait;
use tracing::info;
use crate::commands::actions::{CommandAction, Invocation};
use crate::commands::builtin::{apply_toggles, restrictable};
use crate::commands::command::Command;
use crate::commands::failure::CommandFailure;

/// `]allow <alias>...`: the named commands stay enabled in this channel, every other
/// restrictable command is disabled.
pub struct AllowAction {
    user_commands: Arc<[Arc<Command>]>,
}

impl AllowAction {
    pub fn new(user_commands: Arc<[Arc<Command>]>) -> Self {
        Self { user_commands }
    }
}

#[async_trait]
impl CommandAction for AllowAction {
    async fn invoke(&self, invocation: &Invocation<'_>) -> Result<(), CommandFailure> {
        let prefix = &invocation.env.config.builtin_prefix;
        let requested: Vec<String> = invocation
            .suffix
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();

        if requested.is_empty() {
            return Err(CommandFailure::custom(
                format!(
                    "Say {}allow followed by the commands to keep enabled in this channel, e.g. {}allow ping echo",
                    prefix, prefix
                ),
                true,
                "No commands given",
            ));
        }

        let mut allowed: Vec<&Arc<Command>> = Vec::new();
        let mut unknown: Vec<&str> = Vec::new();
        for alias in &requested {
            match self.user_commands.iter().find(|c| c.has_alias(alias)) {
                Some(command) => allowed.push(command),
                None => unknown.push(alias),
            }
        }

        if !unknown.is_empty() {
            return Err(CommandFailure::custom(
                format!("I don't know these commands: {}", unknown.join(", ")),
                true,
                "Unknown commands",
            ));
        }

        let allowed_settings: HashSet<&str> = allowed
            .iter()
            .filter_map(|c| c.enabled_setting())
            .collect();

        let toggles: Vec<(&Arc<Command>, bool)> = restrictable(&self.user_commands)
            .map(|command| {
                let enabled = command
                    .enabled_setting()
                    .is_some_and(|setting| allowed_settings.contains(setting));
                (command, enabled)
            })
            .collect();
        apply_toggles(invocation, &toggles).await?;

        let channel = &invocation.context.channel;
        info!(
            "Channel {} restricted to {} command(s) by {}",
            channel,
            allowed.len(),
            invocation.context.invoker
        );

        let names: Vec<&str> = allowed.iter().map(|c| c.primary_alias()).collect();
        invocation
            .reply(&format!(
                "Only these commands can be used in this channel now: {}. Say {}unrestrict to allow everything again.",
                names.join(", "),
                prefix
            ))
            .await
    }
}
