// File: cmdgate-core/src/commands/builtin/mod.rs
//! Administrative commands the manager appends after the user-defined ones.
//! Each works over the snapshot of user commands taken during the load that created it.

pub mod allow;
pub mod ban;
pub mod reload;
pub mod unrestrict;

use std::sync::Arc;
use tracing::warn;
use cmdgate_common::traits::ReloadTrigger;
use crate::commands::actions::Invocation;
use crate::commands::command::Command;
use crate::commands::definition::CommandDefinition;
use crate::commands::failure::CommandFailure;
use crate::config::CommandConfig;

/// Aliases of the built-ins, in the order they are appended.
struct BuiltinAliases {
    allow: String,
    unrestrict: String,
    ban: String,
    unban: String,
    reload: String,
}

impl BuiltinAliases {
    fn new(config: &CommandConfig) -> Self {
        Self {
            allow: format!("{}allow", config.builtin_prefix).to_lowercase(),
            unrestrict: format!("{}unrestrict", config.builtin_prefix).to_lowercase(),
            ban: format!("{}ban", config.bot_admin_prefix).to_lowercase(),
            unban: format!("{}unban", config.bot_admin_prefix).to_lowercase(),
            reload: format!("{}reload", config.bot_admin_prefix).to_lowercase(),
        }
    }
}

/// Every alias a built-in will claim. User definitions may not use these.
pub fn builtin_aliases(config: &CommandConfig, with_reload: bool) -> Vec<String> {
    let BuiltinAliases { allow, unrestrict, ban, unban, reload } = BuiltinAliases::new(config);
    let mut aliases = vec![allow, unrestrict, ban, unban];
    if with_reload {
        aliases.push(reload);
    }
    aliases
}

pub fn builtin_definitions(
    user_commands: &Arc<[Arc<Command>]>,
    config: &CommandConfig,
    reload_trigger: Option<ReloadTrigger>,
) -> Vec<CommandDefinition> {
    let aliases = BuiltinAliases::new(config);

    let mut definitions = vec![
        CommandDefinition::new(
            &[aliases.allow.as_str()],
            Arc::new(allow::AllowAction::new(user_commands.clone())),
        )
        .server_admin_only()
        .only_in_server()
        .channel_restricted(false),
        CommandDefinition::new(
            &[aliases.unrestrict.as_str()],
            Arc::new(unrestrict::UnrestrictAction::new(user_commands.clone())),
        )
        .server_admin_only()
        .only_in_server()
        .channel_restricted(false),
        CommandDefinition::new(&[aliases.ban.as_str()], Arc::new(ban::BanAction::ban())).bot_admin_only(),
        CommandDefinition::new(&[aliases.unban.as_str()], Arc::new(ban::BanAction::unban()))
            .bot_admin_only(),
    ];

    if let Some(trigger) = reload_trigger {
        definitions.push(
            CommandDefinition::new(&[aliases.reload.as_str()], Arc::new(reload::ReloadAction::new(trigger)))
                .bot_admin_only(),
        );
    }

    definitions
}

/// User commands whose enablement can be toggled per channel.
pub(crate) fn restrictable(user_commands: &[Arc<Command>]) -> impl Iterator<Item = &Arc<Command>> {
    user_commands
        .iter()
        .filter(|c| c.enabled_setting().is_some())
}

/// Writes each command's enablement toggle in the invoking channel. Every write is attempted;
/// if some fail, the reply names the commands left unchanged.
pub(crate) async fn apply_toggles(
    invocation: &Invocation<'_>,
    toggles: &[(&Arc<Command>, bool)],
) -> Result<(), CommandFailure> {
    let channel = &invocation.context.channel;
    let mut unchanged: Vec<&str> = Vec::new();
    let mut first_error = None;

    for (command, enabled) in toggles {
        let Some(setting) = command.enabled_setting() else {
            continue;
        };
        if let Err(e) = invocation
            .env
            .settings_writer
            .set_boolean(channel, setting, *enabled)
            .await
        {
            warn!("Could not set {} in {}: {}", setting, channel, e);
            unchanged.push(command.primary_alias());
            if first_error.is_none() {
                first_error = Some(e);
            }
        }
    }

    match first_error {
        None => Ok(()),
        Some(e) => Err(CommandFailure::custom(
            format!(
                "Only part of that change was applied. These commands were not updated: {}",
                unchanged.join(", ")
            ),
            false,
            "Partial channel restriction",
        )
        .with_internal(e)),
    }
}
