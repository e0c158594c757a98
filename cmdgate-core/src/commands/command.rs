// File: cmdgate-core/src/commands/command.rs
//! A validated command and its gate pipeline.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::time::Instant;
use tracing::debug;
use cmdgate_common::ValidationError;
use cmdgate_common::models::{InvocationContext, InvokerId, ScopeKind, SettingDescriptor, SettingKind};
use crate::commands::actions::{CommandAction, Invocation};
use crate::commands::definition::CommandDefinition;
use crate::commands::environment::CommandEnvironment;
use crate::commands::failure::{self, CommandFailure};

/// Settings category holding the per-command enablement toggles.
pub const COMMANDS_SETTINGS_CATEGORY: &str = "commands";

/// Ledger size above which stale entries are dropped on the next pass.
const LEDGER_PRUNE_THRESHOLD: usize = 1000;

pub struct Command {
    aliases: Vec<String>,
    unique_id: Option<String>,
    server_admin_only: bool,
    bot_admin_only: bool,
    only_in_server: bool,
    can_be_channel_restricted: bool,
    cooldown_seconds: f64,
    cooldown: Duration,
    required_settings: Vec<String>,
    /// `commands/<unique_id>_enabled`, present iff channel-restrictable.
    enabled_setting: Option<String>,
    action: Arc<dyn CommandAction>,
    last_invocation: DashMap<InvokerId, Instant>,
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("aliases", &self.aliases)
            .field("unique_id", &self.unique_id)
            .field("cooldown_seconds", &self.cooldown_seconds)
            .finish_non_exhaustive()
    }
}

impl Command {
    /// Validates `definition`. `separator` is the settings category separator; it may not
    /// appear in the unique id since the id becomes part of a setting name.
    pub fn new(definition: CommandDefinition, separator: &str) -> Result<Self, ValidationError> {
        let CommandDefinition {
            aliases,
            unique_id,
            server_admin_only,
            bot_admin_only,
            only_in_server,
            can_be_channel_restricted,
            cooldown_seconds,
            required_settings,
            action,
        } = definition;

        if aliases.is_empty() {
            return Err(ValidationError::NoAliases);
        }
        if aliases.iter().any(|a| a.is_empty()) {
            return Err(ValidationError::InvalidAlias);
        }
        let aliases: Vec<String> = aliases.iter().map(|a| a.to_lowercase()).collect();

        let action = action.ok_or(ValidationError::NoAction)?;

        if !cooldown_seconds.is_finite() {
            return Err(ValidationError::InvalidCooldown);
        }
        if cooldown_seconds < 0.0 {
            return Err(ValidationError::NegativeCooldown);
        }
        let cooldown = Duration::try_from_secs_f64(cooldown_seconds)
            .map_err(|_| ValidationError::InvalidCooldown)?;

        let can_be_channel_restricted = can_be_channel_restricted.unwrap_or(!bot_admin_only);
        if can_be_channel_restricted && unique_id.is_none() {
            return Err(ValidationError::NeedsUniqueId);
        }
        if let Some(id) = &unique_id {
            if !separator.is_empty() && id.contains(separator) {
                return Err(ValidationError::UniqueIdContainsSeparator {
                    id: id.clone(),
                    separator: separator.to_string(),
                });
            }
        }

        if required_settings.iter().any(|s| s.is_empty()) {
            return Err(ValidationError::NonStringSetting);
        }

        let enabled_setting = match (&unique_id, can_be_channel_restricted) {
            (Some(id), true) => Some(format!(
                "{}{}{}",
                COMMANDS_SETTINGS_CATEGORY,
                separator,
                enabled_setting_name(id)
            )),
            _ => None,
        };

        Ok(Self {
            aliases,
            unique_id,
            server_admin_only,
            bot_admin_only,
            only_in_server,
            can_be_channel_restricted,
            cooldown_seconds,
            cooldown,
            required_settings,
            enabled_setting,
            action,
            last_invocation: DashMap::new(),
        })
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn primary_alias(&self) -> &str {
        &self.aliases[0]
    }

    pub fn has_alias(&self, alias: &str) -> bool {
        self.aliases.iter().any(|a| a == alias)
    }

    pub fn unique_id(&self) -> Option<&str> {
        self.unique_id.as_deref()
    }

    pub fn is_server_admin_only(&self) -> bool {
        self.server_admin_only
    }

    pub fn is_bot_admin_only(&self) -> bool {
        self.bot_admin_only
    }

    pub fn is_only_in_server(&self) -> bool {
        self.only_in_server
    }

    pub fn can_be_channel_restricted(&self) -> bool {
        self.can_be_channel_restricted
    }

    pub fn cooldown_seconds(&self) -> f64 {
        self.cooldown_seconds
    }

    pub fn required_settings(&self) -> &[String] {
        &self.required_settings
    }

    /// Fully qualified name of the enablement toggle, if the command has one.
    pub fn enabled_setting(&self) -> Option<&str> {
        self.enabled_setting.as_deref()
    }

    /// The toggle this command registers with the settings subsystem.
    /// `None` for commands that can't be restricted per channel.
    pub fn create_enablement_descriptor(&self) -> Option<SettingDescriptor> {
        if !self.can_be_channel_restricted {
            return None;
        }
        let id = self.unique_id.as_deref()?;
        Some(SettingDescriptor {
            name: enabled_setting_name(id),
            kind: SettingKind::Boolean,
            default_value: true,
            description: format!(
                "This setting controls whether the {} command (and all of its aliases) is allowed to be used or not.",
                self.primary_alias()
            ),
        })
    }

    /// Runs every gate, then the handler.
    pub async fn attempt_invoke(
        &self,
        context: &InvocationContext,
        suffix: &str,
        env: &CommandEnvironment,
    ) -> Result<(), CommandFailure> {
        self.check_admission(context, env)?;
        self.run_admitted(context, suffix, env).await
    }

    /// The synchronous gates: cooldown, bot admin, scope, server admin.
    ///
    /// The cooldown entry is written here, so callers must run this before anything for the
    /// same invocation suspends.
    pub fn check_admission(
        &self,
        context: &InvocationContext,
        env: &CommandEnvironment,
    ) -> Result<(), CommandFailure> {
        self.check_cooldown(context)?;

        if self.bot_admin_only && !env.permissions.is_bot_admin(&context.invoker) {
            return Err(failure::only_bot_admin());
        }

        if self.only_in_server && context.scope_kind() == ScopeKind::Direct {
            return Err(failure::only_in_server());
        }

        if self.server_admin_only {
            if let Some(guild_id) = context.scope.guild_id() {
                if !is_server_admin(context, guild_id, env) {
                    let role = env.permissions.admin_role_name();
                    return Err(failure::must_be_server_admin(role.as_deref()));
                }
            }
        }

        Ok(())
    }

    /// The settings gates and the handler. Expects `check_admission` to have passed.
    pub async fn run_admitted(
        &self,
        context: &InvocationContext,
        suffix: &str,
        env: &CommandEnvironment,
    ) -> Result<(), CommandFailure> {
        if let Some(setting) = &self.enabled_setting {
            if !env.settings.resolve_boolean(&context.channel, setting).await? {
                return Err(failure::command_disabled());
            }
        }

        let settings = if self.required_settings.is_empty() {
            HashMap::new()
        } else {
            env.settings
                .resolve_many(&context.channel, &self.required_settings)
                .await?
        };
        for name in &self.required_settings {
            if !settings.get(name).copied().unwrap_or(false) {
                return Err(failure::required_setting_off(name));
            }
        }

        let invocation = Invocation {
            context,
            suffix,
            settings: &settings,
            env,
        };
        self.action.invoke(&invocation).await
    }

    fn check_cooldown(&self, context: &InvocationContext) -> Result<(), CommandFailure> {
        if self.cooldown.is_zero() {
            return Ok(());
        }

        let now = Instant::now();
        match self.last_invocation.entry(context.invoker.clone()) {
            Entry::Occupied(mut last) => {
                if now.duration_since(*last.get()) < self.cooldown {
                    debug!(
                        "'{}' not cooled down for invoker {}",
                        self.primary_alias(),
                        context.invoker
                    );
                    return Err(failure::not_cooled_down(&context.invoker_name, self.cooldown_seconds));
                }
                last.insert(now);
            }
            Entry::Vacant(slot) => {
                slot.insert(now);
            }
        }

        if self.last_invocation.len() > LEDGER_PRUNE_THRESHOLD {
            self.prune_cooldowns();
        }
        Ok(())
    }

    /// Drops ledger entries old enough that they can no longer block anyone.
    pub fn prune_cooldowns(&self) {
        let now = Instant::now();
        let cooldown = self.cooldown;
        self.last_invocation
            .retain(|_, last| now.duration_since(*last) < cooldown);
    }

    pub fn cooldown_ledger_len(&self) -> usize {
        self.last_invocation.len()
    }
}

fn enabled_setting_name(unique_id: &str) -> String {
    format!("{}_enabled", unique_id)
}

/// Elevated permission, the configured admin role, or the resolver's own say-so.
fn is_server_admin(context: &InvocationContext, guild_id: &str, env: &CommandEnvironment) -> bool {
    if context.elevated {
        return true;
    }
    if let Some(role) = env.permissions.admin_role_name() {
        if context.has_role(&role) {
            return true;
        }
    }
    env.permissions.is_scope_admin(&context.invoker, guild_id)
}
