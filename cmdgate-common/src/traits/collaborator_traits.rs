use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use futures_util::future::BoxFuture;
use crate::error::Error;
use crate::models::{ChannelId, InvokerId, RawCommandDefinition, SettingsCategory};

/// Produces the raw command definitions for one load pass.
#[async_trait]
pub trait CommandSource: Send + Sync {
    async fn discover(&self) -> Result<Vec<RawCommandDefinition>, Error>;
}

/// Read side of the settings subsystem. Names are fully qualified (`commands/ping_enabled`).
#[async_trait]
pub trait SettingsResolver: Send + Sync {
    async fn resolve_boolean(&self, scope: &ChannelId, name: &str) -> Result<bool, Error>;

    async fn resolve_many(
        &self,
        scope: &ChannelId,
        names: &[String],
    ) -> Result<HashMap<String, bool>, Error> {
        let mut resolved = HashMap::with_capacity(names.len());
        for name in names {
            let value = self.resolve_boolean(scope, name).await?;
            resolved.insert(name.clone(), value);
        }
        Ok(resolved)
    }
}

/// Write side, used only by the channel restriction built-ins.
#[async_trait]
pub trait SettingsWriter: Send + Sync {
    async fn set_boolean(&self, scope: &ChannelId, name: &str, value: bool) -> Result<(), Error>;
}

/// Where the manager publishes its settings categories after every load, so newly loaded
/// toggles resolve to their registered defaults.
pub trait SettingsRegistry: Send + Sync {
    fn register_categories(&self, categories: &[SettingsCategory], separator: &str);
}

/// Identity checks. These are answered from data the transport already has, so they never suspend.
pub trait PermissionResolver: Send + Sync {
    fn is_bot_admin(&self, invoker: &InvokerId) -> bool;
    fn is_scope_admin(&self, invoker: &InvokerId, guild_id: &str) -> bool;
    /// Display name of the role that grants server admin rights, if one is configured.
    fn admin_role_name(&self) -> Option<String>;
}

#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn send(&self, destination: &ChannelId, text: &str) -> Result<(), Error>;
    /// Sends and schedules removal of the message after the sink's delay.
    async fn send_and_auto_delete(&self, destination: &ChannelId, text: &str) -> Result<(), Error>;
}

pub trait InvocationLogger: Send + Sync {
    fn record_attempt(&self, tag: &str, raw_input: &str, success: bool, description: &str);
    fn record_failure(&self, tag: &str, message: &str, cause: Option<&anyhow::Error>);
}

/// Invokers whose input is never executed.
pub trait BanList: Send + Sync {
    fn is_banned(&self, invoker: &InvokerId) -> bool;
    /// Returns false if the invoker was already banned.
    fn ban(&self, invoker: &InvokerId) -> bool;
    /// Returns false if the invoker was not banned.
    fn unban(&self, invoker: &InvokerId) -> bool;
}

/// What the reload built-in calls.
pub type ReloadTrigger = Arc<dyn Fn() -> BoxFuture<'static, Result<(), Error>> + Send + Sync>;
