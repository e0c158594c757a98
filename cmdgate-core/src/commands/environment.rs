use std::sync::Arc;
use cmdgate_common::traits::{
    BanList, InvocationLogger, MessageSink, PermissionResolver, SettingsResolver, SettingsWriter,
};
use crate::config::CommandConfig;

/// Every collaborator the command pipeline and its handlers talk to.
/// Cloned into each spawned invocation, so keep everything behind an `Arc`.
#[derive(Clone)]
pub struct CommandEnvironment {
    pub config: Arc<CommandConfig>,
    pub settings: Arc<dyn SettingsResolver>,
    pub settings_writer: Arc<dyn SettingsWriter>,
    pub permissions: Arc<dyn PermissionResolver>,
    pub sink: Arc<dyn MessageSink>,
    pub logger: Arc<dyn InvocationLogger>,
    pub bans: Arc<dyn BanList>,
}

impl CommandEnvironment {
    pub fn new(
        config: Arc<CommandConfig>,
        settings: Arc<dyn SettingsResolver>,
        settings_writer: Arc<dyn SettingsWriter>,
        permissions: Arc<dyn PermissionResolver>,
        sink: Arc<dyn MessageSink>,
        logger: Arc<dyn InvocationLogger>,
        bans: Arc<dyn BanList>,
    ) -> Self {
        Self {
            config,
            settings,
            settings_writer,
            permissions,
            sink,
            logger,
            bans,
        }
    }

    pub fn separator(&self) -> &str {
        &self.config.settings_category_separator
    }
}
