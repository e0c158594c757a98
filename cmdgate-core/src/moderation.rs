// File: cmdgate-core/src/moderation.rs
//! Ban list and permission lookups backed by memory and config.

use std::collections::{HashMap, HashSet};
use dashmap::DashSet;
use parking_lot::RwLock;
use tracing::debug;
use cmdgate_common::models::InvokerId;
use cmdgate_common::traits::{BanList, PermissionResolver};
use crate::config::CommandConfig;

#[derive(Debug, Default)]
pub struct InMemoryBanList {
    banned: DashSet<InvokerId>,
}

impl InMemoryBanList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.banned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.banned.is_empty()
    }
}

impl BanList for InMemoryBanList {
    fn is_banned(&self, invoker: &InvokerId) -> bool {
        self.banned.contains(invoker)
    }

    fn ban(&self, invoker: &InvokerId) -> bool {
        self.banned.insert(invoker.clone())
    }

    fn unban(&self, invoker: &InvokerId) -> bool {
        self.banned.remove(invoker).is_some()
    }
}

/// Bot admins from config, plus scope admins granted per guild at runtime.
pub struct StaticPermissions {
    bot_admins: HashSet<InvokerId>,
    scope_admins: RwLock<HashMap<String, HashSet<InvokerId>>>,
    admin_role_name: Option<String>,
}

impl StaticPermissions {
    pub fn new<I, S>(bot_admins: I, admin_role_name: Option<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<InvokerId>,
    {
        Self {
            bot_admins: bot_admins.into_iter().map(Into::into).collect(),
            scope_admins: RwLock::new(HashMap::new()),
            admin_role_name,
        }
    }

    pub fn from_config(config: &CommandConfig) -> Self {
        debug!("{} bot admin(s) configured", config.bot_admin_ids.len());
        Self::new(
            config.bot_admin_ids.iter().cloned(),
            config.server_admin_role_name.clone(),
        )
    }

    pub fn grant_scope_admin(&self, guild_id: &str, invoker: impl Into<InvokerId>) {
        self.scope_admins
            .write()
            .entry(guild_id.to_string())
            .or_default()
            .insert(invoker.into());
    }

    pub fn revoke_scope_admin(&self, guild_id: &str, invoker: &InvokerId) -> bool {
        self.scope_admins
            .write()
            .get_mut(guild_id)
            .map(|admins| admins.remove(invoker))
            .unwrap_or(false)
    }
}

impl PermissionResolver for StaticPermissions {
    fn is_bot_admin(&self, invoker: &InvokerId) -> bool {
        self.bot_admins.contains(invoker)
    }

    fn is_scope_admin(&self, invoker: &InvokerId, guild_id: &str) -> bool {
        self.scope_admins
            .read()
            .get(guild_id)
            .is_some_and(|admins| admins.contains(invoker))
    }

    fn admin_role_name(&self) -> Option<String> {
        self.admin_role_name.clone()
    }
}
