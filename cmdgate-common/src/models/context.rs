use std::fmt;
use serde::{Deserialize, Serialize};

/// Stable identity of whoever sent the input. Keys the cooldown ledger and the ban list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvokerId(pub String);

impl InvokerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvokerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InvokerId {
    fn from(s: &str) -> Self {
        InvokerId(s.to_string())
    }
}

impl From<String> for InvokerId {
    fn from(s: String) -> Self {
        InvokerId(s)
    }
}

/// Destination for replies, and the scope settings are resolved against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub String);

impl ChannelId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChannelId {
    fn from(s: &str) -> Self {
        ChannelId(s.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Direct,
    Group,
}

/// Where an invocation happened: a one-to-one conversation or a group ("server").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    Direct,
    Group { guild_id: String },
}

impl Scope {
    pub fn kind(&self) -> ScopeKind {
        match self {
            Scope::Direct => ScopeKind::Direct,
            Scope::Group { .. } => ScopeKind::Group,
        }
    }

    pub fn guild_id(&self) -> Option<&str> {
        match self {
            Scope::Direct => None,
            Scope::Group { guild_id } => Some(guild_id),
        }
    }
}

/// Everything the transport layer knows about one incoming message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationContext {
    pub invoker: InvokerId,
    /// Display name, used in public replies.
    pub invoker_name: String,
    pub channel: ChannelId,
    pub scope: Scope,
    /// Role names the invoker holds in the group. Empty in direct scope.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Platform-granted administrative permission in the group (e.g. "manage guild").
    #[serde(default)]
    pub elevated: bool,
}

impl InvocationContext {
    pub fn direct(invoker: impl Into<InvokerId>, invoker_name: &str, channel: &str) -> Self {
        Self {
            invoker: invoker.into(),
            invoker_name: invoker_name.to_string(),
            channel: ChannelId::from(channel),
            scope: Scope::Direct,
            roles: Vec::new(),
            elevated: false,
        }
    }

    pub fn in_group(
        invoker: impl Into<InvokerId>,
        invoker_name: &str,
        channel: &str,
        guild_id: &str,
    ) -> Self {
        Self {
            invoker: invoker.into(),
            invoker_name: invoker_name.to_string(),
            channel: ChannelId::from(channel),
            scope: Scope::Group { guild_id: guild_id.to_string() },
            roles: Vec::new(),
            elevated: false,
        }
    }

    pub fn with_roles(mut self, roles: &[&str]) -> Self {
        self.roles = roles.iter().map(|r| r.to_string()).collect();
        self
    }

    pub fn with_elevated(mut self, elevated: bool) -> Self {
        self.elevated = elevated;
        self
    }

    pub fn scope_kind(&self) -> ScopeKind {
        self.scope.kind()
    }

    pub fn has_role(&self, role_name: &str) -> bool {
        self.roles.iter().any(|r| r == role_name)
    }
}
