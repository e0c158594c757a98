// ================================================================
// File: cmdgate-common/src/error.rs
// ================================================================

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Not found error: {0}")]
    NotFound(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Messaging error: {0}")]
    Messaging(String),

    #[error("Discovery error: {0}")]
    Discovery(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid command definition: {0}")]
    Validation(#[from] ValidationError),
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Config(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Config(s.to_string())
    }
}

impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        Error::Discovery(e.to_string())
    }
}

/// Boolean switches a command definition may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    ServerAdminOnly,
    BotAdminOnly,
    OnlyInServer,
    CanBeChannelRestricted,
}

impl Flag {
    /// Key used for this flag in definition files.
    pub fn key(&self) -> &'static str {
        match self {
            Flag::ServerAdminOnly => "server_admin_only",
            Flag::BotAdminOnly => "bot_admin_only",
            Flag::OnlyInServer => "only_in_server",
            Flag::CanBeChannelRestricted => "can_be_channel_restricted",
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A command definition broke one of the construction rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No command data")]
    NoData,

    #[error("Command does not have command aliases.")]
    NoAliases,

    #[error("Command alias is not a string, or is an empty string.")]
    InvalidAlias,

    #[error("Command does not have an action, or it does not name a registered action.")]
    NoAction,

    #[error("Invalid {0} value")]
    InvalidFlag(Flag),

    #[error("Invalid cooldown, it's not a number")]
    InvalidCooldown,

    #[error("Cooldown is less than 0. Cannot reverse time.")]
    NegativeCooldown,

    #[error("Command can be channel restricted (explicitly or by default), but does not have a uniqueId, or its uniqueId is not a string. Commands that can be channel restricted must have a uniqueId.")]
    NeedsUniqueId,

    #[error("Command uniqueId is not a string.")]
    InvalidUniqueId,

    #[error("uniqueId '{id}' contains the settings category separator ({separator}). It must not.")]
    UniqueIdContainsSeparator { id: String, separator: String },

    #[error("Invalid value for requiredSettings. It must be a string or an array of strings.")]
    InvalidRequiredSettings,

    #[error("A required setting is not a string, or is an empty string.")]
    NonStringSetting,
}
