// File: cmdgate-core/src/commands/failure.rs
//! Classification of a failed invocation: what (if anything) the invoker sees, and what
//! gets logged.

use thiserror::Error;
use crate::Error;
use crate::config::CommandConfig;

/// Log description used when a failure doesn't carry its own.
pub const GENERIC_ERROR_DESCRIPTION: &str = "Error";

/// Substring platforms put in errors raised when the bot lacks a permission.
pub const MISSING_PERMISSIONS_MARKER: &str = "Missing Permissions";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicMessage {
    None,
    Generic,
    InsufficientPrivilege,
    Custom(String),
}

/// Which step of the pipeline produced the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NotCooledDown,
    OnlyBotAdmin,
    OnlyInServer,
    MustBeServerAdmin,
    CommandDisabled,
    RequiredSettingOff,
    Action,
}

#[derive(Debug, Error)]
#[error("{}", describe(.log_description))]
pub struct CommandFailure {
    kind: FailureKind,
    public: PublicMessage,
    auto_delete: bool,
    log_description: Option<String>,
    internal: Option<anyhow::Error>,
}

fn describe(log_description: &Option<String>) -> &str {
    log_description.as_deref().unwrap_or(GENERIC_ERROR_DESCRIPTION)
}

impl CommandFailure {
    fn new(public: PublicMessage, auto_delete: bool, log_description: Option<String>) -> Self {
        Self {
            kind: FailureKind::Action,
            public,
            auto_delete,
            log_description,
            internal: None,
        }
    }

    /// The invoker sees `message`.
    pub fn custom(message: impl Into<String>, auto_delete: bool, log_description: &str) -> Self {
        Self::new(
            PublicMessage::Custom(message.into()),
            auto_delete,
            Some(log_description.to_string()),
        )
    }

    /// The invoker sees the configured generic error message.
    pub fn generic(auto_delete: bool, log_description: &str) -> Self {
        Self::new(PublicMessage::Generic, auto_delete, Some(log_description.to_string()))
    }

    /// Nothing is sent; the attempt is only logged.
    pub fn silent(log_description: &str) -> Self {
        Self::new(PublicMessage::None, false, Some(log_description.to_string()))
    }

    /// Classifies an unexpected error. Permission errors raised by the platform surface as
    /// insufficient privilege, everything else as generic. The cause is kept for logging only.
    pub fn from_internal(err: impl Into<anyhow::Error>) -> Self {
        let err = err.into();
        let missing_permissions = err
            .chain()
            .any(|cause| cause.to_string().contains(MISSING_PERMISSIONS_MARKER));
        let failure = if missing_permissions {
            Self::new(
                PublicMessage::InsufficientPrivilege,
                false,
                Some("Missing permissions".to_string()),
            )
        } else {
            Self::new(PublicMessage::Generic, false, None)
        };
        failure.with_internal(err)
    }

    pub fn with_internal(mut self, err: impl Into<anyhow::Error>) -> Self {
        self.internal = Some(err.into());
        self
    }

    pub fn with_kind(mut self, kind: FailureKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn public(&self) -> &PublicMessage {
        &self.public
    }

    pub fn auto_delete(&self) -> bool {
        self.auto_delete
    }

    pub fn log_description(&self) -> &str {
        describe(&self.log_description)
    }

    pub fn internal(&self) -> Option<&anyhow::Error> {
        self.internal.as_ref()
    }

    /// Text to send to the invoker, with generic categories replaced by configured messages.
    pub fn public_text(&self, config: &CommandConfig) -> Option<String> {
        let text = match &self.public {
            PublicMessage::None => None,
            PublicMessage::Generic => config.generic_error_message.clone(),
            PublicMessage::InsufficientPrivilege => config.missing_permissions_error_message.clone(),
            PublicMessage::Custom(text) => Some(text.clone()),
        };
        text.filter(|t| !t.is_empty())
    }
}

impl From<Error> for CommandFailure {
    fn from(err: Error) -> Self {
        CommandFailure::from_internal(err)
    }
}

// Gate failures. Wording is what invokers see.

pub(crate) fn not_cooled_down(invoker_name: &str, cooldown_seconds: f64) -> CommandFailure {
    CommandFailure::custom(
        format!("{}, that command has a {} second cooldown.", invoker_name, cooldown_seconds),
        true,
        "Not cooled down",
    )
    .with_kind(FailureKind::NotCooledDown)
}

pub(crate) fn only_bot_admin() -> CommandFailure {
    CommandFailure::custom(
        "Only a bot admin can use that command.",
        true,
        "User is not a bot admin",
    )
    .with_kind(FailureKind::OnlyBotAdmin)
}

pub(crate) fn only_in_server() -> CommandFailure {
    CommandFailure::custom(
        "That command can only be used in a server.",
        true,
        "Not in a server",
    )
    .with_kind(FailureKind::OnlyInServer)
}

pub(crate) fn must_be_server_admin(admin_role_name: Option<&str>) -> CommandFailure {
    let mut message = String::from("You must be a server admin ");
    if let Some(role) = admin_role_name {
        message.push_str(&format!("or have a role called '{}' ", role));
    }
    message.push_str("in order to do that.");
    CommandFailure::custom(message, true, "User is not a server admin")
        .with_kind(FailureKind::MustBeServerAdmin)
}

pub(crate) fn command_disabled() -> CommandFailure {
    CommandFailure::custom(
        "That command is disabled in this channel.",
        true,
        "Command disabled",
    )
    .with_kind(FailureKind::CommandDisabled)
}

pub(crate) fn required_setting_off(setting: &str) -> CommandFailure {
    CommandFailure::silent(&format!("Required setting {} is off", setting))
        .with_kind(FailureKind::RequiredSettingOff)
}
