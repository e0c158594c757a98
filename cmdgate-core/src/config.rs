// File: cmdgate-core/src/config.rs
//! Configuration for the command subsystem. Every field has a default, so an empty
//! JSON object is a valid config file.

use std::path::Path;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::Error;

const ENV_PREFIX: &str = "CMDGATE_";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandConfig {
    /// Sent when a failure is classified as generic.
    pub generic_error_message: Option<String>,
    /// Sent when a failure is classified as insufficient privilege.
    pub missing_permissions_error_message: Option<String>,
    pub settings_category_separator: String,
    /// Prefix of the server-admin built-ins (`]allow`, `]unrestrict`).
    pub builtin_prefix: String,
    /// Prefix of the bot-admin built-ins (`}ban`, `}unban`, `}reload`).
    pub bot_admin_prefix: String,
    pub bot_admin_ids: Vec<String>,
    pub server_admin_role_name: Option<String>,
    /// How long auto-deleted replies stay visible. Sinks read this.
    pub auto_delete_seconds: u64,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            generic_error_message: Some(
                "Sorry, there was an error with that command. It has been logged and will be addressed.".to_string(),
            ),
            missing_permissions_error_message: Some(
                "I do not have permission to reply to that command in this channel.".to_string(),
            ),
            settings_category_separator: "/".to_string(),
            builtin_prefix: "]".to_string(),
            bot_admin_prefix: "}".to_string(),
            bot_admin_ids: Vec::new(),
            server_admin_role_name: Some("Server Admin".to_string()),
            auto_delete_seconds: 6,
        }
    }
}

impl CommandConfig {
    pub fn from_json_str(text: &str) -> Result<Self, Error> {
        let config: CommandConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, Error> {
        debug!("Loading command config from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Applies `CMDGATE_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, Error> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`, which maps a full variable name to its value.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

        if let Some(v) = var("GENERIC_ERROR_MESSAGE") {
            self.generic_error_message = non_empty(v);
        }
        if let Some(v) = var("MISSING_PERMISSIONS_ERROR_MESSAGE") {
            self.missing_permissions_error_message = non_empty(v);
        }
        if let Some(v) = var("SETTINGS_CATEGORY_SEPARATOR") {
            self.settings_category_separator = v;
        }
        if let Some(v) = var("SERVER_ADMIN_ROLE_NAME") {
            self.server_admin_role_name = non_empty(v);
        }
        if let Some(v) = var("BOT_ADMIN_IDS") {
            self.bot_admin_ids = v
                .split(',')
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .collect();
        }
        if let Some(v) = var("AUTO_DELETE_SECONDS") {
            self.auto_delete_seconds = v
                .parse()
                .map_err(|e| Error::Config(format!("{ENV_PREFIX}AUTO_DELETE_SECONDS: {}", e)))?;
        }

        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.builtin_prefix.chars().any(char::is_whitespace)
            || self.bot_admin_prefix.chars().any(char::is_whitespace)
        {
            return Err(Error::Config("Built-in command prefixes must not contain whitespace".into()));
        }
        Ok(())
    }
}

fn non_empty(v: String) -> Option<String> {
    if v.trim().is_empty() { None } else { Some(v) }
}
