// File: cmdgate-core/src/commands/definition.rs

use std::fmt;
use std::sync::Arc;
use serde_json::{Map, Value};
use cmdgate_common::{Flag, ValidationError};
use crate::commands::actions::{ActionRegistry, CommandAction};

/// Typed command definition. Built in code, or parsed from a JSON blob by [`from_blob`].
///
/// [`from_blob`]: CommandDefinition::from_blob
#[derive(Clone, Default)]
pub struct CommandDefinition {
    pub aliases: Vec<String>,
    pub unique_id: Option<String>,
    pub server_admin_only: bool,
    pub bot_admin_only: bool,
    pub only_in_server: bool,
    /// `None` means "decide from `bot_admin_only`".
    pub can_be_channel_restricted: Option<bool>,
    pub cooldown_seconds: f64,
    pub required_settings: Vec<String>,
    pub action: Option<Arc<dyn CommandAction>>,
}

impl fmt::Debug for CommandDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDefinition")
            .field("aliases", &self.aliases)
            .field("unique_id", &self.unique_id)
            .field("server_admin_only", &self.server_admin_only)
            .field("bot_admin_only", &self.bot_admin_only)
            .field("only_in_server", &self.only_in_server)
            .field("can_be_channel_restricted", &self.can_be_channel_restricted)
            .field("cooldown_seconds", &self.cooldown_seconds)
            .field("required_settings", &self.required_settings)
            .field("action", &self.action.as_ref().map(|_| "<action>"))
            .finish()
    }
}

impl CommandDefinition {
    pub fn new(aliases: &[&str], action: Arc<dyn CommandAction>) -> Self {
        Self {
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            action: Some(action),
            ..Self::default()
        }
    }

    pub fn unique_id(mut self, id: &str) -> Self {
        self.unique_id = Some(id.to_string());
        self
    }

    pub fn server_admin_only(mut self) -> Self {
        self.server_admin_only = true;
        self
    }

    pub fn bot_admin_only(mut self) -> Self {
        self.bot_admin_only = true;
        self
    }

    pub fn only_in_server(mut self) -> Self {
        self.only_in_server = true;
        self
    }

    pub fn channel_restricted(mut self, restricted: bool) -> Self {
        self.can_be_channel_restricted = Some(restricted);
        self
    }

    pub fn cooldown(mut self, seconds: f64) -> Self {
        self.cooldown_seconds = seconds;
        self
    }

    pub fn require_setting(mut self, name: &str) -> Self {
        self.required_settings.push(name.to_string());
        self
    }

    /// Checks the shape of a definition blob and resolves its action by name.
    /// Value rules (negative cooldown, missing uniqueId, ...) are left to `Command::new`.
    ///
    /// Recognised keys: `aliases` (string or array of strings), `action` (registered action
    /// name), `unique_id`, `server_admin_only`, `bot_admin_only`, `only_in_server`,
    /// `can_be_channel_restricted`, `cooldown_seconds`, `required_settings` (string or array).
    pub fn from_blob(blob: &Value, actions: &ActionRegistry) -> Result<Self, ValidationError> {
        let fields = blob.as_object().ok_or(ValidationError::NoData)?;

        let aliases = match fields.get("aliases") {
            None | Some(Value::Null) => return Err(ValidationError::NoAliases),
            Some(Value::String(alias)) => vec![alias.clone()],
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string).ok_or(ValidationError::InvalidAlias))
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => return Err(ValidationError::InvalidAlias),
        };

        let action = fields
            .get("action")
            .and_then(Value::as_str)
            .and_then(|name| actions.get(name))
            .ok_or(ValidationError::NoAction)?;

        let cooldown_seconds = match fields.get("cooldown_seconds") {
            None | Some(Value::Null) => 0.0,
            Some(value) => value.as_f64().ok_or(ValidationError::InvalidCooldown)?,
        };

        let server_admin_only = flag(fields, Flag::ServerAdminOnly)?.unwrap_or(false);
        let bot_admin_only = flag(fields, Flag::BotAdminOnly)?.unwrap_or(false);
        let only_in_server = flag(fields, Flag::OnlyInServer)?.unwrap_or(false);
        let can_be_channel_restricted = flag(fields, Flag::CanBeChannelRestricted)?;

        let unique_id = match fields.get("unique_id") {
            None | Some(Value::Null) => None,
            Some(Value::String(id)) => Some(id.clone()),
            Some(_) => {
                let restrictable = can_be_channel_restricted.unwrap_or(!bot_admin_only);
                return Err(if restrictable {
                    ValidationError::NeedsUniqueId
                } else {
                    ValidationError::InvalidUniqueId
                });
            }
        };

        let required_settings = match fields.get("required_settings") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::String(name)) => vec![name.clone()],
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string).ok_or(ValidationError::NonStringSetting))
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => return Err(ValidationError::InvalidRequiredSettings),
        };

        Ok(Self {
            aliases,
            unique_id,
            server_admin_only,
            bot_admin_only,
            only_in_server,
            can_be_channel_restricted,
            cooldown_seconds,
            required_settings,
            action: Some(action),
        })
    }
}

fn flag(fields: &Map<String, Value>, flag: Flag) -> Result<Option<bool>, ValidationError> {
    match fields.get(flag.key()) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(ValidationError::InvalidFlag(flag)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use crate::commands::actions::ping::PingAction;

    fn registry() -> ActionRegistry {
        ActionRegistry::new().with("ping", Arc::new(PingAction))
    }

    fn parse(blob: Value) -> Result<CommandDefinition, ValidationError> {
        CommandDefinition::from_blob(&blob, &registry())
    }

    #[test]
    fn non_object_is_no_data() {
        assert_eq!(parse(Value::Null).unwrap_err(), ValidationError::NoData);
        assert_eq!(parse(json!("ping")).unwrap_err(), ValidationError::NoData);
    }

    #[test]
    fn single_string_alias_becomes_sequence() {
        let def = parse(json!({ "aliases": "ping", "action": "ping", "unique_id": "ping" })).unwrap();
        assert_eq!(def.aliases, vec!["ping".to_string()]);
    }

    #[test]
    fn alias_errors() {
        assert_eq!(parse(json!({ "action": "ping" })).unwrap_err(), ValidationError::NoAliases);
        assert_eq!(
            parse(json!({ "aliases": ["a", 5], "action": "ping" })).unwrap_err(),
            ValidationError::InvalidAlias
        );
    }

    #[test]
    fn action_must_name_a_registered_handler() {
        assert_eq!(parse(json!({ "aliases": "a" })).unwrap_err(), ValidationError::NoAction);
        assert_eq!(
            parse(json!({ "aliases": "a", "action": 7 })).unwrap_err(),
            ValidationError::NoAction
        );
        assert_eq!(
            parse(json!({ "aliases": "a", "action": "nope" })).unwrap_err(),
            ValidationError::NoAction
        );
    }

    #[test]
    fn cooldown_must_be_numeric() {
        assert_eq!(
            parse(json!({ "aliases": "a", "action": "ping", "cooldown_seconds": "string" })).unwrap_err(),
            ValidationError::InvalidCooldown
        );
    }

    #[test]
    fn each_flag_reports_itself() {
        for flag in [
            Flag::ServerAdminOnly,
            Flag::BotAdminOnly,
            Flag::OnlyInServer,
            Flag::CanBeChannelRestricted,
        ] {
            let mut blob = json!({ "aliases": "a", "action": "ping", "unique_id": "a" });
            blob[flag.key()] = json!("invalid");
            assert_eq!(parse(blob).unwrap_err(), ValidationError::InvalidFlag(flag));
        }
    }

    #[test]
    fn non_string_unique_id() {
        assert_eq!(
            parse(json!({ "aliases": "a", "action": "ping", "unique_id": 5 })).unwrap_err(),
            ValidationError::NeedsUniqueId
        );
        assert_eq!(
            parse(json!({
                "aliases": "a", "action": "ping", "unique_id": 5, "can_be_channel_restricted": false
            }))
            .unwrap_err(),
            ValidationError::InvalidUniqueId
        );
    }

    #[test]
    fn required_settings_shapes() {
        let def = parse(json!({
            "aliases": "a", "action": "ping", "unique_id": "a", "required_settings": "fun/enabled"
        }))
        .unwrap();
        assert_eq!(def.required_settings, vec!["fun/enabled".to_string()]);

        assert_eq!(
            parse(json!({ "aliases": "a", "action": "ping", "required_settings": 534545 })).unwrap_err(),
            ValidationError::InvalidRequiredSettings
        );
        assert_eq!(
            parse(json!({ "aliases": "a", "action": "ping", "required_settings": [534545] })).unwrap_err(),
            ValidationError::NonStringSetting
        );
    }
}
