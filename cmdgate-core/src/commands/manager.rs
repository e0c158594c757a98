// File: cmdgate-core/src/commands/manager.rs
//! Owns the loaded command set and routes incoming text to it.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Weak};
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use parking_lot::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use cmdgate_common::models::{InvocationContext, SettingsCategory};
use cmdgate_common::traits::{CommandSource, ReloadTrigger, SettingsRegistry};
use crate::Error;
use crate::commands::actions::ActionRegistry;
use crate::commands::builtin;
use crate::commands::command::{Command, COMMANDS_SETTINGS_CATEGORY};
use crate::commands::definition::CommandDefinition;
use crate::commands::environment::CommandEnvironment;
use crate::commands::failure::CommandFailure;
use crate::commands::surfacing::{self, COMMAND_LOG_TAG};

pub const MANAGER_LOG_TAG: &str = "COMMAND MANAGER";

/// Some platforms deliver U+3000 where a regular space was typed.
const IDEOGRAPHIC_SPACE: char = '\u{3000}';

/// Result of handing one line of input to the manager.
#[derive(Debug)]
pub enum RouteOutcome {
    /// No command has the leading token as an alias.
    NotMatched,
    /// A command matched but the invoker is banned; nothing ran.
    Ignored,
    /// The invocation is running on its own task.
    Dispatched(JoinHandle<()>),
}

impl RouteOutcome {
    pub fn matched(&self) -> bool {
        !matches!(self, RouteOutcome::NotMatched)
    }

    /// Waits for a dispatched invocation to finish, including error surfacing.
    pub async fn finished(self) {
        if let RouteOutcome::Dispatched(handle) = self {
            if let Err(e) = handle.await {
                error!("Command task did not complete: {}", e);
            }
        }
    }
}

/// Everything one load pass produces. Replaced as a whole.
struct LoadedCommands {
    /// User commands in load order, then built-ins.
    commands: Vec<Arc<Command>>,
    user_command_count: usize,
    settings_category: SettingsCategory,
}

impl LoadedCommands {
    fn empty() -> Self {
        Self {
            commands: Vec::new(),
            user_command_count: 0,
            settings_category: SettingsCategory::new(COMMANDS_SETTINGS_CATEGORY),
        }
    }
}

pub struct CommandManager {
    source: Arc<dyn CommandSource>,
    actions: ActionRegistry,
    env: CommandEnvironment,
    reload_trigger: Option<ReloadTrigger>,
    settings_registry: RwLock<Option<Arc<dyn SettingsRegistry>>>,
    state: RwLock<Arc<LoadedCommands>>,
}

impl CommandManager {
    pub fn new(
        source: Arc<dyn CommandSource>,
        actions: ActionRegistry,
        env: CommandEnvironment,
        reload_trigger: Option<ReloadTrigger>,
    ) -> Self {
        debug!("Initializing CommandManager with actions {:?}", actions.names());
        Self {
            source,
            actions,
            env,
            reload_trigger,
            settings_registry: RwLock::new(None),
            state: RwLock::new(Arc::new(LoadedCommands::empty())),
        }
    }

    /// A manager whose reload built-in re-runs [`load`](Self::load) on itself.
    pub fn new_self_reloading(
        source: Arc<dyn CommandSource>,
        actions: ActionRegistry,
        env: CommandEnvironment,
    ) -> Arc<Self> {
        Arc::new_cyclic(|weak: &Weak<Self>| {
            let weak = weak.clone();
            let trigger: ReloadTrigger = Arc::new(move || -> BoxFuture<'static, Result<(), Error>> {
                let weak = weak.clone();
                Box::pin(async move {
                    let manager = weak
                        .upgrade()
                        .ok_or_else(|| Error::NotFound("command manager was dropped".into()))?;
                    manager.load().await;
                    Ok(())
                })
            });
            Self::new(source, actions, env, Some(trigger))
        })
    }

    /// Every later load publishes its settings categories to `registry`.
    pub fn set_settings_registry(&self, registry: Arc<dyn SettingsRegistry>) {
        *self.settings_registry.write() = Some(registry);
    }

    /// Loads (or reloads) every command. Bad or conflicting definitions are logged and skipped;
    /// a failing source leaves the manager with no commands at all.
    pub async fn load(&self) {
        let definitions = match self.source.discover().await {
            Ok(definitions) => definitions,
            Err(e) => {
                error!("Error loading commands: {}", e);
                let cause = anyhow::Error::new(e);
                self.env
                    .logger
                    .record_failure(MANAGER_LOG_TAG, "Error loading commands.", Some(&cause));
                self.install(LoadedCommands::empty());
                return;
            }
        };

        let separator = self.env.separator().to_string();
        let reserved = builtin::builtin_aliases(&self.env.config, self.reload_trigger.is_some());
        let mut user_commands: Vec<Arc<Command>> = Vec::with_capacity(definitions.len());

        for raw in definitions {
            let command = match CommandDefinition::from_blob(&raw.blob, &self.actions)
                .and_then(|definition| Command::new(definition, &separator))
            {
                Ok(command) => command,
                Err(e) => {
                    self.reject(&raw.origin, &e.to_string());
                    continue;
                }
            };

            if let Some(id) = command.unique_id() {
                if user_commands.iter().any(|c| c.unique_id() == Some(id)) {
                    self.reject(&raw.origin, &format!("uniqueId: {} not unique.", id));
                    continue;
                }
            }

            if let Some(alias) = command.aliases().iter().find(|a| reserved.contains(a)) {
                self.reject(
                    &raw.origin,
                    &format!("alias: {} is reserved for a built-in command.", alias),
                );
                continue;
            }

            if let Some(alias) = duplicate_alias(&command, &user_commands) {
                self.reject(&raw.origin, &format!("alias: {} is not unique.", alias));
                continue;
            }

            if !separator.is_empty() {
                if let Some(alias) = command.aliases().iter().find(|a| a.contains(separator.as_str())) {
                    self.reject(
                        &raw.origin,
                        &format!(
                            "alias {} contains the settings category separator ({}). It must not.",
                            alias, separator
                        ),
                    );
                    continue;
                }
            }

            user_commands.push(Arc::new(command));
        }

        let snapshot: Arc<[Arc<Command>]> = Arc::from(user_commands.as_slice());
        let settings_category = settings_category_for(&snapshot);
        let user_command_count = user_commands.len();

        let mut commands = user_commands;
        for definition in
            builtin::builtin_definitions(&snapshot, &self.env.config, self.reload_trigger.clone())
        {
            match Command::new(definition, &separator) {
                Ok(command) => commands.push(Arc::new(command)),
                Err(e) => error!("Built-in command failed validation: {}", e),
            }
        }

        info!(
            "Loaded {} commands ({} user-defined, {} settings)",
            commands.len(),
            user_command_count,
            settings_category.children.len()
        );

        let registry = self.settings_registry.read().clone();
        if let Some(registry) = registry {
            registry.register_categories(std::slice::from_ref(&settings_category), &separator);
        }

        self.install(LoadedCommands {
            commands,
            user_command_count,
            settings_category,
        });
    }

    fn install(&self, loaded: LoadedCommands) {
        *self.state.write() = Arc::new(loaded);
    }

    fn reject(&self, origin: &str, reason: &str) {
        let message = format!("Failed to load command from {}. Error: {}", origin, reason);
        warn!("{}", message);
        self.env.logger.record_failure(MANAGER_LOG_TAG, &message, None);
    }

    fn current(&self) -> Arc<LoadedCommands> {
        self.state.read().clone()
    }

    /// Every loaded command, user commands first.
    pub fn commands(&self) -> Vec<Arc<Command>> {
        self.current().commands.clone()
    }

    pub fn user_commands(&self) -> Vec<Arc<Command>> {
        let loaded = self.current();
        loaded.commands[..loaded.user_command_count].to_vec()
    }

    /// Settings categories to register with the settings subsystem.
    pub fn collect_settings_categories(&self) -> Vec<SettingsCategory> {
        vec![self.current().settings_category.clone()]
    }

    /// First command (in load order) that has `alias`.
    pub fn find_command(&self, alias: &str) -> Option<Arc<Command>> {
        self.current()
            .commands
            .iter()
            .find(|c| c.has_alias(alias))
            .cloned()
    }

    /// Returns whether `raw_text` names a command. The invocation itself continues in the
    /// background; its outcome is logged and surfaced, never returned.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime, since the invocation is spawned onto it.
    pub fn route_input(&self, context: InvocationContext, raw_text: &str) -> bool {
        self.dispatch(context, raw_text).matched()
    }

    /// Like [`route_input`](Self::route_input), but hands back the running invocation.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn dispatch(&self, context: InvocationContext, raw_text: &str) -> RouteOutcome {
        let normalized = raw_text.replace(IDEOGRAPHIC_SPACE, " ");
        let (key, suffix) = split_command_text(&normalized);
        let key = key.to_lowercase();

        let Some(command) = self.find_command(&key) else {
            return RouteOutcome::NotMatched;
        };

        if self.env.bans.is_banned(&context.invoker) {
            debug!("Ignoring '{}' from banned invoker {}", key, context.invoker);
            self.env
                .logger
                .record_attempt(COMMAND_LOG_TAG, raw_text, false, "User is banned");
            return RouteOutcome::Ignored;
        }

        debug!("Routing '{}' to command '{}'", key, command.primary_alias());

        // Before the spawn: the cooldown entry must exist before this invocation can suspend.
        let admission = command.check_admission(&context, &self.env);

        let env = self.env.clone();
        let raw_input = raw_text.to_string();
        let suffix = suffix.to_string();
        let handle = tokio::spawn(async move {
            let outcome = match admission {
                Ok(()) => AssertUnwindSafe(command.run_admitted(&context, &suffix, &env))
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|payload| {
                        Err(CommandFailure::from_internal(anyhow::anyhow!(
                            "handler panicked: {}",
                            panic_message(payload.as_ref())
                        )))
                    }),
                Err(failure) => Err(failure),
            };
            match outcome {
                Ok(()) => surfacing::record_success(&raw_input, &env),
                Err(failure) => {
                    surfacing::surface_failure(&failure, &context, &raw_input, &env).await
                }
            }
        });

        RouteOutcome::Dispatched(handle)
    }
}

fn duplicate_alias<'a>(command: &'a Command, others: &[Arc<Command>]) -> Option<&'a str> {
    command
        .aliases()
        .iter()
        .find(|alias| others.iter().any(|other| other.has_alias(alias)))
        .map(String::as_str)
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}

fn settings_category_for(user_commands: &[Arc<Command>]) -> SettingsCategory {
    let mut category = SettingsCategory::new(COMMANDS_SETTINGS_CATEGORY);
    category.children = user_commands
        .iter()
        .filter_map(|c| c.create_enablement_descriptor())
        .collect();
    category
}

/// Splits at the first whitespace: (command key, trimmed remainder).
fn split_command_text(text: &str) -> (&str, &str) {
    match text.find(char::is_whitespace) {
        Some(index) => (&text[..index], text[index..].trim()),
        None => (text, ""),
    }
}
