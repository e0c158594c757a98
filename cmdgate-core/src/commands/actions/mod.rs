// File: cmdgate-core/src/commands/actions/mod.rs
//! Handlers that command definitions refer to by name, plus the stock ones
//! (`ping`, `echo`, `about`).

pub mod about;
pub mod echo;
pub mod ping;

use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use tracing::debug;
use cmdgate_common::models::InvocationContext;
use crate::commands::environment::CommandEnvironment;
use crate::commands::failure::CommandFailure;

/// What a handler gets once every gate has passed.
pub struct Invocation<'a> {
    pub context: &'a InvocationContext,
    /// Input after the alias, trimmed.
    pub suffix: &'a str,
    /// Values of the command's required settings, all `true` by construction.
    pub settings: &'a HashMap<String, bool>,
    pub env: &'a CommandEnvironment,
}

impl Invocation<'_> {
    /// Replies in the channel the command was used in.
    pub async fn reply(&self, text: &str) -> Result<(), CommandFailure> {
        self.env.sink.send(&self.context.channel, text).await?;
        Ok(())
    }
}

#[async_trait]
pub trait CommandAction: Send + Sync {
    async fn invoke(&self, invocation: &Invocation<'_>) -> Result<(), CommandFailure>;
}

/// Name → handler lookup used while validating definitions.
#[derive(Clone, Default)]
pub struct ActionRegistry {
    actions: HashMap<String, Arc<dyn CommandAction>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding `ping`, `echo` and `about`.
    pub fn with_stock_actions() -> Self {
        Self::new()
            .with("ping", Arc::new(ping::PingAction))
            .with("echo", Arc::new(echo::EchoAction))
            .with("about", Arc::new(about::AboutAction))
    }

    pub fn with(mut self, name: &str, action: Arc<dyn CommandAction>) -> Self {
        self.register(name, action);
        self
    }

    /// Registers `action` under `name`, replacing any earlier one.
    pub fn register(&mut self, name: &str, action: Arc<dyn CommandAction>) {
        if self.actions.insert(name.to_string(), action).is_some() {
            debug!("Action '{}' re-registered; the newer handler wins", name);
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn CommandAction>> {
        self.actions.get(name).cloned()
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.actions.keys().cloned().collect();
        names.sort();
        names
    }
}
