use async_trait::async_trait;
use tracing::info;
use cmdgate_common::traits::ReloadTrigger;
use crate::commands::actions::{CommandAction, Invocation};
use crate::commands::failure::CommandFailure;

pub struct ReloadAction {
    trigger: ReloadTrigger,
}

impl ReloadAction {
    pub fn new(trigger: ReloadTrigger) -> Self {
        Self { trigger }
    }
}

#[async_trait]
impl CommandAction for ReloadAction {
    async fn invoke(&self, invocation: &Invocation<'_>) -> Result<(), CommandFailure> {
        info!("Reload requested by {}", invocation.context.invoker);
        (self.trigger)()
            .await
            .map_err(|e| CommandFailure::generic(false, "Reload failed").with_internal(e))?;
        invocation.reply("Reloaded!").await
    }
}
