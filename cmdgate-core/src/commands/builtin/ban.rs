use async_trait::async_trait;
use tracing::info;
use cmdgate_common::models::InvokerId;
use crate::commands::actions::{CommandAction, Invocation};
use crate::commands::failure::CommandFailure;

/// `}ban <id>` and `}unban <id>`.
pub struct BanAction {
    ban: bool,
}

impl BanAction {
    pub fn ban() -> Self {
        Self { ban: true }
    }

    pub fn unban() -> Self {
        Self { ban: false }
    }

    fn verb(&self) -> &'static str {
        if self.ban { "ban" } else { "unban" }
    }
}

#[async_trait]
impl CommandAction for BanAction {
    async fn invoke(&self, invocation: &Invocation<'_>) -> Result<(), CommandFailure> {
        let target = invocation.suffix.split_whitespace().next().ok_or_else(|| {
            CommandFailure::custom(
                format!("Say who to {}, by user id.", self.verb()),
                true,
                "No target given",
            )
        })?;
        let target = InvokerId::from(target);

        if self.ban && target == invocation.context.invoker {
            return Err(CommandFailure::custom(
                "You can't ban yourself.",
                true,
                "Tried to ban self",
            ));
        }

        let bans = &invocation.env.bans;
        let changed = if self.ban { bans.ban(&target) } else { bans.unban(&target) };

        let reply = match (self.ban, changed) {
            (true, true) => format!("{} is banned.", target),
            (true, false) => format!("{} was already banned.", target),
            (false, true) => format!("{} is unbanned.", target),
            (false, false) => format!("{} wasn't banned.", target),
        };
        if changed {
            info!("{} {}ned by {}", target, self.verb(), invocation.context.invoker);
        }
        invocation.reply(&reply).await
    }
}
