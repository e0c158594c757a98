// File: cmdgate-core/src/commands/surfacing.rs

use tracing::warn;
use cmdgate_common::models::InvocationContext;
use crate::commands::environment::CommandEnvironment;
use crate::commands::failure::CommandFailure;

/// Subsystem tag on every invocation log line.
pub const COMMAND_LOG_TAG: &str = "COMMAND";

/// Description logged for successful invocations.
pub const SUCCESS_DESCRIPTION: &str = "Success";

pub fn record_success(raw_input: &str, env: &CommandEnvironment) {
    env.logger
        .record_attempt(COMMAND_LOG_TAG, raw_input, true, SUCCESS_DESCRIPTION);
}

/// Sends the failure's public message (if any) to the invoking channel and logs the attempt.
/// The internal cause goes to the log only.
pub async fn surface_failure(
    failure: &CommandFailure,
    context: &InvocationContext,
    raw_input: &str,
    env: &CommandEnvironment,
) {
    if let Some(text) = failure.public_text(&env.config) {
        let sent = if failure.auto_delete() {
            env.sink.send_and_auto_delete(&context.channel, &text).await
        } else {
            env.sink.send(&context.channel, &text).await
        };
        if let Err(e) = sent {
            warn!("Could not send error reply to {}: {}", context.channel, e);
        }
    }

    env.logger
        .record_attempt(COMMAND_LOG_TAG, raw_input, false, failure.log_description());

    if let Some(cause) = failure.internal() {
        env.logger.record_failure(
            COMMAND_LOG_TAG,
            &format!("Command '{}' errored.", raw_input),
            Some(cause),
        );
    }
}
