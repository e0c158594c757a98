// File: cmdgate-core/src/logging.rs
//! Invocation logging on top of `tracing`.

use tracing::{error, info, warn};
use cmdgate_common::traits::InvocationLogger;

/// Writes every invocation record as a `tracing` event. Successful attempts log at `info`,
/// failed ones at `warn`, and failures with a cause at `error`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingInvocationLogger;

impl TracingInvocationLogger {
    pub fn new() -> Self {
        Self
    }
}

impl InvocationLogger for TracingInvocationLogger {
    fn record_attempt(&self, tag: &str, raw_input: &str, success: bool, description: &str) {
        if success {
            info!(tag, success, "{} | {}", raw_input, description);
        } else {
            warn!(tag, success, "{} | {}", raw_input, description);
        }
    }

    fn record_failure(&self, tag: &str, message: &str, cause: Option<&anyhow::Error>) {
        match cause {
            Some(cause) => error!(tag, "{}: {:#}", message, cause),
            None => error!(tag, "{}", message),
        }
    }
}
