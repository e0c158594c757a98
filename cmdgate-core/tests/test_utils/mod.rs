// File: cmdgate-core/tests/test_utils/mod.rs
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use async_trait::async_trait;
use parking_lot::Mutex;
use cmdgate_common::Error;
use cmdgate_common::models::ChannelId;
use cmdgate_common::traits::{InvocationLogger, MessageSink, SettingsWriter};
use cmdgate_core::commands::{CommandAction, CommandEnvironment, CommandFailure, Invocation};
use cmdgate_core::config::CommandConfig;
use cmdgate_core::moderation::{InMemoryBanList, StaticPermissions};
use cmdgate_core::settings::InMemorySettings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub channel: String,
    pub text: String,
    pub auto_delete: bool,
}

/// Remembers every message it was asked to send. Can be told to fail instead.
#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<SentMessage>>,
    fail_with: Mutex<Option<String>>,
}

impl RecordingSink {
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent.lock().iter().map(|m| m.text.clone()).collect()
    }

    pub fn fail_with(&self, message: &str) {
        *self.fail_with.lock() = Some(message.to_string());
    }

    fn record(&self, destination: &ChannelId, text: &str, auto_delete: bool) -> Result<(), Error> {
        if let Some(message) = self.fail_with.lock().clone() {
            return Err(Error::Messaging(message));
        }
        self.sent.lock().push(SentMessage {
            channel: destination.to_string(),
            text: text.to_string(),
            auto_delete,
        });
        Ok(())
    }
}

#[async_trait]
impl MessageSink for RecordingSink {
    async fn send(&self, destination: &ChannelId, text: &str) -> Result<(), Error> {
        self.record(destination, text, false)
    }

    async fn send_and_auto_delete(&self, destination: &ChannelId, text: &str) -> Result<(), Error> {
        self.record(destination, text, true)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub tag: String,
    pub raw_input: String,
    pub success: bool,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    pub tag: String,
    pub message: String,
    pub cause: Option<String>,
}

#[derive(Default)]
pub struct RecordingLogger {
    attempts: Mutex<Vec<Attempt>>,
    failures: Mutex<Vec<FailureRecord>>,
}

impl RecordingLogger {
    pub fn attempts(&self) -> Vec<Attempt> {
        self.attempts.lock().clone()
    }

    pub fn failures(&self) -> Vec<FailureRecord> {
        self.failures.lock().clone()
    }

    pub fn last_attempt(&self) -> Option<Attempt> {
        self.attempts.lock().last().cloned()
    }
}

impl InvocationLogger for RecordingLogger {
    fn record_attempt(&self, tag: &str, raw_input: &str, success: bool, description: &str) {
        self.attempts.lock().push(Attempt {
            tag: tag.to_string(),
            raw_input: raw_input.to_string(),
            success,
            description: description.to_string(),
        });
    }

    fn record_failure(&self, tag: &str, message: &str, cause: Option<&anyhow::Error>) {
        self.failures.lock().push(FailureRecord {
            tag: tag.to_string(),
            message: message.to_string(),
            cause: cause.map(|c| format!("{:#}", c)),
        });
    }
}

/// An environment wired to in-memory collaborators, with handles to inspect them.
pub struct TestEnv {
    pub env: CommandEnvironment,
    pub settings: Arc<InMemorySettings>,
    pub permissions: Arc<StaticPermissions>,
    pub sink: Arc<RecordingSink>,
    pub logger: Arc<RecordingLogger>,
    pub bans: Arc<InMemoryBanList>,
}

pub const BOT_ADMIN: &str = "owner";

pub fn test_config() -> CommandConfig {
    CommandConfig {
        bot_admin_ids: vec![BOT_ADMIN.to_string()],
        ..CommandConfig::default()
    }
}

pub fn test_env() -> TestEnv {
    test_env_with(test_config())
}

pub fn test_env_with(config: CommandConfig) -> TestEnv {
    let settings = Arc::new(InMemorySettings::new());
    let permissions = Arc::new(StaticPermissions::from_config(&config));
    let sink = Arc::new(RecordingSink::default());
    let logger = Arc::new(RecordingLogger::default());
    let bans = Arc::new(InMemoryBanList::new());
    let env = CommandEnvironment::new(
        Arc::new(config),
        settings.clone(),
        settings.clone(),
        permissions.clone(),
        sink.clone(),
        logger.clone(),
        bans.clone(),
    );
    TestEnv {
        env,
        settings,
        permissions,
        sink,
        logger,
        bans,
    }
}

/// Counts invocations and remembers the last suffix it saw.
#[derive(Default)]
pub struct CountingAction {
    calls: AtomicUsize,
    last_suffix: Mutex<Option<String>>,
}

impl CountingAction {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_suffix(&self) -> Option<String> {
        self.last_suffix.lock().clone()
    }
}

#[async_trait]
impl CommandAction for CountingAction {
    async fn invoke(&self, invocation: &Invocation<'_>) -> Result<(), CommandFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_suffix.lock() = Some(invocation.suffix.to_string());
        Ok(())
    }
}

/// Always fails with an internal error carrying `message`.
pub struct FailingAction(pub &'static str);

#[async_trait]
impl CommandAction for FailingAction {
    async fn invoke(&self, _invocation: &Invocation<'_>) -> Result<(), CommandFailure> {
        Err(CommandFailure::from_internal(anyhow::anyhow!(self.0)))
    }
}

/// Suspends for a while before succeeding, so invocations overlap.
pub struct SlowAction {
    pub delay: Duration,
    pub calls: AtomicUsize,
}

impl SlowAction {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl CommandAction for SlowAction {
    async fn invoke(&self, _invocation: &Invocation<'_>) -> Result<(), CommandFailure> {
        tokio::time::sleep(self.delay).await;
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Panics instead of returning.
pub struct PanicAction(pub &'static str);

#[async_trait]
impl CommandAction for PanicAction {
    async fn invoke(&self, _invocation: &Invocation<'_>) -> Result<(), CommandFailure> {
        panic!("{}", self.0);
    }
}

/// Refuses writes to any setting whose name contains `fail_on`, passing the rest through.
pub struct FlakyWriter {
    pub inner: Arc<InMemorySettings>,
    pub fail_on: &'static str,
}

#[async_trait]
impl SettingsWriter for FlakyWriter {
    async fn set_boolean(&self, scope: &ChannelId, name: &str, value: bool) -> Result<(), Error> {
        if name.contains(self.fail_on) {
            return Err(Error::Settings(format!("store rejected {}", name)));
        }
        self.inner.set_boolean(scope, name, value).await
    }
}
