use std::time::Duration;
use async_trait::async_trait;
use tracing::debug;
use cmdgate_common::Error;
use cmdgate_common::models::ChannelId;
use cmdgate_common::traits::MessageSink;

/// Prints replies to stdout. "Deleting" a message prints a notice once the delay passes.
pub struct ConsoleSink {
    auto_delete_after: Duration,
}

impl ConsoleSink {
    pub fn new(auto_delete_seconds: u64) -> Self {
        Self {
            auto_delete_after: Duration::from_secs(auto_delete_seconds),
        }
    }
}

#[async_trait]
impl MessageSink for ConsoleSink {
    async fn send(&self, destination: &ChannelId, text: &str) -> Result<(), Error> {
        println!("[#{}] {}", destination, text);
        Ok(())
    }

    async fn send_and_auto_delete(&self, destination: &ChannelId, text: &str) -> Result<(), Error> {
        self.send(destination, text).await?;
        let destination = destination.clone();
        let text = text.to_string();
        let delay = self.auto_delete_after;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            debug!("Auto-deleting reply in {}", destination);
            println!("[#{}] (deleted: {})", destination, text);
        });
        Ok(())
    }
}
