// File: cmdgate-core/src/discovery/mod.rs
//! Where raw command definitions come from.

pub mod directory;

use async_trait::async_trait;
use serde_json::Value;
use cmdgate_common::Error;
use cmdgate_common::models::RawCommandDefinition;
use cmdgate_common::traits::CommandSource;

pub use directory::DirectorySource;

/// A fixed list of definitions, handed out again on every load.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    definitions: Vec<RawCommandDefinition>,
}

impl StaticSource {
    pub fn new(definitions: Vec<RawCommandDefinition>) -> Self {
        Self { definitions }
    }

    /// Each blob's origin becomes `<label>[<index>]`.
    pub fn from_blobs(label: &str, blobs: Vec<Value>) -> Self {
        let definitions = blobs
            .into_iter()
            .enumerate()
            .map(|(index, blob)| RawCommandDefinition::new(format!("{}[{}]", label, index), blob))
            .collect();
        Self { definitions }
    }
}

#[async_trait]
impl CommandSource for StaticSource {
    async fn discover(&self) -> Result<Vec<RawCommandDefinition>, Error> {
        Ok(self.definitions.clone())
    }
}
