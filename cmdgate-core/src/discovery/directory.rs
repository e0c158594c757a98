use std::path::{Path, PathBuf};
use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};
use cmdgate_common::Error;
use cmdgate_common::models::RawCommandDefinition;
use cmdgate_common::traits::CommandSource;

/// Reads one definition per `*.json` file in a directory, in file name order.
///
/// An unreadable directory fails the whole pass. A file that isn't valid JSON is skipped
/// with a warning; shape problems are left to the manager's validation.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn definition_files(&self) -> Result<Vec<PathBuf>, Error> {
        let mut entries = fs::read_dir(&self.dir).await.map_err(|e| {
            Error::Discovery(format!("cannot read {}: {}", self.dir.display(), e))
        })?;

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_json = path.extension().is_some_and(|ext| ext == "json");
            if is_json && entry.file_type().await?.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

#[async_trait]
impl CommandSource for DirectorySource {
    async fn discover(&self) -> Result<Vec<RawCommandDefinition>, Error> {
        let files = self.definition_files().await?;
        debug!("Found {} definition file(s) in {}", files.len(), self.dir.display());

        let mut definitions = Vec::with_capacity(files.len());
        for path in files {
            let text = fs::read_to_string(&path).await?;
            match serde_json::from_str(&text) {
                Ok(blob) => {
                    definitions.push(RawCommandDefinition::new(path.display().to_string(), blob))
                }
                Err(e) => warn!("Skipping {}: not valid JSON ({})", path.display(), e),
            }
        }
        Ok(definitions)
    }
}
