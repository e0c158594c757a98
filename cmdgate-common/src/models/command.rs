use serde::{Deserialize, Serialize};

/// One command definition as produced by a `CommandSource`, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCommandDefinition {
    /// Where the definition came from (file path, "inline", ...). Only used in load logs.
    pub origin: String,
    pub blob: serde_json::Value,
}

impl RawCommandDefinition {
    pub fn new(origin: impl Into<String>, blob: serde_json::Value) -> Self {
        Self {
            origin: origin.into(),
            blob,
        }
    }
}
