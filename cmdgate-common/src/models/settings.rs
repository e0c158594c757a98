use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SettingKind {
    Boolean,
}

/// A single setting the command subsystem registers with the settings subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingDescriptor {
    /// Name within its category, e.g. `ping_enabled`.
    pub name: String,
    pub kind: SettingKind,
    pub default_value: bool,
    pub description: String,
}

/// A named group of settings, registered as one subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsCategory {
    pub name: String,
    pub children: Vec<SettingDescriptor>,
}

impl SettingsCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Fully qualified name of a child, e.g. `commands/ping_enabled`.
    pub fn qualify(&self, separator: &str, child: &str) -> String {
        format!("{}{}{}", self.name, separator, child)
    }
}
