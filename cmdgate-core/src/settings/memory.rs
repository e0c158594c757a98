use async_trait::async_trait;
use dashmap::DashMap;
use tracing::trace;
use cmdgate_common::Error;
use cmdgate_common::models::{ChannelId, SettingsCategory};
use cmdgate_common::traits::{SettingsRegistry, SettingsResolver, SettingsWriter};

/// Boolean settings keyed by (channel, fully qualified name).
/// Names that were never set resolve to the registered default, or `fallback` if none was registered.
pub struct InMemorySettings {
    values: DashMap<(ChannelId, String), bool>,
    defaults: DashMap<String, bool>,
    fallback: bool,
}

impl Default for InMemorySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySettings {
    pub fn new() -> Self {
        Self::with_fallback(true)
    }

    pub fn with_fallback(fallback: bool) -> Self {
        Self {
            values: DashMap::new(),
            defaults: DashMap::new(),
            fallback,
        }
    }

    /// Records the defaults of every setting in `categories`.
    pub fn register_categories(&self, categories: &[SettingsCategory], separator: &str) {
        for category in categories {
            for child in &category.children {
                self.defaults
                    .insert(category.qualify(separator, &child.name), child.default_value);
            }
        }
    }

    pub fn set(&self, channel: &ChannelId, name: &str, value: bool) {
        self.values.insert((channel.clone(), name.to_string()), value);
    }

    pub fn get(&self, channel: &ChannelId, name: &str) -> bool {
        if let Some(value) = self.values.get(&(channel.clone(), name.to_string())) {
            return *value;
        }
        self.defaults
            .get(name)
            .map(|default| *default)
            .unwrap_or(self.fallback)
    }

    /// Drops every per-channel value.
    pub fn clear(&self) {
        self.values.clear();
    }
}

impl SettingsRegistry for InMemorySettings {
    fn register_categories(&self, categories: &[SettingsCategory], separator: &str) {
        InMemorySettings::register_categories(self, categories, separator);
    }
}

#[async_trait]
impl SettingsResolver for InMemorySettings {
    async fn resolve_boolean(&self, scope: &ChannelId, name: &str) -> Result<bool, Error> {
        let value = self.get(scope, name);
        trace!("Resolved {} in {} to {}", name, scope, value);
        Ok(value)
    }
}

#[async_trait]
impl SettingsWriter for InMemorySettings {
    async fn set_boolean(&self, scope: &ChannelId, name: &str, value: bool) -> Result<(), Error> {
        self.set(scope, name, value);
        Ok(())
    }
}
