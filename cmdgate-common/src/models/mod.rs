// File: cmdgate-common/src/models/mod.rs
pub mod command;
pub mod context;
pub mod settings;

pub use command::RawCommandDefinition;
pub use context::{ChannelId, InvocationContext, InvokerId, Scope, ScopeKind};
pub use settings::{SettingDescriptor, SettingKind, SettingsCategory};
