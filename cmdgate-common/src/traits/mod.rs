pub mod collaborator_traits;

pub use collaborator_traits::{
    BanList, CommandSource, InvocationLogger, MessageSink, PermissionResolver, ReloadTrigger,
    SettingsRegistry, SettingsResolver, SettingsWriter,
};
