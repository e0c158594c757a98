// src/lib.rs

pub mod commands;
pub mod config;
pub mod discovery;
pub mod logging;
pub mod moderation;
pub mod settings;

pub use cmdgate_common::error::Error;
pub use commands::{Command, CommandEnvironment, CommandManager};
pub use config::CommandConfig;
