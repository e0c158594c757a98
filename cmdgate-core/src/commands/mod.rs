// File: cmdgate-core/src/commands/mod.rs

pub mod actions;
pub mod builtin;
pub mod command;
pub mod definition;
pub mod environment;
pub mod failure;
pub mod manager;
pub mod surfacing;

pub use actions::{ActionRegistry, CommandAction, Invocation};
pub use command::Command;
pub use definition::CommandDefinition;
pub use environment::CommandEnvironment;
pub use failure::{CommandFailure, FailureKind, PublicMessage};
pub use manager::{CommandManager, RouteOutcome};
