// File: cmdgate-core/src/settings/mod.rs
//! Settings backends. The real settings subsystem lives elsewhere; this crate only needs
//! something to resolve and toggle boolean values per channel.

pub mod memory;

pub use memory::InMemorySettings;
