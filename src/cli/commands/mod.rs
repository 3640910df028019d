//! Subcommand implementations.

/// Config display command handler.
pub mod config;

/// Provider listing command handler.
pub mod providers;

/// Translation command handler.
pub mod translate;
