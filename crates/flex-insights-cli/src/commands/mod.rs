//! Subcommand implementations.

pub mod export;
