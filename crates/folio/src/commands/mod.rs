//! CLI subcommand implementations.

pub mod build;
pub mod dev;
pub mod init;
pub mod serve;
