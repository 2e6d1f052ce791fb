//! CLI module for docsift - command-line interface and subcommands.
//!
//! Provides the main entry point with subcommands for filtering a member
//! page, browsing the entity index and driving the paged search endpoint.

pub mod commands;

pub use commands::Cli;
