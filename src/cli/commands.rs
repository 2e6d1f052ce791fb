//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - filter: load a member page and apply the filter pipeline
//! - index: browse the entity index with focus/kind/text filtering
//! - search: drive the paged search endpoint until exhausted

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use docsift::order::SortMode;

/// docsift - filter and search generated API documentation
#[derive(Parser, Debug)]
#[command(name = "docsift")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter and sort the member lists of a generated page
    Filter {
        /// Path to the generated documentation page
        page: PathBuf,

        /// Free-text query (smart case: lowercase is case-insensitive,
        /// uppercase letters match CamelCase acronyms)
        #[arg(short, long, default_value = "")]
        query: String,

        /// Show only these kinds (repeatable); default is all kinds
        #[arg(short, long)]
        kind: Vec<String>,

        /// Show protected members too
        #[arg(long)]
        show_all: bool,

        /// Hide members owned by this ancestor (repeatable)
        #[arg(long)]
        hide_owner: Vec<String>,

        /// Hide concrete members
        #[arg(long)]
        abstract_only: bool,

        /// Hide abstract members
        #[arg(long)]
        concrete_only: bool,

        /// Sort order
        #[arg(short, long, value_enum, default_value = "alphabetical")]
        sort: SortMode,

        /// Group inherited members under their declaring ancestor
        #[arg(long)]
        inherited: bool,
    },

    /// Filter the entity index (the package tree pane)
    Index {
        /// Path to the generated index page
        page: PathBuf,

        /// Free-text query over template names
        #[arg(short, long, default_value = "")]
        query: String,

        /// Focus on one package's subtree
        #[arg(short, long)]
        focus: Option<String>,

        /// Display packages only
        #[arg(long)]
        packages_only: bool,
    },

    /// Page through a search endpoint until it runs out of results
    Search {
        /// Base URL of the paged search endpoint
        base_url: String,

        /// Search query
        #[arg(short, long)]
        query: String,
    },
}
