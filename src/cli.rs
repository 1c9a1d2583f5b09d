//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for linkdash using clap's derive macros.

use clap::{Parser, Subcommand};

use crate::services::SortKey;

/// linkdash - manage your short links from the terminal
#[derive(Parser)]
#[command(name = "linkdash")]
#[command(version)]
#[command(about = "Manage short links stored in a hosted table or a local database", long_about = None)]
pub struct Cli {
    /// Configuration file (default: linkdash.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// List your links, newest first
    List {
        /// Only links whose target URL contains this text
        #[arg(long)]
        search: Option<String>,

        /// Sort by: created, visits, url, alias
        #[arg(long, default_value = "created")]
        sort: SortKey,

        /// Ascending order (default is descending)
        #[arg(long)]
        asc: bool,

        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Links per page (default: links.page_size)
        #[arg(long)]
        page_size: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single link
    Show {
        /// Link id
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a link
    ///
    /// Without --alias a random alias is generated.
    Create {
        /// Target URL
        url: String,

        /// Custom alias (letters, digits, '-' and '_')
        #[arg(long, short = 'a')]
        alias: Option<String>,
    },

    /// Change a link's target URL or alias
    Update {
        /// Link id
        id: String,

        /// New target URL
        #[arg(long)]
        url: Option<String>,

        /// New alias
        #[arg(long, short = 'a')]
        alias: Option<String>,
    },

    /// Delete a link
    Delete {
        /// Link id
        id: String,
    },

    /// Check whether an alias is free
    Check {
        /// Alias to check
        alias: String,

        /// Ignore this link id (when renaming it)
        #[arg(long)]
        exclude: Option<String>,
    },

    /// Show dashboard statistics
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: linkdash.example.toml, "-" for stdout)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },
}
