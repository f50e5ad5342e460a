//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Folio content index CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (content root is resolved relative to it)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: folio.toml)
    #[arg(short = 'C', long, default_value = "folio.toml")]
    pub config: PathBuf,

    /// Treat drafts as published for this invocation
    #[arg(short, long)]
    pub preview: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List documents, newest first
    List {
        /// Limit output to the first N documents
        #[arg(short, long)]
        limit: Option<usize>,

        /// Include unpublished documents
        #[arg(short, long)]
        all: bool,

        /// Emit the listing as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a single document to HTML on stdout
    Show {
        /// Document id (root-relative path without extension)
        id: String,
    },

    /// Load the catalog and report files that fail to parse
    Check,
}

#[allow(unused)]
impl Cli {
    pub const fn is_list(&self) -> bool {
        matches!(self.command, Commands::List { .. })
    }
    pub const fn is_show(&self) -> bool {
        matches!(self.command, Commands::Show { .. })
    }
    pub const fn is_check(&self) -> bool {
        matches!(self.command, Commands::Check)
    }
}
