//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Manage aliased Host entries in your SSH client config
#[derive(Parser, Debug)]
#[command(name = "sshalias")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output on stderr (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// SSH config file to manage (default: ~/.ssh/config)
    #[arg(short, long, global = true, env = "SSHALIAS_FILE", value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List entries, optionally only those matching any term
    #[command(visible_alias = "ls")]
    List {
        /// Exact hostname, user, port or alias to match
        terms: Vec<String>,
    },

    /// Add a new alias entry
    Add {
        /// New alias
        alias: String,
        /// Target as [user@]hostname[:port]
        host: String,
    },

    /// Update an existing alias entry (not implemented)
    Update,

    /// Delete aliases; entries left without aliases are removed
    #[command(visible_alias = "rm")]
    Delete {
        /// Aliases to delete
        #[arg(required = true, num_args = 1..)]
        aliases: Vec<String>,
    },

    /// Rename an alias in place
    #[command(visible_alias = "mv")]
    Rename {
        /// Existing alias
        old: String,
        /// New alias
        new: String,
    },

    /// Copy the SSH config byte-for-byte to a file
    Backup {
        /// Destination path
        #[arg(value_hint = ValueHint::FilePath)]
        dest: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,

    /// Show settings and SSH config paths
    Path,

    /// Write a settings template to the global config path
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
}
