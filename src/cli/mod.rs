//! CLI layer: argument parsing, command dispatch and terminal output

pub mod args;
pub mod commands;
pub mod error;
pub mod output;

pub use args::{Cli, Commands, ConfigCommands};
pub use commands::{execute_command, resolve_settings};
pub use error::{CliError, CliResult};
pub use output::{CapturedOutput, Output, TerminalOutput};
