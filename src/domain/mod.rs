//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod alias_index;
pub mod entities;
pub mod error;
pub mod ssh_config;

pub use alias_index::AliasIndex;
pub use entities::*;
pub use error::DomainError;
pub use ssh_config::{Block, DeleteSummary, SshConfig, DEFAULT_INDENT};
