//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent business logic violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("'{0}' ssh alias already exists")]
    AliasExists(String),

    #[error("'{0}' ssh alias not found")]
    AliasNotFound(String),

    #[error("old ssh alias not found: {0}")]
    OldAliasNotFound(String),

    #[error("new ssh alias already exists: {0}")]
    NewAliasExists(String),

    #[error("invalid alias '{alias}': {reason}")]
    InvalidAlias { alias: String, reason: String },

    #[error("invalid host string '{input}': {reason}")]
    InvalidHostSpec { input: String, reason: String },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

impl DomainError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
