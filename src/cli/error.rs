//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        use crate::exitcode::{CONFIG, DATAERR, FAILURE, USAGE};

        match self {
            CliError::InvalidArgs(_) => USAGE,
            CliError::Infra(InfraError::Io { .. }) => FAILURE,
            CliError::Infra(InfraError::Application(e)) => match e {
                ApplicationError::Domain(
                    DomainError::InvalidAlias { .. } | DomainError::InvalidHostSpec { .. },
                ) => USAGE,
                ApplicationError::Domain(_) => FAILURE,
                ApplicationError::InvalidConfig { .. } => DATAERR,
                ApplicationError::Config { .. } => CONFIG,
                ApplicationError::NotImplemented(_) | ApplicationError::OperationFailed { .. } => {
                    FAILURE
                }
            },
        }
    }
}
