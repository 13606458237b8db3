//! `io::Result` helpers that attach the path being worked on.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

pub trait IoResultExt<T> {
    /// Wrap an I/O error as `OperationFailed` with "<action>: <path>" context.
    ///
    /// ```ignore
    /// self.fs.read(path).with_path_context("read ssh config", path)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;

    /// Like `with_path_context`, but a missing file yields `Ok(None)`.
    fn allow_missing(self, action: &str, path: &Path) -> ApplicationResult<Option<T>>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, path.display()),
            source: Box::new(e),
        })
    }

    fn allow_missing(self, action: &str, path: &Path) -> ApplicationResult<Option<T>> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_path_context(action, path),
        }
    }
}
