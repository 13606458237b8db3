//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with mock implementations.

use std::fs::Permissions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read raw file contents.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Create or truncate `path` and write `content`.
    fn write(&self, path: &Path, content: &[u8]) -> io::Result<()>;

    /// Replace `path` with `content` via a temporary sibling file and rename.
    ///
    /// Keeps the permission mode of an existing file and writes through symlinks.
    fn write_atomic(&self, path: &Path, content: &[u8]) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Permission bits of an existing path.
    fn permissions(&self, path: &Path) -> io::Result<Permissions>;

    /// Apply permission bits.
    fn set_permissions(&self, path: &Path, perms: Permissions) -> io::Result<()>;

    /// Create parent directories if needed.
    fn ensure_parent(&self, path: &Path) -> io::Result<()>;
}

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl RealFileSystem {
    /// Resolve a symlinked config to the file it points at.
    fn resolve_target(path: &Path) -> PathBuf {
        let is_symlink = path
            .symlink_metadata()
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false);
        if is_symlink {
            std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
        } else {
            path.to_path_buf()
        }
    }
}

impl FileSystem for RealFileSystem {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn write_atomic(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        let target = Self::resolve_target(path);
        let dir = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let existing = std::fs::metadata(&target).ok().map(|m| m.permissions());

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(content)?;
        tmp.as_file().sync_all()?;
        if let Some(perms) = existing {
            tmp.as_file().set_permissions(perms)?;
        }
        tmp.persist(&target).map_err(|e| e.error)?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn permissions(&self, path: &Path) -> io::Result<Permissions> {
        std::fs::metadata(path).map(|m| m.permissions())
    }

    fn set_permissions(&self, path: &Path, perms: Permissions) -> io::Result<()> {
        std::fs::set_permissions(path, perms)
    }

    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}
