//! Host alias service
//!
//! Every operation reloads the SSH config from disk, applies one change and,
//! for mutating commands, rewrites the whole file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{
    validate_alias, DeleteSummary, HostEntry, HostSpec, SshConfig, DEFAULT_INDENT,
};
use crate::infrastructure::traits::FileSystem;

/// Service for reading and editing `Host` entries of one SSH config file.
pub struct HostService {
    fs: Arc<dyn FileSystem>,
    config_path: PathBuf,
    indent: usize,
}

impl HostService {
    /// Create a service bound to `config_path`.
    pub fn new(fs: Arc<dyn FileSystem>, config_path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            config_path: config_path.into(),
            indent: DEFAULT_INDENT,
        }
    }

    /// Directive indent used when rewriting the file.
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load and parse the config file.
    ///
    /// A missing file is an empty config; a file that exists but does not
    /// parse is an error.
    pub fn load(&self) -> ApplicationResult<SshConfig> {
        let path = &self.config_path;
        let Some(content) = self
            .fs
            .read_to_string(path)
            .allow_missing("read ssh config", path)?
        else {
            debug!("load: {} does not exist, starting empty", path.display());
            return Ok(SshConfig::new());
        };

        SshConfig::parse(&content).map_err(|source| ApplicationError::InvalidConfig {
            path: path.clone(),
            source,
        })
    }

    /// Serialize `config` and atomically replace the config file.
    pub fn save(&self, config: &SshConfig) -> ApplicationResult<()> {
        let path = &self.config_path;
        self.fs
            .ensure_parent(path)
            .with_path_context("create config directory", path)?;
        self.fs
            .write_atomic(path, config.render(self.indent).as_bytes())
            .with_path_context("write ssh config", path)?;
        info!("saved {} entries to {}", config.host_count(), path.display());
        Ok(())
    }

    /// All entries, or those matching any of `terms`.
    #[instrument(skip(self))]
    pub fn list(&self, terms: &[String]) -> ApplicationResult<Vec<HostEntry>> {
        let config = self.load()?;
        let hosts: Vec<HostEntry> = config.search(terms).into_iter().cloned().collect();
        debug!("list: {} of {} entries", hosts.len(), config.host_count());
        Ok(hosts)
    }

    /// Add a new entry for `alias` built from `host` (`[user@]hostname[:port]`).
    #[instrument(skip(self))]
    pub fn add(&self, alias: &str, host: &str) -> ApplicationResult<HostEntry> {
        validate_alias(alias)?;
        let spec = HostSpec::parse(host)?;

        let mut config = self.load()?;
        let added = config.add_host(HostEntry::from_spec(alias, &spec))?;
        self.save(&config)?;
        Ok(added)
    }

    /// Editing an existing entry in place is not available yet.
    pub fn update(&self) -> ApplicationResult<()> {
        Err(ApplicationError::NotImplemented("update"))
    }

    /// Remove `aliases` from the config; entries left without aliases are dropped.
    #[instrument(skip(self))]
    pub fn delete(&self, aliases: &[String]) -> ApplicationResult<DeleteSummary> {
        let mut config = self.load()?;
        let summary = config.delete_aliases(aliases)?;
        self.save(&config)?;
        Ok(summary)
    }

    /// Rename alias `old` to `new`, keeping its position on the owning entry.
    #[instrument(skip(self))]
    pub fn rename(&self, old: &str, new: &str) -> ApplicationResult<HostEntry> {
        let mut config = self.load()?;
        let renamed = config.rename_alias(old, new)?.clone();
        self.save(&config)?;
        Ok(renamed)
    }

    /// Copy the config file byte-for-byte to `dest`, with the same permission mode.
    ///
    /// Never parses; works for files this tool cannot read as a config.
    #[instrument(skip(self))]
    pub fn backup(&self, dest: &Path) -> ApplicationResult<u64> {
        let src = &self.config_path;
        let data = self.fs.read(src).with_path_context("read ssh config", src)?;
        self.fs
            .write(dest, &data)
            .with_path_context("write backup", dest)?;
        let perms = self
            .fs
            .permissions(src)
            .with_path_context("read permissions", src)?;
        self.fs
            .set_permissions(dest, perms)
            .with_path_context("set permissions", dest)?;
        info!("backup: {} bytes {} -> {}", data.len(), src.display(), dest.display());
        Ok(data.len() as u64)
    }
}
