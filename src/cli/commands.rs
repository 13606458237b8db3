//! Command handlers: one per subcommand, each reporting through an [`Output`].

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::HostService;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output::Output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::infrastructure::traits::FileSystem;
use crate::infrastructure::{InfraError, InfraResult, ServiceContainer};

/// Dispatch the parsed command line.
pub fn execute_command(
    cli: &Cli,
    container: &ServiceContainer,
    out: &mut dyn Output,
) -> CliResult<()> {
    let hosts = &container.hosts;
    match &cli.command {
        Some(Commands::List { terms }) => list(hosts, terms, out),
        Some(Commands::Add { alias, host }) => add(hosts, alias, host, out),
        Some(Commands::Update) => Ok(hosts.update()?),
        Some(Commands::Delete { aliases }) => delete(hosts, aliases, out),
        Some(Commands::Rename { old, new }) => rename(hosts, old, new, out),
        Some(Commands::Backup { dest }) => backup(hosts, dest, out),
        Some(Commands::Config { command }) => config(command, container, out),
        Some(Commands::Completion { shell }) => {
            completion(*shell);
            Ok(())
        }
        None => Cli::command()
            .print_help()
            .map_err(|e| InfraError::io("print help", e).into()),
    }
}

#[instrument(skip(hosts, out))]
fn list(hosts: &HostService, terms: &[String], out: &mut dyn Output) -> CliResult<()> {
    let found = hosts.list(terms)?;
    out.success(&format!("Display {} records.", found.len()));
    out.info("");
    for entry in &found {
        out.host(entry);
    }
    Ok(())
}

#[instrument(skip(hosts, out))]
fn add(hosts: &HostService, alias: &str, host: &str, out: &mut dyn Output) -> CliResult<()> {
    let entry = hosts.add(alias, host)?;
    out.success(&format!("'{}' alias config added successfully", alias));
    out.info("");
    out.host(&entry);
    Ok(())
}

#[instrument(skip(hosts, out))]
fn delete(hosts: &HostService, aliases: &[String], out: &mut dyn Output) -> CliResult<()> {
    let summary = hosts.delete(aliases)?;
    out.success(&format!("deleted '{}' alias config", summary.aliases));
    if summary.entries > 0 {
        out.info(&format!("removed {} entries left without aliases", summary.entries));
    }
    Ok(())
}

#[instrument(skip(hosts, out))]
fn rename(hosts: &HostService, old: &str, new: &str, out: &mut dyn Output) -> CliResult<()> {
    let entry = hosts.rename(old, new)?;
    out.success(&format!("Rename from '{}' to '{}'", old, new));
    out.info("");
    out.host(&entry);
    Ok(())
}

#[instrument(skip(hosts, out))]
fn backup(hosts: &HostService, dest: &Path, out: &mut dyn Output) -> CliResult<()> {
    let bytes = hosts.backup(dest)?;
    debug!("backup wrote {} bytes", bytes);
    out.success(&format!("backup ssh config to '{}' success", dest.display()));
    Ok(())
}

fn config(
    command: &ConfigCommands,
    container: &ServiceContainer,
    out: &mut dyn Output,
) -> CliResult<()> {
    let settings = &container.settings;
    match command {
        ConfigCommands::Show => {
            out.info(settings.to_toml()?.trim_end());
        }
        ConfigCommands::Path => {
            let global = global_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<unavailable>".into());
            out.info(&format!("settings:   {}", global));
            out.info(&format!("ssh config: {}", settings.ssh_config.display()));
        }
        ConfigCommands::Init { force } => {
            let path = global_config_path().ok_or_else(|| {
                CliError::InvalidArgs("cannot determine config directory".into())
            })?;
            if init_settings(container.fs.as_ref(), &path, *force)? {
                out.success(&format!("wrote {}", path.display()));
            } else {
                out.info(&format!("{} exists, use --force to overwrite", path.display()));
            }
        }
    }
    Ok(())
}

/// Write the default settings to `path`. Returns false if it exists and `force` is unset.
pub fn init_settings(fs: &dyn FileSystem, path: &Path, force: bool) -> InfraResult<bool> {
    if fs.exists(path) && !force {
        return Ok(false);
    }
    let template = Settings::default().to_toml()?;
    fs.ensure_parent(path)
        .map_err(|e| InfraError::io(format!("create parent of {}", path.display()), e))?;
    fs.write(path, template.as_bytes())
        .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
    Ok(true)
}

fn completion(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

/// Settings for this invocation: layered settings, then `--file`.
pub fn resolve_settings(cli: &Cli) -> CliResult<Settings> {
    let settings = Settings::load()?;
    Ok(match &cli.file {
        Some(path) => settings.with_ssh_config(path),
        None => settings,
    })
}
