//! SSH client config model: parsing, mutation under alias uniqueness, rendering.
//!
//! Only `Host` blocks are modelled. The preamble before the first block and any
//! `Match` block are carried through verbatim.

use itertools::Itertools;
use tracing::debug;

use crate::domain::{validate_alias, AliasIndex, DomainError, HostEntry};

/// Directive indent used when rendering `Host` blocks.
pub const DEFAULT_INDENT: usize = 4;

/// One top-level section of the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Lines kept byte-for-byte (preamble, `Match` blocks)
    Verbatim(Vec<String>),
    Host(HostEntry),
}

/// Result of removing aliases from a config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteSummary {
    /// Aliases named for removal, repeats included
    pub aliases: usize,
    /// Entries dropped because they lost their last alias
    pub entries: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SshConfig {
    blocks: Vec<Block>,
}

impl SshConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_hosts(hosts: impl IntoIterator<Item = HostEntry>) -> Self {
        Self {
            blocks: hosts.into_iter().map(Block::Host).collect(),
        }
    }

    /// Parse config text.
    ///
    /// Fails on a `Host` line without patterns, a directive without a value,
    /// an unterminated quote or an invalid `Port`.
    pub fn parse(content: &str) -> Result<Self, DomainError> {
        let mut blocks = Vec::new();
        let mut current = Block::Verbatim(Vec::new());
        // comment and blank lines inside a host block, owner not yet known
        let mut pending: Vec<&str> = Vec::new();

        for (idx, raw) in content.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = raw.trim();

            if trimmed.is_empty() || trimmed.starts_with('#') {
                match &mut current {
                    Block::Verbatim(lines) => lines.push(raw.to_string()),
                    Block::Host(_) => pending.push(raw),
                }
                continue;
            }

            let (keyword, value) = split_directive(trimmed, line_no)?;
            match keyword.to_ascii_lowercase().as_str() {
                "host" => {
                    let aliases = split_patterns(value, line_no)?;
                    if aliases.is_empty() {
                        return Err(DomainError::parse(line_no, "Host without patterns"));
                    }
                    let leading = detach_leading(&mut current, std::mem::take(&mut pending));
                    finish_block(&mut blocks, current);
                    current = Block::Host(HostEntry {
                        aliases,
                        leading: leading.iter().map(|l| l.trim().to_string()).collect(),
                        ..Default::default()
                    });
                }
                "match" => {
                    let mut lines: Vec<String> =
                        detach_leading(&mut current, std::mem::take(&mut pending))
                            .into_iter()
                            .map(str::to_string)
                            .collect();
                    lines.push(raw.to_string());
                    finish_block(&mut blocks, current);
                    current = Block::Verbatim(lines);
                }
                key => match &mut current {
                    Block::Verbatim(lines) => lines.push(raw.to_string()),
                    Block::Host(entry) => {
                        entry
                            .extra
                            .extend(pending.drain(..).map(|l| l.trim().to_string()));
                        apply_directive(entry, key, trimmed, value, line_no)?;
                    }
                },
            }
        }
        if let Block::Host(entry) = &mut current {
            entry.extra.extend(pending.into_iter().map(|l| l.trim().to_string()));
        }
        finish_block(&mut blocks, current);

        debug!("parsed {} blocks", blocks.len());
        Ok(Self { blocks })
    }

    /// Render back to config text, indenting host directives by `indent` spaces.
    pub fn render(&self, indent: usize) -> String {
        let pad = " ".repeat(indent);
        let mut out = self
            .blocks
            .iter()
            .map(|block| match block {
                Block::Verbatim(lines) => lines.join("\n"),
                Block::Host(entry) => render_host(entry, &pad),
            })
            .join("\n\n");
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn hosts(&self) -> impl Iterator<Item = &HostEntry> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Host(entry) => Some(entry),
            Block::Verbatim(_) => None,
        })
    }

    pub fn host_count(&self) -> usize {
        self.hosts().count()
    }

    /// Index of every alias, keyed to block positions.
    pub fn alias_index(&self) -> AliasIndex {
        AliasIndex::build(self.blocks.iter().enumerate().filter_map(|(pos, b)| match b {
            Block::Host(entry) => Some((pos, entry)),
            Block::Verbatim(_) => None,
        }))
    }

    pub fn find(&self, alias: &str) -> Option<&HostEntry> {
        let pos = self.alias_index().owner(alias)?;
        self.host_at(pos)
    }

    /// Entries that match at least one of `terms`, in file order.
    /// No terms selects every entry.
    pub fn search(&self, terms: &[String]) -> Vec<&HostEntry> {
        self.hosts()
            .filter(|entry| terms.is_empty() || entry.matches_any(terms))
            .collect()
    }

    /// Append `entry`, unless one of its aliases is already taken.
    pub fn add_host(&mut self, entry: HostEntry) -> Result<HostEntry, DomainError> {
        for alias in &entry.aliases {
            validate_alias(alias)?;
        }
        let index = self.alias_index();
        if let Some(taken) = entry.aliases.iter().find(|a| index.contains(a)) {
            return Err(DomainError::AliasExists(taken.clone()));
        }

        self.blocks.push(Block::Host(entry.clone()));
        Ok(entry)
    }

    /// Remove every alias in `targets` from every entry, dropping entries left empty.
    ///
    /// All targets are checked first; one unknown alias leaves the config untouched.
    pub fn delete_aliases(&mut self, targets: &[String]) -> Result<DeleteSummary, DomainError> {
        let index = self.alias_index();
        if let Some(missing) = index.first_missing(targets) {
            return Err(DomainError::AliasNotFound(missing.to_string()));
        }

        let before = self.host_count();
        self.blocks.retain_mut(|block| match block {
            Block::Host(entry) => !entry.remove_aliases(targets),
            Block::Verbatim(_) => true,
        });

        let summary = DeleteSummary {
            aliases: targets.len(),
            entries: before - self.host_count(),
        };
        debug!("delete: {:?}", summary);
        Ok(summary)
    }

    /// Rename `old` to `new` in place on the entry owning `old`.
    pub fn rename_alias(&mut self, old: &str, new: &str) -> Result<&HostEntry, DomainError> {
        validate_alias(new)?;
        let index = self.alias_index();
        let pos = index
            .owner(old)
            .ok_or_else(|| DomainError::OldAliasNotFound(old.to_string()))?;
        if index.contains(new) {
            return Err(DomainError::NewAliasExists(new.to_string()));
        }

        match self.blocks.get_mut(pos) {
            Some(Block::Host(entry)) => {
                entry.rename_alias(old, new);
                Ok(entry)
            }
            _ => Err(DomainError::OldAliasNotFound(old.to_string())),
        }
    }

    fn host_at(&self, pos: usize) -> Option<&HostEntry> {
        match self.blocks.get(pos)? {
            Block::Host(entry) => Some(entry),
            Block::Verbatim(_) => None,
        }
    }
}

fn finish_block(blocks: &mut Vec<Block>, mut block: Block) {
    match &mut block {
        Block::Verbatim(lines) => {
            while lines.last().is_some_and(|l| l.trim().is_empty()) {
                lines.pop();
            }
            if lines.is_empty() {
                return;
            }
        }
        Block::Host(entry) => {
            while entry.extra.last().is_some_and(|l| l.is_empty()) {
                entry.extra.pop();
            }
        }
    }
    blocks.push(block);
}

/// Split the comment run collected after a host body between that body and the
/// block that follows.
///
/// Indented comments directly under the last directive stay with the host;
/// everything from the first blank or unindented line on moves down.
fn detach_leading<'a>(current: &mut Block, pending: Vec<&'a str>) -> Vec<&'a str> {
    let Block::Host(entry) = current else {
        return pending;
    };
    let split = pending
        .iter()
        .position(|l| l.trim().is_empty() || !l.starts_with(char::is_whitespace))
        .unwrap_or(pending.len());
    entry
        .extra
        .extend(pending[..split].iter().map(|l| l.trim().to_string()));
    pending[split..]
        .iter()
        .copied()
        .skip_while(|l| l.trim().is_empty())
        .collect()
}

/// Split `Keyword value` / `Keyword=value` / `Keyword = value`.
fn split_directive(line: &str, line_no: usize) -> Result<(&str, &str), DomainError> {
    let end = line
        .find(|c: char| c.is_whitespace() || c == '=')
        .unwrap_or(line.len());
    let (keyword, rest) = line.split_at(end);
    if keyword.is_empty() {
        return Err(DomainError::parse(line_no, "missing keyword"));
    }
    let rest = rest.trim_start();
    let value = rest.strip_prefix('=').unwrap_or(rest).trim();
    if value.is_empty() {
        return Err(DomainError::parse(
            line_no,
            format!("missing value for '{keyword}'"),
        ));
    }
    Ok((keyword, value))
}

fn split_patterns(value: &str, line_no: usize) -> Result<Vec<String>, DomainError> {
    let mut patterns = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in value.chars() {
        match c {
            '"' => quoted = !quoted,
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    patterns.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if quoted {
        return Err(DomainError::parse(line_no, "unterminated quote"));
    }
    if !current.is_empty() {
        patterns.push(current);
    }
    Ok(patterns)
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

fn apply_directive(
    entry: &mut HostEntry,
    key: &str,
    line: &str,
    value: &str,
    line_no: usize,
) -> Result<(), DomainError> {
    match key {
        "hostname" if entry.hostname.is_none() => {
            entry.hostname = Some(unquote(value).to_string());
        }
        "user" if entry.user.is_none() => {
            entry.user = Some(unquote(value).to_string());
        }
        "port" => {
            let port = unquote(value)
                .parse::<u16>()
                .ok()
                .filter(|p| *p != 0)
                .ok_or_else(|| DomainError::parse(line_no, format!("invalid Port '{value}'")))?;
            if entry.port.is_none() {
                entry.port = Some(port);
            } else {
                entry.extra.push(line.to_string());
            }
        }
        _ => entry.extra.push(line.to_string()),
    }
    Ok(())
}

fn quote_spaced(value: &str) -> String {
    if value.chars().any(char::is_whitespace) {
        format!("\"{value}\"")
    } else {
        value.to_string()
    }
}

fn render_host(entry: &HostEntry, pad: &str) -> String {
    let patterns = entry.aliases.iter().map(|a| quote_spaced(a)).join(" ");

    let mut lines = entry.leading.clone();
    lines.push(format!("Host {patterns}"));
    if let Some(hostname) = &entry.hostname {
        lines.push(format!("{pad}HostName {}", quote_spaced(hostname)));
    }
    if let Some(user) = &entry.user {
        lines.push(format!("{pad}User {}", quote_spaced(user)));
    }
    if let Some(port) = entry.port {
        lines.push(format!("{pad}Port {port}"));
    }
    for extra in &entry.extra {
        if extra.is_empty() {
            lines.push(String::new());
        } else {
            lines.push(format!("{pad}{extra}"));
        }
    }
    lines.join("\n")
}
